use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::session::User;

/// On-disk form of the signed-in profile.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub version: u8,
    pub user: User,
    /// The backend's session cookies as a `Cookie` header value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<String>,
}

const STORE_VERSION: u8 = 1;

/// Reads the stored profile. A missing or empty file means no session.
pub fn load_session(path: &Path) -> Result<Option<StoredSession>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    let stored: StoredSession = serde_json::from_str(&content)
        .with_context(|| format!("Session file {} is corrupt", path.display()))?;
    Ok(Some(stored))
}

pub fn save_session(path: &Path, user: &User, cookies: Option<&str>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let stored = StoredSession {
        version: STORE_VERSION,
        user: user.clone(),
        cookies: cookies.map(str::to_string),
    };
    let json = serde_json::to_string_pretty(&stored)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write session file {}", path.display()))?;
    Ok(())
}

pub fn remove_session(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove session file {}", path.display()))?;
    }
    Ok(())
}

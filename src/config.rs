use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::generator::GeneratorPolicy;

pub const DEFAULT_API_URL: &str = "http://localhost/php_project/Lock Box/LockBox.php";
pub const DEFAULT_API_KEY: &str = "lock123";
const CONFIG_FILE: &str = "config.json";

/// Application settings, read from `config.json` and overridden from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub api_key: String,
    pub data_dir: PathBuf,
    pub log_level: String,
    pub history_size: usize,
    pub request_timeout_secs: u64,
    /// Policy the generator starts with.
    pub generator: GeneratorPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            data_dir: default_data_dir(),
            log_level: "info".to_string(),
            history_size: 1000,
            request_timeout_secs: 15,
            generator: GeneratorPolicy::default(),
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    match dirs_next::home_dir() {
        Some(home) => home.join(".lockbox"),
        None => PathBuf::from(".lockbox"),
    }
}

/// Expands a leading `~` in a user-typed path to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    expand_home_in(path, dirs_next::home_dir())
}

fn expand_home_in(path: &str, home: Option<PathBuf>) -> PathBuf {
    let Some(rest) = path.strip_prefix('~') else {
        return PathBuf::from(path);
    };
    match home {
        Some(home) if rest.is_empty() => home,
        Some(home) if rest.starts_with(['/', std::path::MAIN_SEPARATOR]) => {
            home.join(rest.trim_start_matches(['/', std::path::MAIN_SEPARATOR]))
        }
        // `~user/...` and a missing home stay literal.
        _ => PathBuf::from(path),
    }
}

impl AppConfig {
    /// Reads `path`, or `config.json` inside `data_dir` (the default data dir
    /// when that is `None`) when no path is given. A missing file in the data
    /// dir yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        let (path, required) = match (path, data_dir) {
            (Some(p), _) => (p.to_path_buf(), true),
            (None, Some(dir)) => (dir.join(CONFIG_FILE), false),
            (None, None) => (default_data_dir().join(CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(anyhow!("Config file {} does not exist", path.display()));
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(anyhow!("api_url must not be empty"));
        }
        self.log_level_filter()?;
        self.generator
            .validate()
            .context("Invalid default generator policy")?;
        Ok(())
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| anyhow!("Unknown log level '{}'", self.log_level))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("lockbox.log")
    }
}

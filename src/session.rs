//! Explicit session context.
//!
//! The signed-in profile lives in a [`Session`] value owned by the caller
//! rather than in ambient global state. It is loaded once at startup,
//! replaced on login or a successful session check, and cleared on logout or
//! whenever the backend reports the session as expired.
//!
//! The backend tracks sessions by cookie, so the cookie header is stored
//! with the profile and handed back to the client before the next check.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::ApiClient;
use crate::storage;

/// The authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub name: String,
}

#[derive(Debug)]
pub struct Session {
    user: Option<User>,
    cookies: Option<String>,
    path: Option<PathBuf>,
}

impl Session {
    /// A session that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            user: None,
            cookies: None,
            path: None,
        }
    }

    /// Loads the stored profile at `path`. An unreadable file is discarded.
    pub fn load(path: &Path) -> Self {
        let stored = match storage::load_session(path) {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("Discarding stored session: {:#}", e);
                None
            }
        };
        let (user, cookies) = match stored {
            Some(stored) => {
                log::debug!("Restored session for user {}", stored.user.id);
                (Some(stored.user), stored.cookies)
            }
            None => (None, None),
        };
        Self {
            user,
            cookies,
            path: Some(path.to_path_buf()),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn cookies(&self) -> Option<&str> {
        self.cookies.as_deref()
    }

    /// Takes the client's current session cookies so they are saved with the profile.
    pub fn remember_cookies(&mut self, client: &ApiClient) {
        self.cookies = client.session_cookies();
    }

    pub fn establish(&mut self, user: User) {
        log::info!("Session established for user {}", user.id);
        self.user = Some(user);
    }

    pub fn clear(&mut self) {
        self.cookies = None;
        if self.user.take().is_some() {
            log::info!("Session cleared");
        }
    }

    /// Asks the backend whether the session is still valid and follows its answer.
    /// A failed check counts as signed out. Returns true if a user remains.
    pub fn revalidate(&mut self, client: &ApiClient) -> bool {
        if let Some(cookies) = &self.cookies {
            client.restore_cookies(cookies);
        }
        match client.check_session() {
            Ok(Some(user)) => {
                self.establish(user);
                self.remember_cookies(client);
            }
            Ok(None) => self.clear(),
            Err(e) => {
                log::warn!("Session check failed: {}", e);
                self.clear();
            }
        }
        self.is_authenticated()
    }

    /// Writes the current state to disk: the profile if signed in, nothing otherwise.
    pub fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        match &self.user {
            Some(user) => storage::save_session(path, user, self.cookies.as_deref()),
            None => storage::remove_session(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn user() -> User {
        User {
            id: 1,
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
        }
    }

    #[test]
    fn test_lifecycle_persists_and_clears() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let mut session = Session::load(&path);
        assert!(!session.is_authenticated());

        session.establish(user());
        session.persist().unwrap();

        let restored = Session::load(&path);
        assert_eq!(restored.user(), Some(&user()));

        session.clear();
        session.persist().unwrap();
        assert!(!path.exists());
        assert!(!Session::load(&path).is_authenticated());
    }

    #[test]
    fn test_corrupt_store_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "garbage").unwrap();

        assert!(!Session::load(&path).is_authenticated());
    }

    #[test]
    fn test_revalidate_follows_backend() {
        use crate::api::transport::mock::MockTransport;
        use serde_json::json;
        use std::rc::Rc;

        let transport = Rc::new(MockTransport::with_responses(vec![
            json!({"code": 200, "data": {"user_id": 1, "email": "ada@example.com", "name": "Ada"}}),
            json!({"code": 401}),
        ]));
        let client = ApiClient::new(Box::new(Rc::clone(&transport)), "lock123");

        let mut session = Session::in_memory();
        assert!(session.revalidate(&client));
        assert_eq!(session.user(), Some(&user()));

        assert!(!session.revalidate(&client));
        assert!(!session.is_authenticated());

        // Out of canned responses: the check fails and the session is dropped.
        session.establish(user());
        assert!(!session.revalidate(&client));
    }

    #[test]
    fn test_restart_restores_cookies_before_check() {
        use crate::api::Transport;
        use crate::api::transport::mock::MockTransport;
        use serde_json::json;
        use std::rc::Rc;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        // First run: login left a session cookie in the client.
        let first = Rc::new(MockTransport::default());
        first.restore_cookies("PHPSESSID=abc123");
        let client = ApiClient::new(Box::new(Rc::clone(&first)), "lock123");
        let mut session = Session::load(&path);
        session.establish(user());
        session.remember_cookies(&client);
        session.persist().unwrap();

        // Second run: a fresh client only knows the stored cookie.
        let second = Rc::new(MockTransport::with_responses(vec![json!({
            "code": 200,
            "data": {"user_id": 1, "email": "ada@example.com", "name": "Ada"}
        })]));
        let client = ApiClient::new(Box::new(Rc::clone(&second)), "lock123");
        let mut session = Session::load(&path);
        assert_eq!(session.cookies(), Some("PHPSESSID=abc123"));

        assert!(session.revalidate(&client));
        assert_eq!(second.cookies.borrow().as_deref(), Some("PHPSESSID=abc123"));
        session.persist().unwrap();
        assert!(path.exists());
        assert_eq!(Session::load(&path).user(), Some(&user()));
    }

    #[test]
    fn test_clear_forgets_cookies() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(
            &path,
            r#"{"version": 1, "user": {"id": 1, "email": "ada@example.com", "name": "Ada"}, "cookies": "PHPSESSID=abc123"}"#,
        )
        .unwrap();

        let mut session = Session::load(&path);
        assert_eq!(session.cookies(), Some("PHPSESSID=abc123"));
        session.clear();
        assert_eq!(session.cookies(), None);
        session.persist().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_in_memory_persist_is_noop() {
        let mut session = Session::in_memory();
        session.establish(user());
        session.persist().unwrap();
        assert!(session.is_authenticated());
    }
}

//! LockBox - password generation, strength scoring and a client for the
//! LockBox backend.
//!
//! This library provides the password generator and strength estimator, the
//! typed backend client, the explicit session context, and a shell-like
//! interactive interface on top of them.

pub mod api;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod generator;
pub mod logging;
pub mod session;
pub mod shell;
pub mod storage;
pub mod strength;
pub mod trie;

// Re-export commonly used types
pub use api::{ApiClient, ApiError};
pub use config::AppConfig;
pub use credentials::{PasswordRecord, Vault};
pub use generator::{GeneratedPassword, GeneratorError, GeneratorPanel, GeneratorPolicy, generate};
pub use logging::{LogConfig, init_logging};
pub use session::{Session, User};
pub use shell::Shell;
pub use strength::{StrengthLabel, classify, estimate_strength};
pub use trie::Trie;

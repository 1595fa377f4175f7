//! Command history management.
//!
//! Lines that put a password on the command line are never recorded.

use std::path::PathBuf;
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

/// Configuration for command history.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    pub path: PathBuf,
    pub max_entries: usize,
    /// Whether to ignore duplicate consecutive entries.
    pub ignore_dups: bool,
    /// Whether to ignore entries starting with whitespace.
    pub ignore_space: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("history"),
            max_entries: 1000,
            ignore_dups: true,
            ignore_space: true,
        }
    }
}

impl HistoryConfig {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    pub fn with_ignore_dups(mut self, ignore: bool) -> Self {
        self.ignore_dups = ignore;
        self
    }

    pub fn with_ignore_space(mut self, ignore: bool) -> Self {
        self.ignore_space = ignore;
        self
    }
}

/// Decides which lines are added to history.
pub struct HistoryFilter {
    config: HistoryConfig,
    registry: Option<Arc<CommandRegistry>>,
    /// Last entry added (for duplicate detection).
    last_entry: Option<String>,
}

impl HistoryFilter {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            config,
            registry: None,
            last_entry: None,
        }
    }

    /// Lets the filter recognize commands whose arguments carry secrets.
    pub fn with_registry(mut self, registry: Arc<CommandRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    fn carries_secret(&self, entry: &str) -> bool {
        let Some(registry) = &self.registry else {
            return false;
        };
        let words = shell_words::split(entry)
            .unwrap_or_else(|_| entry.split_whitespace().map(String::from).collect());
        let Some((name, args)) = words.split_first() else {
            return false;
        };
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        registry.carries_secret(name, &args)
    }

    /// Determines if a raw input line should be added to history.
    pub fn should_add(&mut self, line: &str) -> bool {
        if self.config.ignore_space && line.starts_with(char::is_whitespace) {
            return false;
        }

        let entry = line.trim();
        if entry.is_empty() {
            return false;
        }

        if self.carries_secret(entry) {
            log::debug!("Keeping a line with a password out of history");
            return false;
        }

        if self.config.ignore_dups && self.last_entry.as_deref() == Some(entry) {
            return false;
        }

        self.last_entry = Some(entry.to_string());
        true
    }

    pub fn reset(&mut self) {
        self.last_entry = None;
    }
}

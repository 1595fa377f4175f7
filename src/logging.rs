//! Logging setup.
//!
//! Everything at the configured level goes to a log file with timestamps;
//! warnings and errors are echoed to the terminal as well. The log file is
//! rotated when it grows past a size limit.

use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub path: PathBuf,
    /// Level written to the file.
    pub level: LevelFilter,
    /// Level echoed to the terminal.
    pub terminal_level: LevelFilter,
    /// Rotate when the file exceeds this many bytes (0 disables rotation).
    pub max_size: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lockbox.log"),
            level: LevelFilter::Info,
            terminal_level: LevelFilter::Warn,
            max_size: 5 * 1024 * 1024,
        }
    }
}

impl LogConfig {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(config.log_path()).with_level(config.log_level_filter()?))
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    fn needs_rotation(&self) -> bool {
        self.max_size > 0
            && std::fs::metadata(&self.path)
                .map(|m| m.len() > self.max_size)
                .unwrap_or(false)
    }
}

/// Installs the global logger. Call once, before the shell starts.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    if config.needs_rotation() {
        rotate_log(&config.path)?;
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.path)
        .with_context(|| format!("Failed to open log file {}", config.path.display()))?;

    let file_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Debug)
        .build();

    let term_config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> =
        vec![WriteLogger::new(config.level, file_config, log_file)];

    if std::env::var_os("TERM").is_some() {
        loggers.push(TermLogger::new(
            config.terminal_level,
            term_config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    CombinedLogger::init(loggers).context("Failed to initialize logger")?;

    log::info!("Logging initialized at level {:?}", config.level);
    log::debug!("Log file: {}", config.path.display());
    Ok(())
}

fn rotated_path(path: &Path) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("lockbox.log");
    path.with_file_name(format!("{}.{}", name, timestamp))
}

fn rotate_log(path: &Path) -> Result<()> {
    let target = rotated_path(path);
    std::fs::rename(path, &target)
        .with_context(|| format!("Failed to rotate log file {}", path.display()))?;
    Ok(())
}

/// Runs `f` and logs how long it took under `operation`.
pub fn timed<T, F: FnOnce() -> T>(operation: &str, f: F) -> T {
    let start = std::time::Instant::now();
    let result = f();
    log::debug!("{} completed in {:?}", operation, start.elapsed());
    result
}

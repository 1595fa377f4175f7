use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::generator::GeneratorPolicy;

#[derive(Parser, Debug)]
#[command(name = "lockbox")]
#[command(version)]
#[command(about = "Password manager client for the LockBox backend", long_about = None)]
pub struct Cli {
    /// Path to a JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend endpoint URL
    #[arg(long, env = "LOCKBOX_API_URL")]
    pub api_url: Option<String>,

    /// API key sent with every request
    #[arg(long, env = "LOCKBOX_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Directory for session, history and log files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive shell (default).
    Shell,
    /// Print a generated password and its strength.
    #[command(alias = "gen")]
    Generate(GenerateArgs),
    /// Score a password.
    Strength {
        /// The password to score
        password: String,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Length between 8 and 32
    #[arg(short, long)]
    pub length: Option<usize>,
    /// Leave out uppercase letters
    #[arg(long)]
    pub no_upper: bool,
    /// Leave out digits
    #[arg(long)]
    pub no_numbers: bool,
    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,
}

impl GenerateArgs {
    pub fn policy(&self, base: GeneratorPolicy) -> GeneratorPolicy {
        let mut policy = base;
        if let Some(length) = self.length {
            policy.length = length;
        }
        policy
            .with_uppercase(base.include_uppercase && !self.no_upper)
            .with_numbers(base.include_numbers && !self.no_numbers)
            .with_symbols(base.include_symbols && !self.no_symbols)
    }
}

impl Cli {
    /// Flags win over the config file.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(key) = &self.api_key {
            config.api_key = key.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "lockbox",
            "--api-url",
            "https://vault.example",
            "--log-level",
            "debug",
        ]);
        let mut config = AppConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config.api_url, "https://vault.example");
        assert_eq!(config.log_level, "debug");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_generate_args_policy() {
        let cli = Cli::parse_from(["lockbox", "generate", "-l", "20", "--no-symbols"]);
        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected generate subcommand");
        };
        let policy = args.policy(GeneratorPolicy::default());
        assert_eq!(policy.length, 20);
        assert!(policy.include_uppercase);
        assert!(!policy.include_symbols);
    }
}

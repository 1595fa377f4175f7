use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use lockbox::api::{ApiClient, HttpTransport};
use lockbox::cli::{Cli, Commands};
use lockbox::config::AppConfig;
use lockbox::generator::{self, GeneratedPassword, GeneratorPanel};
use lockbox::logging::{LogConfig, init_logging};
use lockbox::session::Session;
use lockbox::shell::command::ShellState;
use lockbox::shell::history::HistoryConfig;
use lockbox::shell::{Shell, ShellConfig};
use lockbox::strength::{classify, estimate_strength};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref(), cli.data_dir.as_deref())?;
    cli.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Some(Commands::Generate(args)) => {
            let policy = args.policy(config.generator);
            let generated = GeneratedPassword::from_value(generator::generate(&policy)?);
            println!("{}", generated.value);
            eprintln!("Strength: {}/100 ({})", generated.strength, generated.label());
            Ok(())
        }
        Some(Commands::Strength { password }) => {
            let score = estimate_strength(password);
            println!("{}/100 ({})", score, classify(score));
            Ok(())
        }
        Some(Commands::Shell) | None => run_shell(&config),
    }
}

fn run_shell(config: &AppConfig) -> Result<()> {
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;
    init_logging(&LogConfig::from_app_config(config)?)?;

    let transport = HttpTransport::new(&config.api_url, config.request_timeout())?;
    log::info!("Starting LockBox client for {}", transport.url());
    log::debug!("Using data directory {}", config.data_dir.display());
    let client = ApiClient::new(Box::new(transport), config.api_key.clone());

    let mut session = Session::load(&config.session_path());
    if session.is_authenticated() {
        session.revalidate(&client);
        if let Err(e) = session.persist() {
            log::warn!("Failed to update stored session: {:#}", e);
        }
    }

    let mut state = ShellState::new(session, GeneratorPanel::new(config.generator));
    if let Some(user) = state.session.user().cloned() {
        match client.list_passwords(&user) {
            Ok(records) => state.vault.replace_all(records),
            Err(e) => log::warn!("Could not load password list: {}", e),
        }
    }

    let shell = Shell::with_config(ShellConfig {
        history: HistoryConfig::new(config.history_path()).with_max_entries(config.history_size),
        show_welcome: true,
    });
    shell.run_with_save(&client, &mut state, |session| session.persist())
}

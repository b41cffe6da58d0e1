// Caredesk - Clinical Front-Desk Patient Records
// Copyright (c) 2025 Caredesk Contributors
// Licensed under the MIT License

use caredesk::cli::{Cli, Commands};
use caredesk::config::{load_config, LoggingConfig};
use caredesk::domain::CaredeskError;
use caredesk::log_error_with_context;
use caredesk::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Optional: a missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging settings come from the config file when it loads cleanly;
    // commands report configuration problems themselves.
    let config = load_config(&cli.config).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = config.map(|c| c.logging).unwrap_or_else(LoggingConfig::default);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Caredesk starting");

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(e, "Command execution failed");
            eprintln!("Error: {e}");
            e.downcast_ref::<CaredeskError>()
                .map(CaredeskError::exit_code)
                .unwrap_or(5)
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.config.as_str();
    match &cli.command {
        Commands::Init(args) => args.execute(),
        Commands::ValidateConfig(args) => args.execute(config),
        Commands::AddUser(args) => args.execute(config),
        Commands::AddPatient(args) => args.execute(config),
        Commands::UpdatePatient(args) => args.execute(config),
        Commands::Show(args) => args.execute(config),
        Commands::Search(args) => args.execute(config),
        Commands::List(args) => args.execute(config),
        Commands::Recommend(args) => args.execute(config),
        Commands::Import(args) => args.execute(config),
        Commands::Export(args) => args.execute(config),
    }
}

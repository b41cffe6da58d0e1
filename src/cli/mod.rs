//! CLI interface and argument parsing
//!
//! This module provides the command-line front end for Caredesk using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Caredesk - clinical front-desk patient records
#[derive(Parser, Debug)]
#[command(name = "caredesk")]
#[command(version, about, long_about = None)]
#[command(author = "Caredesk Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "caredesk.toml", env = "CAREDESK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CAREDESK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Register a caretaker account
    AddUser(commands::users::AddUserArgs),

    /// Add a patient record
    AddPatient(commands::patients::AddPatientArgs),

    /// Change fields of a patient record
    UpdatePatient(commands::patients::UpdatePatientArgs),

    /// Show one patient with guidance for their condition
    Show(commands::patients::ShowArgs),

    /// Search patients by id or name
    Search(commands::patients::SearchArgs),

    /// List all patients
    List(commands::patients::ListArgs),

    /// Show medication, treatment and diet guidance for a condition
    Recommend(commands::recommend::RecommendArgs),

    /// Import patients from a JSON rows file
    Import(commands::transfer::ImportArgs),

    /// Export patients as JSON rows
    Export(commands::transfer::ExportArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["caredesk", "validate-config"]);
        assert_eq!(cli.config, "caredesk.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["caredesk", "--config", "clinic.toml", "list", "-u", "nurse1"]);
        assert_eq!(cli.config, "clinic.toml");
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["caredesk", "--log-level", "debug", "recommend", "Asthma"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_add_patient() {
        let cli = Cli::parse_from([
            "caredesk",
            "add-patient",
            "-u",
            "doctor1",
            "--name",
            "Ann Smith",
            "--age",
            "54",
            "--condition",
            "Diabetes",
            "--treatment",
            "Insulin review",
            "--heart-rate",
            "72",
        ]);
        match cli.command {
            Commands::AddPatient(args) => {
                assert_eq!(args.name, "Ann Smith");
                assert_eq!(args.heart_rate, Some(72));
                assert_eq!(args.temperature, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_search() {
        let cli = Cli::parse_from(["caredesk", "search", "-u", "nurse1", "ann"]);
        match cli.command {
            Commands::Search(args) => assert_eq!(args.terms, vec!["ann"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["caredesk", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}

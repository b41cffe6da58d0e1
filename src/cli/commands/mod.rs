//! CLI command implementations
//!
//! Commands return `anyhow::Result<i32>`: the `Ok` value is the exit code for
//! outcomes the command reports itself, and errors carrying a
//! [`CaredeskError`] are mapped to exit codes by the binary.

pub mod init;
pub mod patients;
pub mod recommend;
pub mod transfer;
pub mod users;
pub mod validate;

use crate::config::{load_config, load_config_from_str, secret_string, CaredeskConfig};
use crate::core::session::Session;
use crate::domain::{CaredeskError, Patient};
use clap::Args;
use std::path::Path;

/// Environment variable holding the password for patient commands
pub const PASSWORD_ENV: &str = "CAREDESK_PASSWORD";

/// Credentials for commands that touch patient records
#[derive(Args, Debug, Clone)]
pub struct AuthArgs {
    /// Caretaker username (password is read from CAREDESK_PASSWORD)
    #[arg(short, long, env = "CAREDESK_USERNAME")]
    pub username: String,
}

/// Load the configuration file, or built-in defaults if it does not exist
pub(crate) fn load_settings(config_path: &str) -> crate::domain::Result<CaredeskConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::info!(
            config_path = %config_path,
            "Configuration file not found, using defaults"
        );
        load_config_from_str("")
    }
}

/// Open a session and log in with the given account
pub(crate) fn authenticated_session(config_path: &str, auth: &AuthArgs) -> anyhow::Result<Session> {
    let config = load_settings(config_path)?;
    let mut session = Session::open(&config)?;

    let password = std::env::var(PASSWORD_ENV).map_err(|_| {
        CaredeskError::Unauthorized(format!("{PASSWORD_ENV} is not set"))
    })?;
    session.login(&auth.username, &secret_string(password))?;
    Ok(session)
}

fn display_optional<T: std::fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One summary line per patient
pub(crate) fn print_patient_table(patients: &[Patient]) {
    if patients.is_empty() {
        println!("No patients found");
        return;
    }
    println!("{:>6}  {:<24}  {:>4}  {:<16}", "ID", "Name", "Age", "Condition");
    for p in patients {
        println!(
            "{:>6}  {:<24}  {:>4}  {:<16}",
            p.id, p.name, p.age, p.condition
        );
    }
}

/// Every field of a patient
pub(crate) fn print_patient(patient: &Patient) {
    println!("ID:                 {}", patient.id);
    println!("Name:               {}", patient.name);
    println!("Age:                {}", patient.age);
    println!("Condition:          {}", patient.condition);
    println!("Heart Rate:         {}", display_optional(&patient.heart_rate));
    println!("Temperature:        {}", display_optional(&patient.temperature));
    println!("Health Problem:     {}", display_optional(&patient.health_problem));
    println!("Treatment Required: {}", patient.treatment_required);
    println!("Medications:        {}", display_optional(&patient.medications));
    println!("Diet Plan:          {}", display_optional(&patient.diet_plan));
}

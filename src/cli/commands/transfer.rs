//! Import and export commands
//!
//! Both use JSON arrays of row objects keyed by column header. Spreadsheet
//! formats are converted outside Caredesk.

use super::{authenticated_session, AuthArgs};
use crate::core::ingest::RawPatientRow;
use crate::domain::CaredeskError;
use clap::Args;
use std::fs;

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    #[command(flatten)]
    pub auth: AuthArgs,

    /// JSON file holding an array of row objects
    pub input: String,
}

impl ImportArgs {
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let contents = fs::read_to_string(&self.input).map_err(|e| {
            CaredeskError::Io(format!("Failed to read {}: {e}", self.input))
        })?;
        let rows: Vec<RawPatientRow> =
            serde_json::from_str(&contents).map_err(CaredeskError::from)?;

        let session = authenticated_session(config_path, &self.auth)?;
        let report = session.import_rows(&rows)?;

        println!(
            "Imported {} rows: {} added, {} updated, {} skipped",
            report.total(),
            report.added,
            report.updated,
            report.skipped.len()
        );
        for failure in &report.skipped {
            println!("  row {}: {}", failure.row + 1, failure.error);
        }

        Ok(if report.is_clean() { 0 } else { 4 })
    }
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub auth: AuthArgs,

    /// Output file; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,
}

impl ExportArgs {
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let session = authenticated_session(config_path, &self.auth)?;
        let rows = session.export_rows()?;
        let json = serde_json::to_string_pretty(&rows).map_err(CaredeskError::from)?;

        match &self.output {
            Some(path) => {
                fs::write(path, json)
                    .map_err(|e| CaredeskError::Io(format!("Failed to write {path}: {e}")))?;
                println!("Exported {} patients to {path}", rows.len());
            }
            None => println!("{json}"),
        }
        Ok(0)
    }
}

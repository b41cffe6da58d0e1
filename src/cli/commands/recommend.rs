//! Recommend command implementation

use super::load_settings;
use crate::core::recommendations::RecommendationTable;
use clap::Args;

/// Arguments for the recommend command
#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Condition name (case-sensitive); omit with --list
    #[arg(required_unless_present = "list")]
    pub condition: Option<String>,

    /// List the conditions that have guidance
    #[arg(long)]
    pub list: bool,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl RecommendArgs {
    /// Look up guidance; needs no login
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_settings(config_path)?;
        let table = RecommendationTable::from_config(&config.recommendations)?;

        if self.list {
            for condition in table.conditions() {
                println!("{condition}");
            }
            return Ok(0);
        }

        let condition = self.condition.as_deref().unwrap_or_default();
        let entry = table.lookup(condition);

        if self.json {
            println!("{}", serde_json::to_string_pretty(entry)?);
            return Ok(0);
        }

        println!("Condition: {condition}");
        println!("Medications:");
        for item in &entry.medications {
            println!("  - {item}");
        }
        println!("Treatments:");
        for item in &entry.treatments {
            println!("  - {item}");
        }
        println!("Diet:");
        for item in &entry.diet {
            println!("  - {item}");
        }
        Ok(0)
    }
}

//! Static condition → guidance table

use crate::config::RecommendationsConfig;
use crate::domain::{CaredeskError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const BUILTIN_TABLE: &str = include_str!("../../../resources/recommendations.toml");

pub const NO_MEDICATION: &str = "No medication available";
pub const NO_TREATMENT: &str = "No treatment available";
pub const NO_DIET: &str = "No diet recommendation available";

/// Guidance for one condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub medications: Vec<String>,
    pub treatments: Vec<String>,
    pub diet: Vec<String>,
}

impl Recommendation {
    fn placeholder() -> Self {
        Self {
            medications: vec![NO_MEDICATION.to_string()],
            treatments: vec![NO_TREATMENT.to_string()],
            diet: vec![NO_DIET.to_string()],
        }
    }
}

/// Read-only mapping from condition name to [`Recommendation`]
///
/// Built once at startup; there is no way to change it afterwards.
///
/// # Examples
///
/// ```
/// use caredesk::core::recommendations::RecommendationTable;
///
/// let table = RecommendationTable::builtin().unwrap();
/// assert_eq!(table.lookup("Diabetes").medications, ["Metformin", "Insulin if needed"]);
/// assert_eq!(table.lookup("UnknownX").medications, ["No medication available"]);
/// ```
#[derive(Debug, Clone)]
pub struct RecommendationTable {
    entries: HashMap<String, Recommendation>,
    fallback: Recommendation,
}

impl RecommendationTable {
    /// The table shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_TABLE)
    }

    /// Parse a table from TOML, one `[Condition]` section per entry
    ///
    /// # Errors
    ///
    /// Returns [`CaredeskError::Configuration`] if the TOML is invalid or an
    /// entry has an empty list.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let entries: HashMap<String, Recommendation> = toml::from_str(contents)?;

        for (condition, entry) in &entries {
            if entry.medications.is_empty() || entry.treatments.is_empty() || entry.diet.is_empty()
            {
                return Err(CaredeskError::Configuration(format!(
                    "Recommendation for '{condition}' has an empty list"
                )));
            }
        }

        Ok(Self {
            entries,
            fallback: Recommendation::placeholder(),
        })
    }

    /// Load a table from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            CaredeskError::Configuration(format!(
                "Failed to read recommendations file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&contents)
    }

    /// Build the table named by configuration, falling back to the built-in one
    pub fn from_config(config: &RecommendationsConfig) -> Result<Self> {
        let table = match &config.path {
            Some(path) => Self::from_file(path)?,
            None => Self::builtin()?,
        };
        tracing::debug!(conditions = table.len(), "Recommendation table loaded");
        Ok(table)
    }

    /// Guidance for a condition
    ///
    /// Never fails: unknown conditions get placeholder text in every list.
    pub fn lookup(&self, condition: &str) -> &Recommendation {
        self.entries.get(condition).unwrap_or(&self.fallback)
    }

    /// True if the condition has its own entry
    pub fn contains(&self, condition: &str) -> bool {
        self.entries.contains_key(condition)
    }

    /// Known condition names, sorted
    pub fn conditions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

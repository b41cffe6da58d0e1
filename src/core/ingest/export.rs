//! Fixed-shape export rows

use super::row::RawPatientRow;
use crate::domain::Patient;
use serde::{Deserialize, Serialize};

/// One exported patient, with the ten tabular column headers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Condition")]
    pub condition: String,
    #[serde(rename = "Heart Rate")]
    pub heart_rate: Option<u32>,
    #[serde(rename = "Temperature")]
    pub temperature: Option<f64>,
    #[serde(rename = "Health Problem")]
    pub health_problem: Option<String>,
    #[serde(rename = "Treatment Required")]
    pub treatment_required: String,
    #[serde(rename = "Medications")]
    pub medications: Option<String>,
    #[serde(rename = "Diet Plan")]
    pub diet_plan: Option<String>,
}

impl From<&Patient> for ExportRow {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.get(),
            name: patient.name.clone(),
            age: patient.age,
            condition: patient.condition.clone(),
            heart_rate: patient.heart_rate,
            temperature: patient.temperature,
            health_problem: patient.health_problem.clone(),
            treatment_required: patient.treatment_required.clone(),
            medications: patient.medications.clone(),
            diet_plan: patient.diet_plan.clone(),
        }
    }
}

impl From<&ExportRow> for RawPatientRow {
    fn from(row: &ExportRow) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        RawPatientRow::new()
            .with("ID", row.id.to_string())
            .with("Name", row.name.as_str())
            .with("Age", row.age.to_string())
            .with("Condition", row.condition.as_str())
            .with(
                "Heart Rate",
                row.heart_rate.map(|v| v.to_string()).unwrap_or_default(),
            )
            .with(
                "Temperature",
                row.temperature.map(|v| v.to_string()).unwrap_or_default(),
            )
            .with("Health Problem", text(&row.health_problem))
            .with("Treatment Required", row.treatment_required.as_str())
            .with("Medications", text(&row.medications))
            .with("Diet Plan", text(&row.diet_plan))
    }
}

/// Convert patients into export rows, preserving order
pub fn export_rows(patients: &[Patient]) -> Vec<ExportRow> {
    patients.iter().map(ExportRow::from).collect()
}

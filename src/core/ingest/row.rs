//! Raw tabular rows and their conversion into typed patient values

use crate::domain::{
    CaredeskError, PatientDraft, PatientId, PatientUpdate, Result, DEFAULT_HEART_RATE,
    DEFAULT_TEMPERATURE,
};
use serde::Deserialize;
use std::collections::HashMap;

/// A patient column, recognised from any of its accepted header spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Name,
    Age,
    Condition,
    HeartRate,
    Temperature,
    HealthProblem,
    TreatmentRequired,
    Medications,
    DietPlan,
}

impl Column {
    /// Resolve a header, ignoring case, spaces and underscores
    ///
    /// Accepts the export headers ("Heart Rate", "Treatment Required", ...)
    /// as well as the older spreadsheet headers `Patient_ID`, `Name` and
    /// `Medical Condition`.
    pub fn from_header(header: &str) -> Option<Self> {
        let key: String = header
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        let column = match key.as_str() {
            "id" | "patientid" => Column::Id,
            "name" => Column::Name,
            "age" => Column::Age,
            "condition" | "medicalcondition" => Column::Condition,
            "heartrate" => Column::HeartRate,
            "temperature" => Column::Temperature,
            "healthproblem" => Column::HealthProblem,
            "treatmentrequired" => Column::TreatmentRequired,
            "medications" => Column::Medications,
            "dietplan" => Column::DietPlan,
            _ => return None,
        };
        Some(column)
    }

    fn field(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::Age => "age",
            Column::Condition => "condition",
            Column::HeartRate => "heart_rate",
            Column::Temperature => "temperature",
            Column::HealthProblem => "health_problem",
            Column::TreatmentRequired => "treatment_required",
            Column::Medications => "medications",
            Column::DietPlan => "diet_plan",
        }
    }
}

/// One row of raw string cells, keyed by column
///
/// Unknown headers are dropped. JSON objects deserialize directly into a row;
/// numbers become their decimal text and `null` becomes an empty cell.
///
/// # Examples
///
/// ```
/// use caredesk::core::ingest::RawPatientRow;
///
/// let row: RawPatientRow =
///     serde_json::from_str(r#"{"Patient_ID": 7, "Name": "Ann", "Medical Condition": "Asthma"}"#)
///         .unwrap();
/// assert_eq!(row.id().unwrap().map(|id| id.get()), Some(7));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "HashMap<String, serde_json::Value>")]
pub struct RawPatientRow {
    cells: HashMap<Column, String>,
}

impl RawPatientRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell by header; returns `false` if the header is not recognised
    pub fn set(&mut self, header: &str, value: impl Into<String>) -> bool {
        match Column::from_header(header) {
            Some(column) => {
                self.cells.insert(column, value.into());
                true
            }
            None => false,
        }
    }

    /// Builder-style [`RawPatientRow::set`]
    pub fn with(mut self, header: &str, value: impl Into<String>) -> Self {
        self.set(header, value);
        self
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        self.cells.get(&column).map(String::as_str)
    }

    /// Cell contents as written, `None` if absent or empty
    fn text(&self, column: Column) -> Option<&str> {
        self.get(column).filter(|v| !v.is_empty())
    }

    /// Trimmed cell contents for numeric parsing, `None` if absent or blank
    fn number(&self, column: Column) -> Option<&str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }

    fn required_text(&self, column: Column) -> Result<String> {
        self.text(column)
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| CaredeskError::Validation(format!("{} is required", column.field())))
    }

    /// The row's patient id, if it carries one
    ///
    /// # Errors
    ///
    /// [`CaredeskError::MalformedInput`] if the id cell is not an integer.
    pub fn id(&self) -> Result<Option<PatientId>> {
        self.number(Column::Id).map(str::parse).transpose()
    }

    /// Convert to a draft for a new patient
    ///
    /// Name, age, condition and treatment must be present. A vitals column
    /// that is absent takes the default reading; one that is present but
    /// blank stays missing, so the draft is complete and is stored as given.
    pub fn to_draft(&self) -> Result<PatientDraft> {
        let draft = PatientDraft {
            name: self.required_text(Column::Name)?,
            age: self
                .parse::<u32>(Column::Age)?
                .ok_or_else(|| CaredeskError::Validation("age is required".to_string()))?,
            condition: self.required_text(Column::Condition)?,
            heart_rate: match self.get(Column::HeartRate) {
                Some(_) => self.parse(Column::HeartRate)?,
                None => Some(DEFAULT_HEART_RATE),
            },
            temperature: match self.get(Column::Temperature) {
                Some(_) => self.parse_temperature()?,
                None => Some(DEFAULT_TEMPERATURE),
            },
            health_problem: self.text(Column::HealthProblem).map(str::to_string),
            treatment_required: self.required_text(Column::TreatmentRequired)?,
            medications: self.text(Column::Medications).map(str::to_string),
            diet_plan: self.text(Column::DietPlan).map(str::to_string),
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Convert to an update of an existing patient
    ///
    /// Only columns present in the row are replaced; a blank cell clears a
    /// nullable field. Name and condition must still be non-blank.
    pub fn to_update(&self) -> Result<PatientUpdate> {
        let mut update = PatientUpdate::new()
            .name(self.required_text(Column::Name)?)
            .condition(self.required_text(Column::Condition)?);

        if self.get(Column::Age).is_some() {
            update.age = Some(
                self.parse::<u32>(Column::Age)?
                    .ok_or_else(|| CaredeskError::Validation("age is required".to_string()))?,
            );
        }
        if self.get(Column::HeartRate).is_some() {
            update.heart_rate = Some(self.parse(Column::HeartRate)?);
        }
        if self.get(Column::Temperature).is_some() {
            update.temperature = Some(self.parse_temperature()?);
        }
        if let Some(treatment) = self.get(Column::TreatmentRequired) {
            update.treatment_required = Some(treatment.to_string());
        }
        for (column, slot) in [
            (Column::HealthProblem, &mut update.health_problem),
            (Column::Medications, &mut update.medications),
            (Column::DietPlan, &mut update.diet_plan),
        ] {
            if self.get(column).is_some() {
                *slot = Some(self.text(column).map(str::to_string));
            }
        }

        update.validate()?;
        Ok(update)
    }

    fn parse<T: std::str::FromStr>(&self, column: Column) -> Result<Option<T>> {
        self.number(column)
            .map(|value| {
                value
                    .parse::<T>()
                    .map_err(|_| CaredeskError::malformed(column.field(), value))
            })
            .transpose()
    }

    fn parse_temperature(&self) -> Result<Option<f64>> {
        match self.parse::<f64>(Column::Temperature)? {
            Some(t) if !t.is_finite() => Err(CaredeskError::malformed(
                Column::Temperature.field(),
                t.to_string(),
            )),
            other => Ok(other),
        }
    }
}

impl From<HashMap<String, serde_json::Value>> for RawPatientRow {
    fn from(map: HashMap<String, serde_json::Value>) -> Self {
        let mut row = RawPatientRow::new();
        for (header, value) in map {
            let cell = match value {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            if !row.set(&header, cell) {
                tracing::debug!(header = %header, "Ignoring unknown column");
            }
        }
        row
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawPatientRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawPatientRow::new();
        for (header, value) in iter {
            row.set(header.as_ref(), value);
        }
        row
    }
}

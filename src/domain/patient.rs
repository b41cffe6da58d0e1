//! Patient domain model
//!
//! A [`Patient`] is a stored record. New records start life as a
//! [`PatientDraft`] (no id yet) and are changed through a [`PatientUpdate`]
//! that names only the fields being replaced.

use super::errors::CaredeskError;
use super::ids::PatientId;
use serde::{Deserialize, Serialize};

/// Heart rate recorded when a new patient is added without one
pub const DEFAULT_HEART_RATE: u32 = 80;

/// Body temperature in Celsius recorded when a new patient is added without one
pub const DEFAULT_TEMPERATURE: f64 = 37.0;

/// A stored patient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Store-assigned identifier
    pub id: PatientId,

    /// Patient name
    pub name: String,

    /// Age in years
    pub age: u32,

    /// Diagnosed condition; key into the recommendation table
    pub condition: String,

    /// Heart rate in beats per minute
    pub heart_rate: Option<u32>,

    /// Body temperature in Celsius
    pub temperature: Option<f64>,

    /// Free-text description of the presenting problem
    pub health_problem: Option<String>,

    /// Treatment the patient requires; never empty
    pub treatment_required: String,

    /// Prescribed medications
    pub medications: Option<String>,

    /// Diet plan
    pub diet_plan: Option<String>,
}

impl Patient {
    /// Creates a stored record from a draft and its assigned id
    ///
    /// Fields are taken as given; see [`PatientDraft::with_default_vitals`].
    pub fn from_draft(id: PatientId, draft: PatientDraft) -> Self {
        Self {
            id,
            name: draft.name,
            age: draft.age,
            condition: draft.condition,
            heart_rate: draft.heart_rate,
            temperature: draft.temperature,
            health_problem: non_empty(draft.health_problem),
            treatment_required: draft.treatment_required,
            medications: non_empty(draft.medications),
            diet_plan: non_empty(draft.diet_plan),
        }
    }

    /// Replaces the fields named by `update`, leaving the rest untouched
    pub fn apply(&mut self, update: &PatientUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(condition) = &update.condition {
            self.condition = condition.clone();
        }
        if let Some(heart_rate) = update.heart_rate {
            self.heart_rate = heart_rate;
        }
        if let Some(temperature) = update.temperature {
            self.temperature = temperature;
        }
        if let Some(health_problem) = &update.health_problem {
            self.health_problem = non_empty(health_problem.clone());
        }
        if let Some(treatment) = &update.treatment_required {
            self.treatment_required = treatment.clone();
        }
        if let Some(medications) = &update.medications {
            self.medications = non_empty(medications.clone());
        }
        if let Some(diet_plan) = &update.diet_plan {
            self.diet_plan = non_empty(diet_plan.clone());
        }
    }
}

/// A patient record that has not been stored yet
///
/// # Examples
///
/// ```
/// use caredesk::domain::PatientDraft;
///
/// let draft = PatientDraft::builder()
///     .name("Ann Smith")
///     .age(54)
///     .condition("Diabetes")
///     .treatment_required("Insulin review")
///     .build()
///     .unwrap();
/// assert!(draft.heart_rate.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatientDraft {
    pub name: String,
    pub age: u32,
    pub condition: String,
    #[serde(default)]
    pub heart_rate: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub health_problem: Option<String>,
    pub treatment_required: String,
    #[serde(default)]
    pub medications: Option<String>,
    #[serde(default)]
    pub diet_plan: Option<String>,
}

impl PatientDraft {
    /// Returns a builder for constructing a draft
    pub fn builder() -> PatientDraftBuilder {
        PatientDraftBuilder::default()
    }

    /// Fills omitted vitals with [`DEFAULT_HEART_RATE`] and
    /// [`DEFAULT_TEMPERATURE`]
    pub fn with_default_vitals(mut self) -> Self {
        self.heart_rate.get_or_insert(DEFAULT_HEART_RATE);
        self.temperature.get_or_insert(DEFAULT_TEMPERATURE);
        self
    }

    /// Checks the fields that must be present before a draft can be stored
    ///
    /// # Errors
    ///
    /// Returns [`CaredeskError::Validation`] if the name, condition or
    /// treatment is blank
    pub fn validate(&self) -> Result<(), CaredeskError> {
        require_text("name", &self.name)?;
        require_text("condition", &self.condition)?;
        require_treatment(&self.treatment_required)?;
        if let Some(temperature) = self.temperature {
            require_finite(temperature)?;
        }
        Ok(())
    }
}

/// Builder for [`PatientDraft`]
#[derive(Debug, Default)]
pub struct PatientDraftBuilder {
    name: Option<String>,
    age: Option<u32>,
    condition: Option<String>,
    heart_rate: Option<u32>,
    temperature: Option<f64>,
    health_problem: Option<String>,
    treatment_required: Option<String>,
    medications: Option<String>,
    diet_plan: Option<String>,
}

impl PatientDraftBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn heart_rate(mut self, heart_rate: u32) -> Self {
        self.heart_rate = Some(heart_rate);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn health_problem(mut self, health_problem: impl Into<String>) -> Self {
        self.health_problem = Some(health_problem.into());
        self
    }

    pub fn treatment_required(mut self, treatment: impl Into<String>) -> Self {
        self.treatment_required = Some(treatment.into());
        self
    }

    pub fn medications(mut self, medications: impl Into<String>) -> Self {
        self.medications = Some(medications.into());
        self
    }

    pub fn diet_plan(mut self, diet_plan: impl Into<String>) -> Self {
        self.diet_plan = Some(diet_plan.into());
        self
    }

    /// Builds the draft
    ///
    /// # Errors
    ///
    /// Returns a validation error if name, age, condition or treatment is
    /// missing, or if the treatment is blank
    pub fn build(self) -> Result<PatientDraft, CaredeskError> {
        let draft = PatientDraft {
            name: self.name.ok_or_else(|| missing("name"))?,
            age: self.age.ok_or_else(|| missing("age"))?,
            condition: self.condition.ok_or_else(|| missing("condition"))?,
            heart_rate: self.heart_rate,
            temperature: self.temperature,
            health_problem: self.health_problem,
            treatment_required: self
                .treatment_required
                .ok_or_else(|| missing("treatment_required"))?,
            medications: self.medications,
            diet_plan: self.diet_plan,
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// A partial change to a stored patient
///
/// Fields left as `None` are not touched. Nullable fields take an inner
/// `Option` so they can be cleared.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub condition: Option<String>,
    pub heart_rate: Option<Option<u32>>,
    pub temperature: Option<Option<f64>>,
    pub health_problem: Option<Option<String>>,
    pub treatment_required: Option<String>,
    pub medications: Option<Option<String>>,
    pub diet_plan: Option<Option<String>>,
}

impl PatientUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn heart_rate(mut self, heart_rate: Option<u32>) -> Self {
        self.heart_rate = Some(heart_rate);
        self
    }

    pub fn temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn health_problem(mut self, health_problem: Option<String>) -> Self {
        self.health_problem = Some(health_problem);
        self
    }

    pub fn treatment_required(mut self, treatment: impl Into<String>) -> Self {
        self.treatment_required = Some(treatment.into());
        self
    }

    pub fn medications(mut self, medications: Option<String>) -> Self {
        self.medications = Some(medications);
        self
    }

    pub fn diet_plan(mut self, diet_plan: Option<String>) -> Self {
        self.diet_plan = Some(diet_plan);
        self
    }

    /// True when the update names no fields at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the fields this update replaces, for logging
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.age.is_some() {
            fields.push("age");
        }
        if self.condition.is_some() {
            fields.push("condition");
        }
        if self.heart_rate.is_some() {
            fields.push("heart_rate");
        }
        if self.temperature.is_some() {
            fields.push("temperature");
        }
        if self.health_problem.is_some() {
            fields.push("health_problem");
        }
        if self.treatment_required.is_some() {
            fields.push("treatment_required");
        }
        if self.medications.is_some() {
            fields.push("medications");
        }
        if self.diet_plan.is_some() {
            fields.push("diet_plan");
        }
        fields
    }

    /// Checks that the update keeps the record well-formed
    ///
    /// # Errors
    ///
    /// Returns [`CaredeskError::Validation`] if the update blanks the name,
    /// condition or treatment
    pub fn validate(&self) -> Result<(), CaredeskError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(condition) = &self.condition {
            require_text("condition", condition)?;
        }
        if let Some(treatment) = &self.treatment_required {
            require_treatment(treatment)?;
        }
        if let Some(Some(temperature)) = self.temperature {
            require_finite(temperature)?;
        }
        Ok(())
    }
}

fn require_treatment(treatment: &str) -> Result<(), CaredeskError> {
    if treatment.trim().is_empty() {
        return Err(CaredeskError::Validation(
            "Treatment Required cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<(), CaredeskError> {
    if value.trim().is_empty() {
        return Err(CaredeskError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_finite(temperature: f64) -> Result<(), CaredeskError> {
    if !temperature.is_finite() {
        return Err(CaredeskError::malformed(
            "temperature",
            temperature.to_string(),
        ));
    }
    Ok(())
}

fn missing(field: &str) -> CaredeskError {
    CaredeskError::Validation(format!("{field} is required"))
}

// Empty free text is stored as NULL so exported blanks read back identically.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

//! Patient record commands

use super::{authenticated_session, print_patient, print_patient_table, AuthArgs};
use crate::domain::{PatientDraft, PatientId, PatientUpdate};
use clap::{Args, ValueEnum};

/// Arguments for the add-patient command
#[derive(Args, Debug)]
pub struct AddPatientArgs {
    #[command(flatten)]
    pub auth: AuthArgs,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub age: u32,

    #[arg(long)]
    pub condition: String,

    /// Treatment the patient requires
    #[arg(long)]
    pub treatment: String,

    /// Beats per minute (defaults to 80)
    #[arg(long)]
    pub heart_rate: Option<u32>,

    /// Celsius (defaults to 37.0)
    #[arg(long)]
    pub temperature: Option<f64>,

    #[arg(long)]
    pub health_problem: Option<String>,

    #[arg(long)]
    pub medications: Option<String>,

    #[arg(long)]
    pub diet_plan: Option<String>,
}

impl AddPatientArgs {
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let session = authenticated_session(config_path, &self.auth)?;

        let draft = PatientDraft {
            name: self.name.clone(),
            age: self.age,
            condition: self.condition.clone(),
            heart_rate: self.heart_rate,
            temperature: self.temperature,
            health_problem: self.health_problem.clone(),
            treatment_required: self.treatment.clone(),
            medications: self.medications.clone(),
            diet_plan: self.diet_plan.clone(),
        };
        let id = session.add_patient(draft)?;

        println!("Patient added with ID {id}");
        Ok(0)
    }
}

/// Nullable fields that update-patient can clear
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearableField {
    HeartRate,
    Temperature,
    HealthProblem,
    Medications,
    DietPlan,
}

/// Arguments for the update-patient command
#[derive(Args, Debug)]
pub struct UpdatePatientArgs {
    #[command(flatten)]
    pub auth: AuthArgs,

    /// Patient ID
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub age: Option<u32>,

    #[arg(long)]
    pub condition: Option<String>,

    #[arg(long)]
    pub treatment: Option<String>,

    #[arg(long)]
    pub heart_rate: Option<u32>,

    #[arg(long)]
    pub temperature: Option<f64>,

    #[arg(long)]
    pub health_problem: Option<String>,

    #[arg(long)]
    pub medications: Option<String>,

    #[arg(long)]
    pub diet_plan: Option<String>,

    /// Clear a field (repeatable)
    #[arg(long, value_enum)]
    pub clear: Vec<ClearableField>,
}

impl UpdatePatientArgs {
    fn to_update(&self) -> PatientUpdate {
        let mut update = PatientUpdate {
            name: self.name.clone(),
            age: self.age,
            condition: self.condition.clone(),
            treatment_required: self.treatment.clone(),
            heart_rate: self.heart_rate.map(Some),
            temperature: self.temperature.map(Some),
            health_problem: self.health_problem.clone().map(Some),
            medications: self.medications.clone().map(Some),
            diet_plan: self.diet_plan.clone().map(Some),
        };
        for field in &self.clear {
            match field {
                ClearableField::HeartRate => update.heart_rate = Some(None),
                ClearableField::Temperature => update.temperature = Some(None),
                ClearableField::HealthProblem => update.health_problem = Some(None),
                ClearableField::Medications => update.medications = Some(None),
                ClearableField::DietPlan => update.diet_plan = Some(None),
            }
        }
        update
    }

    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let update = self.to_update();
        if update.is_empty() {
            println!("Nothing to update");
            return Ok(4);
        }

        let session = authenticated_session(config_path, &self.auth)?;
        let patient = session.update_patient(PatientId::new(self.id), &update)?;

        println!("Patient {} updated", patient.id);
        print_patient(&patient);
        Ok(0)
    }
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub auth: AuthArgs,

    /// Patient ID
    pub id: i64,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowArgs {
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let session = authenticated_session(config_path, &self.auth)?;
        let guidance = session.patient_guidance(PatientId::new(self.id))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&guidance)?);
            return Ok(0);
        }

        print_patient(&guidance.patient);
        println!();
        println!("Recommended for {}:", guidance.patient.condition);
        println!("  Medications: {}", guidance.recommendation.medications.join(", "));
        println!("  Treatments:  {}", guidance.recommendation.treatments.join(", "));
        println!("  Diet:        {}", guidance.recommendation.diet.join(", "));
        Ok(0)
    }
}

/// How a search term is matched
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Integer terms match ids, anything else matches name fragments
    #[default]
    Any,
    /// Exact id
    Id,
    /// Exact name, ignoring case
    Name,
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub auth: AuthArgs,

    /// Search terms, run in order
    #[arg(required = true)]
    pub terms: Vec<String>,

    #[arg(long, value_enum, default_value_t = SearchMode::Any)]
    pub by: SearchMode,

    /// Print the recent-search log afterwards
    #[arg(long)]
    pub history: bool,
}

impl SearchArgs {
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut session = authenticated_session(config_path, &self.auth)?;

        for term in &self.terms {
            let results = match self.by {
                SearchMode::Any => session.search(term)?,
                SearchMode::Id => session.find_by_id(term)?.into_iter().collect(),
                SearchMode::Name => session.find_by_name(term)?.into_iter().collect(),
            };
            println!("Results for \"{term}\":");
            print_patient_table(&results);
            println!();
        }

        if self.history {
            println!("Recent searches:");
            for term in session.recent_searches() {
                println!("  {term}");
            }
        }
        Ok(0)
    }
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub auth: AuthArgs,
}

impl ListArgs {
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let session = authenticated_session(config_path, &self.auth)?;
        print_patient_table(&session.list_patients()?);
        Ok(0)
    }
}

//! Condition-specific medication, treatment and diet guidance

pub mod table;

pub use table::{Recommendation, RecommendationTable, NO_DIET, NO_MEDICATION, NO_TREATMENT};

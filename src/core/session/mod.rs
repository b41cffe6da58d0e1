//! Caretaker sessions and the recent-search log

pub mod facade;
pub mod history;

pub use facade::{PatientGuidance, Session, SessionState};
pub use history::SearchHistory;

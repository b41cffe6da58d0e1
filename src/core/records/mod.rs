//! Patient record storage rules and search

pub mod store;

pub use store::PatientStore;

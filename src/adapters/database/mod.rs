//! Storage abstraction layer
//!
//! Trait-based seams between the core stores and the database backend.

pub mod factory;
pub mod traits;

pub use factory::create_storage;
pub use traits::{PatientStorage, UserStorage};

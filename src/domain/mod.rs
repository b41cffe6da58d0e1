//! Domain models and types for Caredesk.
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`Username`])
//! - **Domain models** ([`Patient`], [`PatientDraft`], [`PatientUpdate`], [`User`], [`Role`])
//! - **Error types** ([`CaredeskError`])
//! - **Result type alias** ([`Result`])
//!
//! # Builder Pattern
//!
//! New patient records are assembled with a builder and validated on build:
//!
//! ```rust
//! use caredesk::domain::PatientDraft;
//!
//! # fn example() -> caredesk::domain::Result<()> {
//! let draft = PatientDraft::builder()
//!     .name("Ann Smith")
//!     .age(54)
//!     .condition("Hypertension")
//!     .treatment_required("Blood pressure monitoring")
//!     .medications("Amlodipine")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod patient;
pub mod result;
pub mod user;

pub use errors::CaredeskError;
pub use ids::{PatientId, Username};
pub use patient::{
    Patient, PatientDraft, PatientDraftBuilder, PatientUpdate, DEFAULT_HEART_RATE,
    DEFAULT_TEMPERATURE,
};
pub use result::Result;
pub use user::{Role, User};

//! Core business logic for Caredesk.
//!
//! # Modules
//!
//! - [`credentials`] - Password hashing, registration and login verification
//! - [`recommendations`] - Static condition → guidance table
//! - [`records`] - Patient record store and search
//! - [`ingest`] - Batch import of raw rows and fixed-shape export
//! - [`session`] - Session façade and recent-search log
//!
//! # Example
//!
//! ```rust,no_run
//! use caredesk::config::{load_config, secret_string};
//! use caredesk::core::session::Session;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("caredesk.toml")?;
//! let mut session = Session::open(&config)?;
//!
//! session.login("doctor1", &secret_string("password123"))?;
//! for patient in session.search("ann")? {
//!     let guidance = session.recommendations(&patient.condition);
//!     println!("{}: {:?}", patient.name, guidance.medications);
//! }
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod ingest;
pub mod recommendations;
pub mod records;
pub mod session;

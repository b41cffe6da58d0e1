// Caredesk - Clinical Front-Desk Patient Records
// Copyright (c) 2025 Caredesk Contributors
// Licensed under the MIT License

//! # Caredesk - Clinical Front-Desk Patient Records
//!
//! Caredesk stores patient records for a small clinic front desk,
//! authenticates caretakers and serves static medication, treatment and diet
//! guidance per condition.
//!
//! ## Architecture
//!
//! Caredesk follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (credentials, records, recommendations, ingest, session)
//! - [`adapters`] - Storage traits and the SQLite backend
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use caredesk::config::{load_config, secret_string};
//! use caredesk::core::session::Session;
//! use caredesk::domain::PatientDraft;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("caredesk.toml")?;
//!     let mut session = Session::open(&config)?;
//!     session.login("doctor1", &secret_string("password123"))?;
//!
//!     let draft = PatientDraft::builder()
//!         .name("Ann Smith")
//!         .age(54)
//!         .condition("Diabetes")
//!         .treatment_required("Insulin review")
//!         .build()?;
//!     let id = session.add_patient(draft)?;
//!
//!     let guidance = session.patient_guidance(id)?;
//!     println!("{:?}", guidance.recommendation.medications);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], whose error type is
//! [`domain::CaredeskError`]. None of the variants is fatal; callers can
//! report the problem and retry.
//!
//! ## Logging
//!
//! Caredesk emits structured `tracing` events. Session operations run inside
//! a span carrying the session's UUID. Passwords and hashes are never logged.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

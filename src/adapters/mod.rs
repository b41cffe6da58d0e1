//! Storage adapters for Caredesk.
//!
//! - [`database`] - Storage traits and the factory that opens a backend
//! - [`sqlite`] - SQLite implementation with embedded schema migrations
//!
//! The core only sees the traits in [`database`], so the SQLite backend can
//! be swapped for another implementation without touching business logic.

pub mod database;
pub mod sqlite;

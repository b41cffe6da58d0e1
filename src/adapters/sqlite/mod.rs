//! SQLite storage backend
//!
//! A single SQLite file holds the `users` and `patients` tables. The
//! connection sits behind a mutex, so only one operation touches the
//! database at a time.

pub mod client;
mod patients;
mod users;

pub use client::SqliteStorage;

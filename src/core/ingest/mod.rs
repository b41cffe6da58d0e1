//! Tabular import and export
//!
//! Rows arrive as header → cell maps from an external reader (JSON here;
//! spreadsheet readers live outside the crate) and leave as [`ExportRow`]s
//! with fixed column headers.

pub mod batch;
pub mod export;
pub mod row;

pub use batch::{ingest_rows, IngestReport, RowFailure};
pub use export::{export_rows, ExportRow};
pub use row::{Column, RawPatientRow};

//! Batch ingestion of raw rows into the patient store

use super::row::RawPatientRow;
use crate::core::records::PatientStore;
use crate::domain::{CaredeskError, Result};
use crate::log_ingest_progress;
use serde::Serialize;

const PROGRESS_EVERY: usize = 100;

/// A row that was skipped, with its zero-based position in the batch
#[derive(Debug, Clone, Serialize)]
pub struct RowFailure {
    pub row: usize,
    pub error: String,
}

/// Outcome of a batch ingest
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    /// Rows stored as new patients
    pub added: usize,

    /// Rows applied to existing patients
    pub updated: usize,

    /// Rows that failed validation or parsing
    pub skipped: Vec<RowFailure>,
}

impl IngestReport {
    pub fn total(&self) -> usize {
        self.added + self.updated + self.skipped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn log_summary(&self) {
        tracing::info!(
            added = self.added,
            updated = self.updated,
            skipped = self.skipped.len(),
            "Ingest completed"
        );
        for failure in &self.skipped {
            tracing::warn!(row = failure.row, error = %failure.error, "Row skipped");
        }
    }
}

enum Applied {
    Added,
    Updated,
}

/// Ingest rows one at a time
///
/// A row whose id names an existing patient updates that patient; any other
/// row is added under a newly assigned id, exactly as its cells describe it. Rows that fail validation or
/// parsing are recorded in the report and do not stop the batch.
///
/// # Errors
///
/// Storage failures abort the batch; rows already applied stay applied.
pub fn ingest_rows(store: &PatientStore, rows: &[RawPatientRow]) -> Result<IngestReport> {
    let mut report = IngestReport::default();
    let total = rows.len();

    for (index, row) in rows.iter().enumerate() {
        match apply_row(store, row) {
            Ok(Applied::Added) => report.added += 1,
            Ok(Applied::Updated) => report.updated += 1,
            Err(err @ (CaredeskError::Validation(_) | CaredeskError::MalformedInput { .. })) => {
                report.skipped.push(RowFailure {
                    row: index,
                    error: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
        log_ingest_progress!(index + 1, total, PROGRESS_EVERY);
    }

    report.log_summary();
    Ok(report)
}

fn apply_row(store: &PatientStore, row: &RawPatientRow) -> Result<Applied> {
    if let Some(id) = row.id()? {
        if store.get(id)?.is_some() {
            store.update(id, &row.to_update()?)?;
            return Ok(Applied::Updated);
        }
    }

    store.restore(row.to_draft()?)?;
    Ok(Applied::Added)
}

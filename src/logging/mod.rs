//! Logging and observability
//!
//! Structured logging with `tracing`: console output, optional JSON files with
//! rotation, and a couple of helper macros for recurring events. Passwords and
//! password hashes never appear in log fields.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use caredesk::log_error_with_context;
/// use caredesk::domain::CaredeskError;
///
/// let error = CaredeskError::NotFound("patient 9".to_string());
/// log_error_with_context!(&error, "Failed to update patient");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log ingest progress every `$every` rows
///
/// # Example
///
/// ```no_run
/// use caredesk::log_ingest_progress;
///
/// log_ingest_progress!(100, 1000, 100);
/// ```
#[macro_export]
macro_rules! log_ingest_progress {
    ($current:expr, $total:expr, $every:expr) => {
        let (current, total, every) = ($current, $total, $every);
        if current > 0 && current % every == 0 {
            tracing::debug!(
                current = current,
                total = total,
                progress_pct = (current as f64 / total as f64 * 100.0),
                "Ingesting rows"
            );
        }
    };
}

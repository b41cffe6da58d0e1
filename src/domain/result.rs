//! Result type alias for Caredesk

use super::errors::CaredeskError;

/// Result type alias for Caredesk operations
///
/// # Examples
///
/// ```
/// use caredesk::domain::result::Result;
/// use caredesk::domain::errors::CaredeskError;
///
/// fn failing_function() -> Result<()> {
///     Err(CaredeskError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CaredeskError>;

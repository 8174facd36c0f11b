//! Result type alias for Anonymify

use super::errors::AnonymifyError;

/// Result type alias for Anonymify operations
///
/// # Examples
///
/// ```
/// use anonymify::domain::result::Result;
/// use anonymify::domain::errors::AnonymifyError;
///
/// fn failing_function() -> Result<()> {
///     Err(AnonymifyError::Configuration("Invalid input".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, AnonymifyError>;

//! Result type alias for Lux Export
//!
//! This module provides a convenient Result type alias that uses LuxError
//! as the error type.

use super::errors::LuxError;

/// Result type alias for Lux Export operations
///
/// # Examples
///
/// ```
/// use lux_export::domain::result::Result;
/// use lux_export::domain::errors::LuxError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(LuxError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, LuxError>;

//! Result type alias for Glossa
//!
//! This module provides a convenient Result type alias that uses GlossaError
//! as the error type.

use super::errors::GlossaError;

/// Result type alias for Glossa operations
///
/// # Examples
///
/// ```
/// use glossa::domain::result::Result;
/// use glossa::domain::errors::GlossaError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(GlossaError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, GlossaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(GlossaError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}

//! Error types for the ACA engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while estimating penalties or
//! testing affordability.

use thiserror::Error;

/// The main error type for the ACA engine.
///
/// All fallible operations in the engine return this error type. Every
/// variant is recoverable by the caller: fix the input, pick a supported
/// year, or supply the missing compensation data.
///
/// # Example
///
/// ```
/// use aca_engine::error::EngineError;
///
/// let error = EngineError::UnsupportedTaxYear { year: 2019 };
/// assert_eq!(error.to_string(), "Unsupported tax year: 2019");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate table entry exists for the requested tax or plan year.
    #[error("Unsupported tax year: {year}")]
    UnsupportedTaxYear {
        /// The year that has no rate table entry.
        year: i32,
    },

    /// An input value was negative, out of range, or inconsistent with
    /// another input.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An employee record lacks the data a safe harbor method needs.
    #[error("Employee '{employee_id}' has no {field} for the {method} safe harbor")]
    InsufficientData {
        /// The employee whose record is incomplete.
        employee_id: String,
        /// The safe harbor method that was requested.
        method: String,
        /// The missing field.
        field: String,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/regulation.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/regulation.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/tax_years/2025.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/tax_years/2025.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_unsupported_tax_year_displays_year() {
        let error = EngineError::UnsupportedTaxYear { year: 2031 };
        assert_eq!(error.to_string(), "Unsupported tax year: 2031");
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("total_fte", "must not be negative");
        assert_eq!(
            error.to_string(),
            "Invalid input 'total_fte': must not be negative"
        );
    }

    #[test]
    fn test_insufficient_data_displays_employee_method_and_field() {
        let error = EngineError::InsufficientData {
            employee_id: "E001".to_string(),
            method: "w2".to_string(),
            field: "w2_box1_wages".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Employee 'E001' has no w2_box1_wages for the w2 safe harbor"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_unsupported_year() -> EngineResult<()> {
            Err(EngineError::UnsupportedTaxYear { year: 1999 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_unsupported_year()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::UnsupportedTaxYear { year: 1999 })
        ));
    }
}

//! Error types for the payroll engine.
//!
//! The calculation functions report two failures: an inverted pay period and
//! arithmetic overflow on absurd inputs. Everything else here belongs to the
//! boundary (configuration loading and request validation).

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/defaults.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/defaults.yaml");
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

    /// A pay period whose start falls after its end.
    #[error("Invalid pay period: start {start_date} is after end {end_date}")]
    InvalidPeriod {
        /// The first day of the rejected window.
        start_date: NaiveDate,
        /// The last day of the rejected window.
        end_date: NaiveDate,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A sale was rejected at the boundary.
    #[error("Invalid sale '{sale_id}': {message}")]
    InvalidSale {
        /// The ID of the invalid sale.
        sale_id: String,
        /// A description of what made the sale invalid.
        message: String,
    },

    /// A wage setting was out of range.
    #[error("Invalid wage setting '{field}': {message}")]
    InvalidSettings {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// A [`EngineError::CalculationError`] for a figure too large to represent.
    pub fn overflow(quantity: &str) -> Self {
        EngineError::CalculationError {
            message: format!("{} overflowed", quantity),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

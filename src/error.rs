//! Error types for the TJM engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine and its surrounding layers can report.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the TJM engine.
///
/// # Example
///
/// ```
/// use tjm_engine::error::EngineError;
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

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A time-allocation or tax parameter was outside its allowed range.
    #[error("Invalid parameter '{field}': {message}")]
    InvalidParameter {
        /// The parameter that was invalid.
        field: String,
        /// A description of what made the parameter invalid.
        message: String,
    },

    /// The combined tax and charge percentages leave no net revenue.
    #[error("Combined tax rate {combined_percent}% must be below 100%")]
    TaxRateOutOfRange {
        /// Sum of income tax, social charges and other taxes, in percent.
        combined_percent: Decimal,
    },

    /// The result cache could not be read from or written to disk.
    #[error("Result cache I/O error on '{path}': {message}")]
    CacheIo {
        /// The cache file path.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

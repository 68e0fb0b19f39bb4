//! Error types for the money-funnel engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition the engine refuses to compute through.

use thiserror::Error;

/// The main error type for the money-funnel engine.
///
/// Both calculators report amounts that leave the decimal range and
/// rejected parameters through this type, as do configuration loading,
/// payment links and settings storage.
///
/// # Example
///
/// ```
/// use fickpengar::error::EngineError;
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

    /// A parameter set cannot be calculated with (e.g. zero billable hours).
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfiguration {
        /// The parameter that was rejected.
        field: String,
        /// Why the parameter was rejected.
        message: String,
    },

    /// The chore is not part of any tier in the catalog.
    #[error("Chore not found: {name}")]
    ChoreNotFound {
        /// The chore name that was looked up.
        name: String,
    },

    /// An intermediate amount does not fit in a decimal.
    #[error("Amount out of range while computing {step}")]
    AmountOutOfRange {
        /// The funnel step that overflowed.
        step: String,
    },

    /// A payment link could not be built.
    #[error("Invalid payment request: {message}")]
    InvalidPaymentRequest {
        /// A description of the unmet precondition.
        message: String,
    },

    /// Stored settings could not be written.
    #[error("Failed to store settings at '{path}': {message}")]
    Persistence {
        /// The settings file path.
        path: String,
        /// A description of the I/O or encoding failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

//! Error types for the oncoqueue triage pipeline.
//!
//! All fallible operations return `OncoResult<T>`. Some variants are
//! absorbed inside the resolver (coercion, date parsing, stage parsing) and
//! only surface from the low-level helpers; the rest reach the caller.

use thiserror::Error;

/// The unified error type for the oncoqueue crates.
#[derive(Debug, Error)]
pub enum OncoError {
    /// A required intake field is absent or empty.
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// An intake field is present but cannot be read as the expected type.
    #[error("invalid value for field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// The advisor could not be reached or refused to answer.
    #[error("advisor unavailable: {reason}")]
    AdvisorUnavailable { reason: String },

    /// The advisor answered, but the response did not have the expected shape.
    #[error("malformed advisor response: {reason}")]
    MalformedSuggestion { reason: String },

    /// A suggested priority could not be coerced to an integer.
    #[error("priority coercion failed: {reason}")]
    PriorityCoercion { reason: String },

    /// A suggested appointment date is malformed or already in the past.
    #[error("appointment date rejected: {reason}")]
    DateParse { reason: String },

    /// The cancer stage text carries no stage digit.
    #[error("cancer stage '{stage}' has no stage digit")]
    MalformedStage { stage: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The treatment queue could not record an admission.
    #[error("queue write failed: {reason}")]
    QueueWriteFailed { reason: String },
}

/// Convenience alias used throughout the oncoqueue crates.
pub type OncoResult<T> = Result<T, OncoError>;

//! Error types for configuration loading.

use thiserror::Error;

use crate::ValidationError;

/// Errors that can occur while loading or checking an [`IndexConfig`](crate::IndexConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The tables failed validation.
    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    /// The preamble separator pattern is not a valid regular expression.
    #[error("invalid preamble pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A key pattern was bound twice while building the tokenizer.
    #[error("duplicate key pattern: {0}")]
    DuplicatePattern(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

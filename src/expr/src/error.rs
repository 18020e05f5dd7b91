//! Error types for the fieldscope crate

use thiserror::Error;

use crate::expr::ParseError;

/// Errors raised outside expression evaluation
#[derive(Debug, Error)]
pub enum FieldscopeError {
    /// Scope expression could not be parsed
    #[error("Invalid scope expression: {0}")]
    Parse(#[from] ParseError),

    /// Field is not declared in the registry
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Field declared twice
    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    /// Invalid field declaration
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Malformed scope document
    #[error("Invalid scope document: {0}")]
    Document(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fieldscope operations
pub type Result<T> = std::result::Result<T, FieldscopeError>;

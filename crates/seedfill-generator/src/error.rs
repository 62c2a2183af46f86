//! Error types for randomizer construction and population.

use seedfill_core::SchemaError;
use thiserror::Error;

/// Why a generator could not be constructed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    /// No constructor is registered under the requested name.
    #[error("no generator registered under '{0}'")]
    NotRegistered(String),

    /// Range bounds are inverted.
    #[error("invalid range: min {min} exceeds max {max}")]
    InvalidRange { min: String, max: String },

    /// Generator metadata is malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The constructor itself reported a failure.
    #[error("constructor failed: {0}")]
    Failed(String),
}

impl ConstructionError {
    /// Constructor failure with a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Malformed configuration with a message.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Error type for population operations.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Type not found in schema
    #[error("Type not found: {0}")]
    TypeNotFound(String),

    /// Schema error
    #[error("Schema error: {0}")]
    SchemaError(#[from] SchemaError),
}

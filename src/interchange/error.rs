//! Interchange error types.

use crate::lower::LowerError;
use thiserror::Error;

/// Errors that can occur while reading, lowering or writing JSON trees
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// Input did not match the expected tree shape
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Output could not be rendered
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The machine was read but could not be lowered
    #[error(transparent)]
    Lower(#[from] LowerError),
}

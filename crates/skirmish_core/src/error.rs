//! Error types for the combat core.
//!
//! Only hard failures live here. Rejected player actions are reported as
//! data (see [`crate::actions::ActionOutcome`]), never as errors.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Top-level error type for the combat core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration text could not be parsed.
    #[error("Failed to parse battle config: {0}")]
    ConfigParse(String),

    /// Session state failed to serialize.
    #[error("Failed to serialize session: {0}")]
    Serialize(String),

    /// Persisted session state failed to deserialize.
    #[error("Failed to deserialize session: {0}")]
    Deserialize(String),
}

//! Error types for scrollmark_core

use thiserror::Error;

/// Errors surfaced by the anchor controller
///
/// Degraded tree or viewport states are never errors; they resolve to
/// no-ops. Only caller-supplied input that cannot be used lands here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrollmarkError {
    /// Text-instance search pattern failed to compile
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    /// Configuration could not be parsed or is inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<regex::Error> for ScrollmarkError {
    fn from(err: regex::Error) -> Self {
        ScrollmarkError::InvalidPattern(err.to_string())
    }
}

impl From<toml::de::Error> for ScrollmarkError {
    fn from(err: toml::de::Error) -> Self {
        ScrollmarkError::Config(err.to_string())
    }
}

/// Result type for scrollmark_core operations
pub type Result<T> = std::result::Result<T, ScrollmarkError>;

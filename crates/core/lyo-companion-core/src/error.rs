//! Error types for the companion core
//!
//! State transitions are total and never fail. Only the seams to the outside
//! world (text generation, persistence, configuration) produce errors.

use thiserror::Error;

/// Main error type for companion operations
#[derive(Debug, Error)]
pub enum CompanionError {
    /// Text generation service failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// Generation call exceeded its deadline
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Persistence collaborator failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type using CompanionError
pub type Result<T> = std::result::Result<T, CompanionError>;

impl CompanionError {
    /// Create a generation error
    pub fn generation(msg: impl Into<String>) -> Self {
        CompanionError::Generation(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        CompanionError::Timeout(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        CompanionError::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        CompanionError::NotFound(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        CompanionError::Config(msg.into())
    }

    /// Whether retrying the same call could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CompanionError::Generation(_) | CompanionError::Timeout(_) | CompanionError::Io(_)
        )
    }
}

//! Error Handling
//!
//! Unified error types for the memory engine.
//! Uses thiserror for ergonomic error definitions.
//!
//! Public operations are total over malformed input (unknown kinds fall back
//! to generic handling, absent lookups return `None`), so this type is
//! reserved for the genuinely failing cases: invalid heuristic configuration
//! and an unavailable store (poisoned lock).

use thiserror::Error;

/// Engine-wide error type
#[derive(Error, Debug)]
pub enum MemoryError {
    /// Configuration errors (e.g. an invalid heuristic pattern)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store unavailable (lock poisoned by a panicking writer)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for engine errors
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an unavailable-store error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

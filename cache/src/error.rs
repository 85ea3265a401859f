//! Cache error types.

use thiserror::Error;

/// Errors raised by a cache collaborator.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The payload does not have the shape the operation requires.
    #[error("invalid payload: {message}")]
    InvalidPayload { message: String },

    /// The underlying storage engine failed.
    #[error("cache backend error: {message}")]
    Backend { message: String },
}

impl CacheError {
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

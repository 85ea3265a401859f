//! Registry error types.

use strata_cache::CacheError;
use strata_core::CallbackError;
use thiserror::Error;

/// Initializer errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No initializer set was supplied.
    #[error("no initializers were supplied")]
    MissingInitializers,

    /// An initializer returned an error. The field stays marked as fired.
    #[error("initializer for field {field} failed: {source}")]
    Initializer {
        field: String,
        source: CallbackError,
    },

    /// Writing an initializer value failed.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

impl RegistryError {
    pub fn initializer(field: impl Into<String>, source: CallbackError) -> Self {
        Self::Initializer {
            field: field.into(),
            source,
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

//! Store error types.

use strata_cache::CacheError;
use strata_mutation::MutationError;
use strata_registry::RegistryError;
use thiserror::Error;

/// Errors surfaced by the data store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The cache collaborator failed.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Applying a mutation failed.
    #[error("mutation error: {0}")]
    Mutation(#[from] MutationError),

    /// Running initializers failed.
    #[error("initializer error: {0}")]
    Registry(#[from] RegistryError),
}

impl StoreError {
    /// Returns true if the caller forgot to supply initializers.
    pub fn is_missing_initializers(&self) -> bool {
        matches!(self, StoreError::Registry(RegistryError::MissingInitializers))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

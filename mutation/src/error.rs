//! Mutation error types.

use strata_cache::CacheError;
use thiserror::Error;

use crate::record::MutationId;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors that can occur while applying a mutation.
///
/// Callback failures never show up here; they go to the failure sink.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("optimistic transaction for mutation {mutation_id} failed: {source}")]
    Optimistic {
        mutation_id: MutationId,
        source: CacheError,
    },
}

impl MutationError {
    pub fn optimistic(mutation_id: &MutationId, source: CacheError) -> Self {
        Self::Optimistic {
            mutation_id: mutation_id.clone(),
            source,
        }
    }
}

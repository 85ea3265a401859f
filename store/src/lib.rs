//! Strata Store
//!
//! The write side of a client-side query cache: every operation result an
//! application receives passes through a `DataStore` on its way into the
//! cache.
//!
//! Responsibilities:
//! - Write query and subscription results, honoring error policies
//! - Drive mutations through optimistic apply, commit and cleanup
//! - Seed local fields from one-shot initializers
//! - Reset the cache together with the initializer bookkeeping
//!
//! # Module Structure
//!
//! - `store` - DataStore, the façade over cache, mutations and initializers
//! - `writer` - Result writing for queries, subscriptions and local updates
//! - `error` - Error types for store operations

mod error;
mod store;
mod writer;

pub use error::{StoreError, StoreResult};
pub use store::DataStore;
pub use writer::{mark_query_result, mark_subscription_result, mark_update_query_result};

pub use strata_cache::{Cache, CacheError, CacheResult, DataProxy, DiffQuery, DiffResult, InMemoryCache};
pub use strata_core::{CallbackError, Document, ExecutionResult, GraphQlError, RootId, Variables};
pub use strata_mutation::{
    CallbackFailure, CommitStatus, CommitSummary, FailureSink, LogSink, MutationId,
    MutationRecord, MutationState, OptimisticResponse, QueryWithUpdater, UpdaterContext,
};
pub use strata_registry::{
    async_initializer, sync_initializer, AsyncInitializer, InitializerSet, Initializers,
    SyncInitializer,
};

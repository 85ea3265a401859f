//! The DataStore façade.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;
use strata_cache::{Cache, CacheResult};
use strata_core::{Document, ExecutionResult, Variables};
use strata_mutation::{
    CommitSummary, FailureSink, LogSink, MutationId, MutationLifecycle, MutationRecord,
    MutationState, OptimisticResponse,
};
use strata_registry::{
    AsyncInitializer, InitializerRegistry, InitializerSet, SyncInitializer,
};

use crate::error::StoreResult;
use crate::writer;

/// Single entry point for writing operation results into a cache.
///
/// The store owns its cache and forwards every write to it. It keeps only
/// the bookkeeping the cache cannot: in-flight mutation states and the set
/// of fired initializers.
pub struct DataStore<C: Cache> {
    /// The wrapped cache.
    cache: C,
    /// Mutation state machine.
    mutations: MutationLifecycle,
    /// Fired-field bookkeeping for initializers.
    initializers: InitializerRegistry,
}

impl<C: Cache> DataStore<C> {
    /// Wrap a cache. Callback failures are logged.
    pub fn new(cache: C) -> Self {
        Self::with_sink(cache, Arc::new(LogSink))
    }

    /// Wrap a cache, reporting callback failures to `sink`.
    pub fn with_sink(cache: C, sink: Arc<dyn FailureSink>) -> Self {
        Self {
            cache,
            mutations: MutationLifecycle::new(sink),
            initializers: InitializerRegistry::new(),
        }
    }

    /// Get the wrapped cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Get a mutable reference to the wrapped cache.
    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }

    /// Unwrap the store, returning the cache.
    pub fn into_cache(self) -> C {
        self.cache
    }

    // ==================== Queries and subscriptions ====================

    /// Write a query result. Returns whether anything was written.
    pub fn mark_query_result(
        &mut self,
        result: &ExecutionResult,
        document: &Document,
        variables: &Variables,
        fetch_more_for_query_id: Option<&str>,
        ignore_errors: bool,
    ) -> StoreResult<bool> {
        Ok(writer::mark_query_result(
            &mut self.cache,
            result,
            document,
            variables,
            fetch_more_for_query_id,
            ignore_errors,
        )?)
    }

    /// Write a subscription result. Returns whether anything was written.
    pub fn mark_subscription_result(
        &mut self,
        result: &ExecutionResult,
        document: &Document,
        variables: &Variables,
    ) -> StoreResult<bool> {
        Ok(writer::mark_subscription_result(
            &mut self.cache,
            result,
            document,
            variables,
        )?)
    }

    /// Overwrite a query's cached result with one computed by the caller.
    pub fn mark_update_query_result(
        &mut self,
        document: &Document,
        variables: &Variables,
        new_result: Value,
    ) -> StoreResult<()> {
        Ok(writer::mark_update_query_result(
            &mut self.cache,
            document,
            variables,
            new_result,
        )?)
    }

    // ==================== Mutations ====================

    /// Start a mutation, recording its optimistic overlay if it has one.
    pub fn mark_mutation_init(&mut self, mutation: &MutationRecord) -> StoreResult<MutationState> {
        Ok(self.mutations.init(&mut self.cache, mutation)?)
    }

    /// Commit a mutation's real result.
    pub fn mark_mutation_result(
        &mut self,
        mutation: &MutationRecord,
        result: &ExecutionResult,
    ) -> StoreResult<CommitSummary> {
        Ok(self.mutations.result(&mut self.cache, mutation, result)?)
    }

    /// Finish a mutation, retracting its overlay if it had one.
    pub fn mark_mutation_complete(
        &mut self,
        mutation_id: &MutationId,
        optimistic_response: Option<&OptimisticResponse>,
    ) -> StoreResult<MutationState> {
        Ok(self
            .mutations
            .complete(&mut self.cache, mutation_id, optimistic_response)?)
    }

    /// State of an in-flight mutation, `None` once completed or never seen.
    pub fn mutation_state(&self, mutation_id: &MutationId) -> Option<MutationState> {
        self.mutations.state(mutation_id)
    }

    // ==================== Initializers ====================

    /// Run asynchronous initializers that have not fired yet.
    pub async fn initialize<Ctx>(
        &mut self,
        initializers: Option<InitializerSet<AsyncInitializer<Ctx>>>,
        context: &Ctx,
    ) -> StoreResult<()> {
        self.initializers
            .initialize(&mut self.cache, initializers, context)
            .await?;
        Ok(())
    }

    /// Run synchronous initializers that have not fired yet.
    pub fn initialize_sync<Ctx>(
        &mut self,
        initializers: Option<InitializerSet<SyncInitializer<Ctx>>>,
        context: &Ctx,
    ) -> StoreResult<()> {
        self.initializers
            .initialize_sync(&mut self.cache, initializers, context)?;
        Ok(())
    }

    /// Fields whose initializers have fired since the last reset, sorted.
    pub fn fired_initializers(&self) -> Vec<&str> {
        self.initializers.fired()
    }

    /// Forget fired initializers and reset the cache.
    ///
    /// The fired set is cleared before the returned future is polled. In-flight
    /// mutation states are kept.
    pub fn reset(&mut self) -> BoxFuture<'static, CacheResult<()>> {
        self.initializers.reset();
        self.cache.reset()
    }
}

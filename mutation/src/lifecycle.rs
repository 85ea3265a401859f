//! Mutation lifecycle - optimistic apply, commit, cleanup.
//!
//! ```text
//! Idle ──init (optimistic)──► OptimisticApplied
//!  │                                │
//!  └──────────── result ────────────┴──► Committed ──complete──► Completed
//! ```
//!
//! The commit step is shared by the optimistic and the real phase. It always
//! acts on the handle it is given, so during `init` it writes into the
//! overlay the cache hands out and never touches the base state.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use strata_cache::{Cache, CacheResult, DiffQuery};
use strata_core::{CallbackError, DataWrite, ExecutionResult, RootId};
use tracing::debug;

use crate::error::{MutationError, MutationResult};
use crate::record::{MutationId, MutationRecord, OptimisticResponse, UpdaterContext};
use crate::result::{CommitSummary, MutationState};
use crate::sink::{CallbackFailure, FailureSink};

/// Applies mutations to a cache and tracks each in-flight mutation's state.
///
/// Only one optimistic transaction may be open at a time; `init` runs to
/// completion before returning, so sequential callers are always safe.
pub struct MutationLifecycle {
    sink: Arc<dyn FailureSink>,
    states: HashMap<MutationId, MutationState>,
}

impl MutationLifecycle {
    /// Create a lifecycle reporting callback failures to `sink`.
    pub fn new(sink: Arc<dyn FailureSink>) -> Self {
        Self {
            sink,
            states: HashMap::new(),
        }
    }

    /// Current state of an in-flight mutation.
    pub fn state(&self, id: &MutationId) -> Option<MutationState> {
        self.states.get(id).copied()
    }

    /// Number of mutations initialized but not yet completed.
    pub fn in_flight(&self) -> usize {
        self.states.len()
    }

    /// Start a mutation. With an optimistic response, the full commit logic
    /// runs against an overlay recorded under the mutation id.
    pub fn init(
        &mut self,
        cache: &mut dyn Cache,
        mutation: &MutationRecord,
    ) -> MutationResult<MutationState> {
        let Some(optimistic) = &mutation.optimistic_response else {
            self.states.insert(mutation.id.clone(), MutationState::Idle);
            return Ok(MutationState::Idle);
        };

        let payload = ExecutionResult::from_data(optimistic.resolve(&mutation.variables));
        let sink = self.sink.as_ref();
        let mut summary = None;
        cache
            .record_optimistic_transaction(mutation.id.as_str(), &mut |overlay| {
                summary = Some(commit(overlay, mutation, &payload, sink)?);
                Ok(())
            })
            .map_err(|source| MutationError::optimistic(&mutation.id, source))?;

        debug!(mutation_id = %mutation.id, ?summary, "applied optimistic response");
        self.states
            .insert(mutation.id.clone(), MutationState::OptimisticApplied);
        Ok(MutationState::OptimisticApplied)
    }

    /// Commit the real result. A result carrying errors writes nothing and
    /// runs no callbacks.
    pub fn result(
        &mut self,
        cache: &mut dyn Cache,
        mutation: &MutationRecord,
        result: &ExecutionResult,
    ) -> MutationResult<CommitSummary> {
        let summary = commit(cache, mutation, result, self.sink.as_ref())?;
        if summary.is_committed() {
            self.states
                .insert(mutation.id.clone(), MutationState::Committed);
        }
        Ok(summary)
    }

    /// Finish a mutation. Retracts the optimistic overlay if one was
    /// supplied; committed writes stay.
    pub fn complete(
        &mut self,
        cache: &mut dyn Cache,
        mutation_id: &MutationId,
        optimistic_response: Option<&OptimisticResponse>,
    ) -> MutationResult<MutationState> {
        if optimistic_response.is_some() {
            cache.remove_optimistic(mutation_id.as_str())?;
            debug!(%mutation_id, "removed optimistic overlay");
        }
        self.states.remove(mutation_id);
        Ok(MutationState::Completed)
    }
}

/// Write the mutation result and updater outputs in one transaction, then
/// run the update function in a second one.
fn commit(
    cache: &mut dyn Cache,
    mutation: &MutationRecord,
    result: &ExecutionResult,
    sink: &dyn FailureSink,
) -> CacheResult<CommitSummary> {
    if result.has_errors() {
        debug!(
            mutation_id = %mutation.id,
            errors = result.errors.len(),
            "mutation result carries errors, nothing committed"
        );
        return Ok(CommitSummary::aborted());
    }

    let mut summary = CommitSummary::committed();
    let mut writes = vec![DataWrite::new(
        RootId::Mutation,
        result.data_or_null(),
        mutation.document.clone(),
        mutation.variables.clone(),
    )];

    for (query_id, entry) in &mutation.update_queries {
        let Some(updater) = &entry.updater else {
            continue;
        };

        let query = DiffQuery::new(entry.document.clone(), entry.variables.clone())
            .optimistic(false)
            .return_partial_data(true);
        let current = cache.diff(&query)?;
        if !current.complete {
            debug!(
                mutation_id = %mutation.id,
                query_id = query_id.as_str(),
                "query data incomplete, updater skipped"
            );
            summary.skipped_incomplete += 1;
            continue;
        }

        let context = UpdaterContext {
            mutation_result: result,
            query_name: entry.document.operation_name(),
            query_variables: &entry.variables,
        };
        match guarded(|| updater(&current.result, context)) {
            Ok(Some(next)) => writes.push(DataWrite::new(
                RootId::Query,
                next,
                entry.document.clone(),
                entry.variables.clone(),
            )),
            Ok(None) => {}
            Err(message) => {
                summary.failed_callbacks += 1;
                sink.report(CallbackFailure::Updater {
                    mutation_id: mutation.id.clone(),
                    query_id: query_id.clone(),
                    query_name: entry.document.operation_name().map(str::to_owned),
                    message,
                });
            }
        }
    }
    summary.query_writes = writes.len() - 1;

    cache.perform_transaction(&mut |proxy| {
        for write in &writes {
            proxy.write(write.clone())?;
        }
        Ok(())
    })?;

    if let Some(update) = &mutation.update {
        let mut failure = None;
        cache.perform_transaction(&mut |proxy| {
            if let Err(message) = guarded(|| update(proxy, result)) {
                failure = Some(message);
            }
            Ok(())
        })?;
        if let Some(message) = failure {
            summary.failed_callbacks += 1;
            sink.report(CallbackFailure::Update {
                mutation_id: mutation.id.clone(),
                message,
            });
        }
    }

    Ok(summary)
}

/// Run a user callback, turning both errors and panics into a message.
fn guarded<T>(callback: impl FnOnce() -> Result<T, CallbackError>) -> Result<T, String> {
    match panic::catch_unwind(AssertUnwindSafe(callback)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(error.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}

//! Strata Mutation
//!
//! Drive a mutation through optimistic apply → commit → cleanup.
//!
//! Responsibilities:
//! - Record the optimistic payload as a named overlay
//! - Commit the mutation result and run per-query updaters in one transaction
//! - Run the free-form update function in a second transaction
//! - Report callback failures to a sink instead of failing the commit
//! - Retract the overlay once the mutation completes
//!
//! # Module Structure
//!
//! - `lifecycle` - MutationLifecycle, the init/result/complete state machine
//! - `record` - Mutation records, optimistic responses and updaters
//! - `sink` - Failure reporting for updaters and update functions
//! - `result` - Commit summaries and lifecycle states
//! - `error` - Error types for mutation failures

mod error;
mod lifecycle;
mod record;
mod result;
mod sink;

pub use error::{MutationError, MutationResult};
pub use lifecycle::MutationLifecycle;
pub use record::{
    MutationId, MutationRecord, OptimisticResponse, QueryUpdater, QueryWithUpdater, UpdateFn,
    UpdaterContext,
};
pub use result::{CommitStatus, CommitSummary, MutationState};
pub use sink::{CallbackFailure, FailureSink, LogSink};

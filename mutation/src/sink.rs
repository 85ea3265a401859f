//! Failure reporting for updaters and update functions.

use std::fmt;

use tracing::warn;

use crate::record::MutationId;

/// A callback that failed (returned an error or panicked) during a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackFailure {
    /// A query updater failed; its query was left untouched.
    Updater {
        mutation_id: MutationId,
        query_id: String,
        query_name: Option<String>,
        message: String,
    },
    /// The free-form update function failed.
    Update {
        mutation_id: MutationId,
        message: String,
    },
}

impl fmt::Display for CallbackFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackFailure::Updater {
                mutation_id,
                query_id,
                query_name,
                message,
            } => write!(
                f,
                "updater for query {query_id} ({}) in mutation {mutation_id} failed: {message}",
                query_name.as_deref().unwrap_or("anonymous")
            ),
            CallbackFailure::Update {
                mutation_id,
                message,
            } => write!(f, "update function of mutation {mutation_id} failed: {message}"),
        }
    }
}

/// Receives callback failures. Failures never abort a commit.
pub trait FailureSink: Send + Sync {
    /// Report one failure.
    fn report(&self, failure: CallbackFailure);
}

impl<F> FailureSink for F
where
    F: Fn(CallbackFailure) + Send + Sync,
{
    fn report(&self, failure: CallbackFailure) {
        self(failure)
    }
}

/// Default sink: emits a `warn` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl FailureSink for LogSink {
    fn report(&self, failure: CallbackFailure) {
        match &failure {
            CallbackFailure::Updater {
                mutation_id,
                query_id,
                ..
            } => warn!(%mutation_id, query_id = query_id.as_str(), "{failure}"),
            CallbackFailure::Update { mutation_id, .. } => warn!(%mutation_id, "{failure}"),
        }
    }
}

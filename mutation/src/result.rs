//! Mutation lifecycle states and commit summaries.

/// Where a mutation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    /// Initialized without an optimistic response.
    Idle,
    /// The optimistic payload has been recorded as an overlay.
    OptimisticApplied,
    /// The real result has been committed.
    Committed,
    /// The mutation is finished and forgotten.
    Completed,
}

/// Whether a commit wrote anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStatus {
    /// The result was written.
    Committed,
    /// The result carried errors; nothing was written and no callback ran.
    Aborted,
}

/// Outcome of one commit (real or optimistic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSummary {
    /// Committed or aborted.
    pub status: CommitStatus,
    /// Number of query payloads written by updaters.
    pub query_writes: usize,
    /// Updaters skipped because their query's data was incomplete.
    pub skipped_incomplete: usize,
    /// Updaters and update functions that failed.
    pub failed_callbacks: usize,
}

impl CommitSummary {
    pub(crate) fn committed() -> Self {
        Self {
            status: CommitStatus::Committed,
            query_writes: 0,
            skipped_incomplete: 0,
            failed_callbacks: 0,
        }
    }

    pub(crate) fn aborted() -> Self {
        Self {
            status: CommitStatus::Aborted,
            ..Self::committed()
        }
    }

    /// Returns true if the commit wrote the mutation result.
    pub fn is_committed(&self) -> bool {
        self.status == CommitStatus::Committed
    }
}

//! Collaborator traits.
//!
//! The coordination layer never holds a swapped-in cache reference: every
//! operation receives the handle it must act on (the cache itself, a
//! transaction proxy, or an optimistic overlay) as an explicit argument.

use futures::future::BoxFuture;
use serde_json::Value;
use strata_core::{DataWrite, Document, Variables};

use crate::error::CacheResult;

/// Body of a transaction run through [`Cache::perform_transaction`].
pub type ProxyTransaction<'a> = dyn FnMut(&mut dyn DataProxy) -> CacheResult<()> + 'a;

/// Body of an optimistic transaction run through
/// [`Cache::record_optimistic_transaction`]. The overlay handle is itself a
/// [`Cache`], so the body may open nested transactions against it.
pub type OverlayTransaction<'a> = dyn FnMut(&mut dyn Cache) -> CacheResult<()> + 'a;

/// A read of the current materialized value of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffQuery {
    /// The query to read.
    pub document: Document,
    /// Variables the query is keyed by.
    pub variables: Variables,
    /// Read through optimistic overlays when true.
    pub optimistic: bool,
    /// Return whatever is available when the data is incomplete.
    pub return_partial_data: bool,
}

impl DiffQuery {
    /// An optimistic, complete-only read.
    pub fn new(document: Document, variables: Variables) -> Self {
        Self {
            document,
            variables,
            optimistic: true,
            return_partial_data: false,
        }
    }

    /// Set whether optimistic overlays are visible to this read.
    pub fn optimistic(mut self, optimistic: bool) -> Self {
        self.optimistic = optimistic;
        self
    }

    /// Set whether partial data is returned.
    pub fn return_partial_data(mut self, partial: bool) -> Self {
        self.return_partial_data = partial;
        self
    }
}

/// The outcome of a [`DiffQuery`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiffResult {
    /// The materialized value (possibly partial, possibly `null`).
    pub result: Value,
    /// False when some of the requested data is missing.
    pub complete: bool,
}

impl DiffResult {
    /// A complete read.
    pub fn complete(result: Value) -> Self {
        Self {
            result,
            complete: true,
        }
    }

    /// An incomplete read carrying whatever was available.
    pub fn incomplete(result: Value) -> Self {
        Self {
            result,
            complete: false,
        }
    }
}

/// Read/write surface shared by caches, transaction proxies and overlays.
pub trait DataProxy {
    /// Upsert a payload anchored at `write.root_id`.
    fn write(&mut self, write: DataWrite) -> CacheResult<()>;

    /// Read the current value of a query.
    fn diff(&self, query: &DiffQuery) -> CacheResult<DiffResult>;

    /// Write top-level local fields, bypassing document keying. `data` must
    /// be an object mapping field names to values.
    fn write_data(&mut self, data: Value) -> CacheResult<()>;
}

/// The full capability set of a cache collaborator.
pub trait Cache: DataProxy {
    /// Run `transaction` atomically against the cache's consistency rules.
    fn perform_transaction(&mut self, transaction: &mut ProxyTransaction<'_>) -> CacheResult<()>;

    /// Run `transaction` against a speculative overlay recorded under `id`.
    /// The base state is left untouched.
    fn record_optimistic_transaction(
        &mut self,
        id: &str,
        transaction: &mut OverlayTransaction<'_>,
    ) -> CacheResult<()>;

    /// Discard every overlay recorded under `id`.
    fn remove_optimistic(&mut self, id: &str) -> CacheResult<()>;

    /// Clear all stored state. The returned future completes once the reset
    /// has taken effect.
    fn reset(&mut self) -> BoxFuture<'static, CacheResult<()>>;
}

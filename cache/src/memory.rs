//! In-memory reference cache.
//!
//! Base state plus an ordered stack of named optimistic layers. Transactions
//! work on a copy of their target layer and swap it in only when the body
//! returns `Ok`, so a failed transaction leaves no trace.

use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;
use strata_core::{DataWrite, Document, RootId, Variables};
use tracing::debug;

use crate::error::CacheResult;
use crate::proxy::{Cache, DataProxy, DiffQuery, DiffResult, OverlayTransaction, ProxyTransaction};
use crate::snapshot::{diff_stack, lookup, lookup_local, EntryKey, Snapshot};

/// A named speculative layer.
#[derive(Debug, Clone)]
struct OptimisticLayer {
    id: String,
    data: Snapshot,
}

/// In-memory cache with optimistic overlays.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCache {
    base: Snapshot,
    /// Oldest first.
    layers: Vec<OptimisticLayer>,
}

impl InMemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a stored payload under any root anchor.
    pub fn read(
        &self,
        root: RootId,
        document: &Document,
        variables: &Variables,
        optimistic: bool,
    ) -> Option<&Value> {
        let key = EntryKey::new(root, document, variables);
        lookup(&self.stack(optimistic), &key)
    }

    /// Read a local field written through `write_data`, including optimistic
    /// layers.
    pub fn local_field(&self, field: &str) -> Option<&Value> {
        lookup_local(&self.stack(true), field)
    }

    /// Ids of the recorded optimistic layers, oldest first.
    pub fn optimistic_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.id.as_str()).collect()
    }

    /// Check if any layer is recorded under `id`.
    pub fn has_optimistic(&self, id: &str) -> bool {
        self.layers.iter().any(|layer| layer.id == id)
    }

    /// Layers visible to a read, top-first.
    fn stack(&self, optimistic: bool) -> Vec<&Snapshot> {
        let mut stack = Vec::with_capacity(self.layers.len() + 1);
        if optimistic {
            stack.extend(self.layers.iter().rev().map(|layer| &layer.data));
        }
        stack.push(&self.base);
        stack
    }
}

impl DataProxy for InMemoryCache {
    fn write(&mut self, write: DataWrite) -> CacheResult<()> {
        self.base.apply(write);
        Ok(())
    }

    fn diff(&self, query: &DiffQuery) -> CacheResult<DiffResult> {
        Ok(diff_stack(
            &self.stack(query.optimistic),
            &query.document,
            &query.variables,
        ))
    }

    fn write_data(&mut self, data: Value) -> CacheResult<()> {
        self.base.merge_local(data)
    }
}

impl Cache for InMemoryCache {
    fn perform_transaction(&mut self, transaction: &mut ProxyTransaction<'_>) -> CacheResult<()> {
        let mut txn = StagedTransaction::new(self.base.clone(), Vec::new());
        transaction(&mut txn)?;
        self.base = txn.working;
        Ok(())
    }

    fn record_optimistic_transaction(
        &mut self,
        id: &str,
        transaction: &mut OverlayTransaction<'_>,
    ) -> CacheResult<()> {
        let mut overlay = Overlay {
            layer: Snapshot::default(),
            below: self.stack(true),
        };
        let outcome = transaction(&mut overlay);
        let Overlay { layer, below } = overlay;
        drop(below);
        outcome?;

        debug!(id, empty = layer.is_empty(), "recorded optimistic layer");
        self.layers.push(OptimisticLayer {
            id: id.to_owned(),
            data: layer,
        });
        Ok(())
    }

    fn remove_optimistic(&mut self, id: &str) -> CacheResult<()> {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        debug!(id, removed = before - self.layers.len(), "removed optimistic layer");
        Ok(())
    }

    fn reset(&mut self) -> BoxFuture<'static, CacheResult<()>> {
        self.base = Snapshot::default();
        self.layers.clear();
        future::ready(Ok(())).boxed()
    }
}

/// Transaction proxy: writes land in a working copy, reads see the working
/// copy first and then the layers below it.
struct StagedTransaction<'a> {
    working: Snapshot,
    below: Vec<&'a Snapshot>,
}

impl<'a> StagedTransaction<'a> {
    fn new(working: Snapshot, below: Vec<&'a Snapshot>) -> Self {
        Self { working, below }
    }

    fn stack(&self) -> Vec<&Snapshot> {
        let mut stack = Vec::with_capacity(self.below.len() + 1);
        stack.push(&self.working);
        stack.extend(self.below.iter().copied());
        stack
    }
}

impl DataProxy for StagedTransaction<'_> {
    fn write(&mut self, write: DataWrite) -> CacheResult<()> {
        self.working.apply(write);
        Ok(())
    }

    fn diff(&self, query: &DiffQuery) -> CacheResult<DiffResult> {
        Ok(diff_stack(&self.stack(), &query.document, &query.variables))
    }

    fn write_data(&mut self, data: Value) -> CacheResult<()> {
        self.working.merge_local(data)
    }
}

/// Handle given to an optimistic transaction body. It is the "current cache"
/// for the duration of the body: reads see the layer being built on top of
/// every existing layer and the base, whatever the `optimistic` flag says.
struct Overlay<'a> {
    layer: Snapshot,
    below: Vec<&'a Snapshot>,
}

impl Overlay<'_> {
    fn stack(&self) -> Vec<&Snapshot> {
        let mut stack = Vec::with_capacity(self.below.len() + 1);
        stack.push(&self.layer);
        stack.extend(self.below.iter().copied());
        stack
    }
}

impl DataProxy for Overlay<'_> {
    fn write(&mut self, write: DataWrite) -> CacheResult<()> {
        self.layer.apply(write);
        Ok(())
    }

    fn diff(&self, query: &DiffQuery) -> CacheResult<DiffResult> {
        Ok(diff_stack(&self.stack(), &query.document, &query.variables))
    }

    fn write_data(&mut self, data: Value) -> CacheResult<()> {
        self.layer.merge_local(data)
    }
}

impl Cache for Overlay<'_> {
    fn perform_transaction(&mut self, transaction: &mut ProxyTransaction<'_>) -> CacheResult<()> {
        let mut txn = StagedTransaction::new(self.layer.clone(), self.below.clone());
        transaction(&mut txn)?;
        self.layer = txn.working;
        Ok(())
    }

    fn record_optimistic_transaction(
        &mut self,
        id: &str,
        transaction: &mut OverlayTransaction<'_>,
    ) -> CacheResult<()> {
        // Nested overlays fold into the layer being recorded.
        debug!(id, "nested optimistic transaction folded into enclosing layer");
        transaction(self)
    }

    fn remove_optimistic(&mut self, id: &str) -> CacheResult<()> {
        debug!(id, "ignoring optimistic removal inside an overlay");
        Ok(())
    }

    fn reset(&mut self) -> BoxFuture<'static, CacheResult<()>> {
        self.layer = Snapshot::default();
        future::ready(Ok(())).boxed()
    }
}

//! A cache that logs every call it receives.

use std::cell::RefCell;

use futures::future::BoxFuture;
use serde_json::Value;
use strata_cache::{
    Cache, CacheResult, DataProxy, DiffQuery, DiffResult, InMemoryCache, OverlayTransaction,
    ProxyTransaction,
};
use strata_core::{DataWrite, RootId};

/// Where a call was made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    /// Id of the optimistic overlay the call went through, if any.
    pub overlay: Option<String>,
    /// Whether the call went through a transaction proxy.
    pub transaction: bool,
}

impl Scope {
    fn in_transaction(&self) -> Self {
        Self {
            overlay: self.overlay.clone(),
            transaction: true,
        }
    }

    fn in_overlay(&self, id: &str) -> Self {
        Self {
            overlay: Some(self.overlay.clone().unwrap_or_else(|| id.to_owned())),
            transaction: self.transaction,
        }
    }
}

/// One recorded collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheOp {
    Write {
        scope: Scope,
        root: RootId,
        operation_name: Option<String>,
        data: Value,
    },
    Diff {
        scope: Scope,
        optimistic: bool,
        return_partial_data: bool,
        complete: bool,
    },
    WriteData {
        scope: Scope,
        data: Value,
    },
    Transaction {
        scope: Scope,
    },
    OptimisticTransaction {
        scope: Scope,
        id: String,
    },
    RemoveOptimistic {
        id: String,
    },
    Reset,
}

impl CacheOp {
    /// Returns true for a write of any kind.
    pub fn is_write(&self) -> bool {
        matches!(self, CacheOp::Write { .. } | CacheOp::WriteData { .. })
    }

    /// The scope of the call, if it carries one.
    pub fn scope(&self) -> Option<&Scope> {
        match self {
            CacheOp::Write { scope, .. }
            | CacheOp::Diff { scope, .. }
            | CacheOp::WriteData { scope, .. }
            | CacheOp::Transaction { scope }
            | CacheOp::OptimisticTransaction { scope, .. } => Some(scope),
            CacheOp::RemoveOptimistic { .. } | CacheOp::Reset => None,
        }
    }
}

/// [`InMemoryCache`] plus a log of every call made through it, including
/// calls made on the proxies and overlays it hands out.
#[derive(Debug, Default)]
pub struct RecordingCache {
    inner: InMemoryCache,
    ops: RefCell<Vec<CacheOp>>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The wrapped cache, for state assertions.
    pub fn inner(&self) -> &InMemoryCache {
        &self.inner
    }

    /// Calls recorded so far.
    pub fn ops(&self) -> Vec<CacheOp> {
        self.ops.borrow().clone()
    }

    /// Return the recorded calls and start a fresh log.
    pub fn take_ops(&mut self) -> Vec<CacheOp> {
        std::mem::take(self.ops.get_mut())
    }

    /// Recorded writes (payload and local) only.
    pub fn writes(&self) -> Vec<CacheOp> {
        self.ops
            .borrow()
            .iter()
            .filter(|op| op.is_write())
            .cloned()
            .collect()
    }

    fn recorder(&mut self) -> Recorder<'_, InMemoryCache> {
        Recorder {
            inner: &mut self.inner,
            ops: &self.ops,
            scope: Scope::default(),
        }
    }
}

impl DataProxy for RecordingCache {
    fn write(&mut self, write: DataWrite) -> CacheResult<()> {
        self.recorder().write(write)
    }

    fn diff(&self, query: &DiffQuery) -> CacheResult<DiffResult> {
        record_diff(&self.ops, &Scope::default(), query, self.inner.diff(query))
    }

    fn write_data(&mut self, data: Value) -> CacheResult<()> {
        self.recorder().write_data(data)
    }
}

impl Cache for RecordingCache {
    fn perform_transaction(&mut self, transaction: &mut ProxyTransaction<'_>) -> CacheResult<()> {
        self.recorder().perform_transaction(transaction)
    }

    fn record_optimistic_transaction(
        &mut self,
        id: &str,
        transaction: &mut OverlayTransaction<'_>,
    ) -> CacheResult<()> {
        self.recorder().record_optimistic_transaction(id, transaction)
    }

    fn remove_optimistic(&mut self, id: &str) -> CacheResult<()> {
        self.recorder().remove_optimistic(id)
    }

    fn reset(&mut self) -> BoxFuture<'static, CacheResult<()>> {
        self.recorder().reset()
    }
}

fn record_diff(
    ops: &RefCell<Vec<CacheOp>>,
    scope: &Scope,
    query: &DiffQuery,
    result: CacheResult<DiffResult>,
) -> CacheResult<DiffResult> {
    let result = result?;
    ops.borrow_mut().push(CacheOp::Diff {
        scope: scope.clone(),
        optimistic: query.optimistic,
        return_partial_data: query.return_partial_data,
        complete: result.complete,
    });
    Ok(result)
}

/// Forwards to any proxy or cache handle, logging each call under `scope`.
struct Recorder<'a, T: ?Sized> {
    inner: &'a mut T,
    ops: &'a RefCell<Vec<CacheOp>>,
    scope: Scope,
}

impl<'a, T: ?Sized> Recorder<'a, T> {
    fn push(&self, op: CacheOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl<T: DataProxy + ?Sized> DataProxy for Recorder<'_, T> {
    fn write(&mut self, write: DataWrite) -> CacheResult<()> {
        self.push(CacheOp::Write {
            scope: self.scope.clone(),
            root: write.root_id,
            operation_name: write.operation_name.clone(),
            data: write.result.clone(),
        });
        self.inner.write(write)
    }

    fn diff(&self, query: &DiffQuery) -> CacheResult<DiffResult> {
        record_diff(self.ops, &self.scope, query, self.inner.diff(query))
    }

    fn write_data(&mut self, data: Value) -> CacheResult<()> {
        self.push(CacheOp::WriteData {
            scope: self.scope.clone(),
            data: data.clone(),
        });
        self.inner.write_data(data)
    }
}

impl<T: Cache + ?Sized> Cache for Recorder<'_, T> {
    fn perform_transaction(&mut self, transaction: &mut ProxyTransaction<'_>) -> CacheResult<()> {
        self.push(CacheOp::Transaction {
            scope: self.scope.clone(),
        });
        let ops = self.ops;
        let scope = self.scope.in_transaction();
        self.inner.perform_transaction(&mut |proxy| {
            transaction(&mut Recorder {
                inner: proxy,
                ops,
                scope: scope.clone(),
            })
        })
    }

    fn record_optimistic_transaction(
        &mut self,
        id: &str,
        transaction: &mut OverlayTransaction<'_>,
    ) -> CacheResult<()> {
        self.push(CacheOp::OptimisticTransaction {
            scope: self.scope.clone(),
            id: id.to_owned(),
        });
        let ops = self.ops;
        let scope = self.scope.in_overlay(id);
        self.inner.record_optimistic_transaction(id, &mut |overlay| {
            transaction(&mut Recorder {
                inner: overlay,
                ops,
                scope: scope.clone(),
            })
        })
    }

    fn remove_optimistic(&mut self, id: &str) -> CacheResult<()> {
        self.push(CacheOp::RemoveOptimistic { id: id.to_owned() });
        self.inner.remove_optimistic(id)
    }

    fn reset(&mut self) -> BoxFuture<'static, CacheResult<()>> {
        self.push(CacheOp::Reset);
        self.inner.reset()
    }
}

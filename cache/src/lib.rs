//! Strata Cache
//!
//! The capability set every cache collaborator provides, plus an in-memory
//! reference implementation.
//!
//! Responsibilities:
//! - Define the write / diff / local-write surface (`DataProxy`)
//! - Define transactions, optimistic overlays and reset (`Cache`)
//! - Provide `InMemoryCache` for embedders and tests
//!
//! Normalization, garbage collection and query parsing are left to real
//! cache engines; `InMemoryCache` stores payloads keyed by root anchor,
//! document and variables.

mod error;
mod memory;
mod proxy;
mod snapshot;

pub use error::{CacheError, CacheResult};
pub use memory::InMemoryCache;
pub use proxy::{Cache, DataProxy, DiffQuery, DiffResult, OverlayTransaction, ProxyTransaction};

//! Integration test harness for Strata.
//!
//! Provides a cache wrapper that records every collaborator call so tests
//! can assert on what the store asked the cache to do, not only on the
//! resulting state.

pub mod fixtures;
pub mod recording;

/// Everything an integration test usually needs.
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::recording::{CacheOp, RecordingCache, Scope};

    pub use serde_json::{json, Value};
    pub use strata_store::*;
}

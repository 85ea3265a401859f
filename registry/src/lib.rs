//! Strata Registry
//!
//! One-shot initializers that seed synthetic local fields into the cache.
//!
//! Responsibilities:
//! - Merge initializer groups (later groups override earlier ones by field)
//! - Fire each field's initializer at most once between resets
//! - Write non-null initializer values through the local-write path
//! - Fan out asynchronous initializers and join them

mod error;
mod registry;
mod types;

pub use error::{RegistryError, RegistryResult};
pub use registry::InitializerRegistry;
pub use types::{
    async_initializer, sync_initializer, AsyncInitializer, InitializerResult, InitializerSet,
    Initializers, SyncInitializer,
};

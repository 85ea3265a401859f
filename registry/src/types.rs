//! Initializer definitions.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use strata_core::CallbackError;

/// What an initializer produces. `Value::Null` means "write nothing".
pub type InitializerResult = Result<Value, CallbackError>;

/// An initializer that returns its value immediately.
pub type SyncInitializer<C> = Arc<dyn Fn(&C) -> InitializerResult + Send + Sync>;

/// An initializer whose value arrives later.
pub type AsyncInitializer<C> = Arc<dyn Fn(&C) -> BoxFuture<'static, InitializerResult> + Send + Sync>;

/// Initializers keyed by the field they seed.
pub type Initializers<I> = BTreeMap<String, I>;

/// Wrap a closure as a [`SyncInitializer`].
pub fn sync_initializer<C, F>(f: F) -> SyncInitializer<C>
where
    F: Fn(&C) -> InitializerResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a future-returning closure as an [`AsyncInitializer`].
pub fn async_initializer<C, F, Fut>(f: F) -> AsyncInitializer<C>
where
    F: Fn(&C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = InitializerResult> + Send + 'static,
{
    Arc::new(move |context: &C| f(context).boxed())
}

/// A single initializer map or an ordered sequence of them.
pub enum InitializerSet<I> {
    /// One map.
    Single(Initializers<I>),
    /// Maps merged left to right.
    Groups(Vec<Initializers<I>>),
}

impl<I> InitializerSet<I> {
    /// Flatten into one map. A later group's entry replaces an earlier
    /// group's entry for the same field.
    pub fn merge(self) -> Initializers<I> {
        match self {
            InitializerSet::Single(initializers) => initializers,
            InitializerSet::Groups(groups) => {
                groups
                    .into_iter()
                    .fold(Initializers::new(), |mut merged, group| {
                        merged.extend(group);
                        merged
                    })
            }
        }
    }
}

impl<I> From<Initializers<I>> for InitializerSet<I> {
    fn from(initializers: Initializers<I>) -> Self {
        Self::Single(initializers)
    }
}

impl<I> From<Vec<Initializers<I>>> for InitializerSet<I> {
    fn from(groups: Vec<Initializers<I>>) -> Self {
        Self::Groups(groups)
    }
}

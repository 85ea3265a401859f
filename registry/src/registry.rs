//! The InitializerRegistry - fired-field bookkeeping.

use std::collections::HashSet;

use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::{Map, Value};
use strata_cache::DataProxy;
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::types::{AsyncInitializer, InitializerSet, Initializers, SyncInitializer};

/// Remembers which fields have been initialized.
///
/// A field is marked as soon as its initializer is invoked, whether or not
/// the initializer eventually succeeds. A failed initializer therefore only
/// runs again after [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct InitializerRegistry {
    fired: HashSet<String>,
}

impl InitializerRegistry {
    /// Create a registry with nothing fired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a field's initializer has fired since the last reset.
    pub fn is_fired(&self, field: &str) -> bool {
        self.fired.contains(field)
    }

    /// Names of the fired fields, sorted.
    pub fn fired(&self) -> Vec<&str> {
        let mut fired: Vec<_> = self.fired.iter().map(String::as_str).collect();
        fired.sort_unstable();
        fired
    }

    /// Forget every fired field.
    pub fn reset(&mut self) {
        self.fired.clear();
    }

    /// Flatten an initializer set; later entries override earlier ones.
    pub fn merge<I>(initializers: InitializerSet<I>) -> Initializers<I> {
        initializers.merge()
    }

    /// Hand every not-yet-fired initializer to `sink`, marking its field
    /// right after. Stops at the first error `sink` returns; that field is
    /// still marked.
    pub fn run<I, E>(
        &mut self,
        merged: &Initializers<I>,
        mut sink: impl FnMut(&str, &I) -> Result<(), E>,
    ) -> Result<(), E> {
        for (field, initializer) in merged {
            if self.fired.contains(field) {
                continue;
            }
            let outcome = sink(field, initializer);
            self.fired.insert(field.clone());
            outcome?;
        }
        Ok(())
    }

    /// Run asynchronous initializers concurrently and write each non-null
    /// value as soon as it resolves. Completes once every initializer has
    /// resolved. A rejection does not stop the others; the first one is
    /// returned after all of them have been awaited.
    pub async fn initialize<C>(
        &mut self,
        cache: &mut dyn DataProxy,
        initializers: Option<InitializerSet<AsyncInitializer<C>>>,
        context: &C,
    ) -> RegistryResult<()> {
        let merged = Self::merge(initializers.ok_or(RegistryError::MissingInitializers)?);

        let pending = FuturesUnordered::new();
        self.run(&merged, |field, initializer| {
            debug!(field, "firing initializer");
            let field = field.to_owned();
            let resolving = initializer(context);
            pending.push(async move {
                match resolving.await {
                    Ok(value) => Ok((field, value)),
                    Err(source) => Err(RegistryError::initializer(field, source)),
                }
            });
            Ok::<_, RegistryError>(())
        })?;

        let mut pending = pending;
        let mut first_error = None;
        while let Some(outcome) = pending.next().await {
            let written = outcome.and_then(|(field, value)| write_field(cache, field, value));
            if let Err(error) = written {
                debug!(%error, "initializer failed, awaiting the rest");
                first_error.get_or_insert(error);
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Run initializers that return their value immediately.
    pub fn initialize_sync<C>(
        &mut self,
        cache: &mut dyn DataProxy,
        initializers: Option<InitializerSet<SyncInitializer<C>>>,
        context: &C,
    ) -> RegistryResult<()> {
        let merged = Self::merge(initializers.ok_or(RegistryError::MissingInitializers)?);

        self.run(&merged, |field, initializer| {
            debug!(field, "firing initializer");
            let value =
                initializer(context).map_err(|source| RegistryError::initializer(field, source))?;
            write_field(cache, field.to_owned(), value)
        })
    }
}

/// Write `{ field: value }` through the local-write path, unless null.
fn write_field(cache: &mut dyn DataProxy, field: String, value: Value) -> RegistryResult<()> {
    if value.is_null() {
        return Ok(());
    }
    let mut data = Map::new();
    data.insert(field, value);
    cache.write_data(Value::Object(data))?;
    Ok(())
}

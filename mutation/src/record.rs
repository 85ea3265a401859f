//! Mutation records and the callbacks attached to them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use strata_cache::DataProxy;
use strata_core::{CallbackError, Document, ExecutionResult, Variables};

/// Identifies one in-flight mutation. Also the id of its optimistic overlay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MutationId(String);

impl MutationId {
    /// Create a mutation id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MutationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MutationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MutationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Arguments passed to a query updater next to the query's current value.
#[derive(Debug, Clone, Copy)]
pub struct UpdaterContext<'a> {
    /// The mutation result being committed (real or optimistic).
    pub mutation_result: &'a ExecutionResult,
    /// Operation name of the updated query.
    pub query_name: Option<&'a str>,
    /// Variables of the updated query.
    pub query_variables: &'a Variables,
}

/// Reducer from a query's current value to its new value. `Ok(None)` leaves
/// the query untouched.
pub type QueryUpdater =
    Arc<dyn Fn(&Value, UpdaterContext<'_>) -> Result<Option<Value>, CallbackError> + Send + Sync>;

/// Free-form post-commit update, run against a transaction proxy.
pub type UpdateFn =
    Arc<dyn Fn(&mut dyn DataProxy, &ExecutionResult) -> Result<(), CallbackError> + Send + Sync>;

/// Optimistic payload supplied ahead of the server's answer.
#[derive(Clone)]
pub enum OptimisticResponse {
    /// A fixed payload.
    Literal(Value),
    /// A payload computed from the mutation variables.
    Computed(Arc<dyn Fn(&Variables) -> Value + Send + Sync>),
}

impl OptimisticResponse {
    /// Build a computed response.
    pub fn computed(f: impl Fn(&Variables) -> Value + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    /// Produce the concrete payload for `variables`.
    pub fn resolve(&self, variables: &Variables) -> Value {
        match self {
            OptimisticResponse::Literal(value) => value.clone(),
            OptimisticResponse::Computed(f) => f(variables),
        }
    }
}

impl From<Value> for OptimisticResponse {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Debug for OptimisticResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimisticResponse::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            OptimisticResponse::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A previously issued query paired with the reducer that patches it.
#[derive(Clone)]
pub struct QueryWithUpdater {
    /// The query document.
    pub document: Document,
    /// The query variables.
    pub variables: Variables,
    /// The reducer; entries without one are ignored.
    pub updater: Option<QueryUpdater>,
}

impl QueryWithUpdater {
    /// A query with no updater attached yet.
    pub fn new(document: Document, variables: Variables) -> Self {
        Self {
            document,
            variables,
            updater: None,
        }
    }

    /// Attach the reducer.
    pub fn with_updater(
        mut self,
        updater: impl Fn(&Value, UpdaterContext<'_>) -> Result<Option<Value>, CallbackError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.updater = Some(Arc::new(updater));
        self
    }
}

impl fmt::Debug for QueryWithUpdater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryWithUpdater")
            .field("document", &self.document)
            .field("variables", &self.variables)
            .field("has_updater", &self.updater.is_some())
            .finish()
    }
}

/// Everything needed to apply one mutation. Lives from init to complete.
#[derive(Clone)]
pub struct MutationRecord {
    /// Unique among in-flight mutations.
    pub id: MutationId,
    /// The mutation document.
    pub document: Document,
    /// The mutation variables.
    pub variables: Variables,
    /// Queries to patch, keyed by query id. Iterated in key order.
    pub update_queries: BTreeMap<String, QueryWithUpdater>,
    /// Free-form post-commit update.
    pub update: Option<UpdateFn>,
    /// Payload to apply before the real result arrives.
    pub optimistic_response: Option<OptimisticResponse>,
}

impl MutationRecord {
    /// Create a record with no variables, updaters or optimistic response.
    pub fn new(id: impl Into<MutationId>, document: Document) -> Self {
        Self {
            id: id.into(),
            document,
            variables: Variables::new(),
            update_queries: BTreeMap::new(),
            update: None,
            optimistic_response: None,
        }
    }

    /// Set the mutation variables.
    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    /// Set the optimistic response.
    pub fn with_optimistic_response(mut self, response: impl Into<OptimisticResponse>) -> Self {
        self.optimistic_response = Some(response.into());
        self
    }

    /// Register a query to patch once the mutation commits.
    pub fn with_update_query(mut self, query_id: impl Into<String>, query: QueryWithUpdater) -> Self {
        self.update_queries.insert(query_id.into(), query);
        self
    }

    /// Set the free-form update function.
    pub fn with_update(
        mut self,
        update: impl Fn(&mut dyn DataProxy, &ExecutionResult) -> Result<(), CallbackError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.update = Some(Arc::new(update));
        self
    }
}

impl fmt::Debug for MutationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationRecord")
            .field("id", &self.id)
            .field("document", &self.document)
            .field("variables", &self.variables)
            .field("update_queries", &self.update_queries)
            .field("has_update", &self.update.is_some())
            .field("optimistic_response", &self.optimistic_response)
            .finish()
    }
}

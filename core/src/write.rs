//! Root anchors and write descriptors.

use std::fmt;

use serde_json::Value;

use crate::document::{Document, Variables};

/// Well-known top-level key under which a write's payload is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RootId {
    /// `ROOT_QUERY`
    Query,
    /// `ROOT_MUTATION`
    Mutation,
    /// `ROOT_SUBSCRIPTION`
    Subscription,
}

impl RootId {
    /// The anchor id as stored by the cache.
    pub fn as_str(&self) -> &'static str {
        match self {
            RootId::Query => "ROOT_QUERY",
            RootId::Mutation => "ROOT_MUTATION",
            RootId::Subscription => "ROOT_SUBSCRIPTION",
        }
    }
}

impl fmt::Display for RootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One write intent: a payload anchored at a root id, keyed by the document
/// and variables it was read against.
#[derive(Debug, Clone, PartialEq)]
pub struct DataWrite {
    /// Root entity id to anchor the payload at.
    pub root_id: RootId,
    /// The payload.
    pub result: Value,
    /// The document the payload was produced by.
    pub document: Document,
    /// Operation name of `document`, if any.
    pub operation_name: Option<String>,
    /// Variable bindings used for `document`.
    pub variables: Variables,
}

impl DataWrite {
    /// Build a descriptor; the operation name is taken from the document.
    pub fn new(root_id: RootId, result: Value, document: Document, variables: Variables) -> Self {
        let operation_name = document.operation_name().map(str::to_owned);
        Self {
            root_id,
            result,
            document,
            operation_name,
            variables,
        }
    }
}

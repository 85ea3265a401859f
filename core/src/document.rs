//! Query documents and variable bindings.
//!
//! Documents are opaque to this layer: parsing and validation belong to the
//! embedding client. A document only needs to be cheap to clone, comparable,
//! and able to report its operation name.

use std::fmt;
use std::sync::Arc;

/// Variable bindings used when a document was executed.
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// An already-parsed query, mutation or subscription document.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Document {
    source: Arc<str>,
    operation_name: Option<Arc<str>>,
}

impl Document {
    /// Create an anonymous document from its source text.
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            operation_name: None,
        }
    }

    /// Create a document with a known operation name.
    pub fn named(source: impl Into<Arc<str>>, operation_name: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            operation_name: Some(operation_name.into()),
        }
    }

    /// The document source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The operation name, if the document declares one.
    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operation_name {
            Some(name) => write!(f, "Document({name})"),
            None => write!(f, "Document(<anonymous>)"),
        }
    }
}

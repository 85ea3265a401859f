//! Execution results delivered by queries, subscriptions and mutations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An error entry reported alongside (or instead of) result data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    /// Human-readable message.
    pub message: String,
    /// Path to the field that failed, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    /// Server-specific extensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphQlError {
    /// Create an error with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extensions: None,
        }
    }
}

/// The outcome of executing a single operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Result data; may be present together with errors (partial data).
    #[serde(default)]
    pub data: Option<Value>,
    /// Errors reported by the server.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
}

impl ExecutionResult {
    /// A successful result carrying `data`.
    pub fn from_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A failed result carrying only errors.
    pub fn from_errors(errors: Vec<GraphQlError>) -> Self {
        Self { data: None, errors }
    }

    /// Attach an error to this result.
    pub fn with_error(mut self, error: GraphQlError) -> Self {
        self.errors.push(error);
        self
    }

    /// Returns true if the result carries one or more errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The data payload, or `null` when absent.
    pub fn data_or_null(&self) -> Value {
        self.data.clone().unwrap_or(Value::Null)
    }
}

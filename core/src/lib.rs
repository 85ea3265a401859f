//! Strata Core Types
//!
//! This crate provides the foundational types shared by every Strata crate:
//! - Query documents and variable bindings (Document, Variables)
//! - Root anchors and write descriptors (RootId, DataWrite)
//! - Inbound execution results (ExecutionResult, GraphQlError)
//! - The error type returned by user-supplied callbacks (CallbackError)

mod document;
mod result;
mod write;

pub use document::{Document, Variables};
pub use result::{ExecutionResult, GraphQlError};
pub use write::{DataWrite, RootId};

/// JSON value used for every payload crossing the cache boundary.
pub use serde_json::Value;

/// Error returned by user-supplied callbacks (updaters, update functions,
/// initializers).
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

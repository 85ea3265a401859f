//! Keyed payload storage shared by the base state, transactions and overlays.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};
use strata_core::{DataWrite, Document, RootId, Variables};

use crate::error::{CacheError, CacheResult};
use crate::proxy::DiffResult;

/// Identity of a stored payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct EntryKey {
    root: RootId,
    document: String,
    variables: String,
}

impl EntryKey {
    pub(crate) fn new(root: RootId, document: &Document, variables: &Variables) -> Self {
        let variables = canonical(&Value::Object(variables.clone())).to_string();
        Self {
            root,
            document: document.source().to_owned(),
            variables,
        }
    }
}

/// Rebuild `value` with every object's keys inserted in sorted order, so its
/// rendering is the same whether or not `serde_json` preserves insertion
/// order.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(fields) => {
            let sorted: BTreeMap<&String, Value> = fields
                .iter()
                .map(|(key, field)| (key, canonical(field)))
                .collect();
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(key, field)| (key.clone(), field))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}

/// One layer of stored payloads and local fields.
#[derive(Debug, Clone, Default)]
pub(crate) struct Snapshot {
    entries: HashMap<EntryKey, Value>,
    local: Map<String, Value>,
}

impl Snapshot {
    /// Store a write, replacing any previous payload under the same key.
    pub(crate) fn apply(&mut self, write: DataWrite) {
        let key = EntryKey::new(write.root_id, &write.document, &write.variables);
        self.entries.insert(key, write.result);
    }

    /// Merge top-level local fields.
    pub(crate) fn merge_local(&mut self, data: Value) -> CacheResult<()> {
        match data {
            Value::Object(fields) => {
                self.local.extend(fields);
                Ok(())
            }
            other => Err(CacheError::invalid_payload(format!(
                "local writes expect an object, got {other}"
            ))),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.local.is_empty()
    }
}

/// Find a stored payload, searching `stack` top-first.
pub(crate) fn lookup<'s>(stack: &[&'s Snapshot], key: &EntryKey) -> Option<&'s Value> {
    stack.iter().find_map(|snapshot| snapshot.entries.get(key))
}

/// Find a local field, searching `stack` top-first.
pub(crate) fn lookup_local<'s>(stack: &[&'s Snapshot], field: &str) -> Option<&'s Value> {
    stack.iter().find_map(|snapshot| snapshot.local.get(field))
}

/// Read a query payload from `stack`.
pub(crate) fn diff_stack(stack: &[&Snapshot], document: &Document, variables: &Variables) -> DiffResult {
    let key = EntryKey::new(RootId::Query, document, variables);
    match lookup(stack, &key) {
        Some(value) => DiffResult::complete(value.clone()),
        None => DiffResult::incomplete(Value::Null),
    }
}

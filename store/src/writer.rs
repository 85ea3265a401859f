//! Result writing for queries and subscriptions.
//!
//! Each function issues at most one cache write and reports whether it did.
//! Skipped results are not errors.

use serde_json::Value;
use strata_cache::{CacheResult, DataProxy};
use strata_core::{DataWrite, Document, ExecutionResult, RootId, Variables};
use tracing::debug;

/// Write a query result under `ROOT_QUERY`.
///
/// Fetch-more results are never written here. A result carrying errors is
/// written only when `ignore_errors` is set and it still has non-null data.
pub fn mark_query_result(
    cache: &mut dyn DataProxy,
    result: &ExecutionResult,
    document: &Document,
    variables: &Variables,
    fetch_more_for_query_id: Option<&str>,
    ignore_errors: bool,
) -> CacheResult<bool> {
    if let Some(query_id) = fetch_more_for_query_id {
        debug!(query_id, "fetch-more result left to the caller");
        return Ok(false);
    }

    let has_data = matches!(result.data, Some(ref data) if !data.is_null());
    if result.has_errors() && !(ignore_errors && has_data) {
        debug!(errors = result.errors.len(), "query result carries errors, not written");
        return Ok(false);
    }

    cache.write(DataWrite::new(
        RootId::Query,
        result.data_or_null(),
        document.clone(),
        variables.clone(),
    ))?;
    Ok(true)
}

/// Write a subscription result under `ROOT_SUBSCRIPTION` unless it carries
/// errors.
pub fn mark_subscription_result(
    cache: &mut dyn DataProxy,
    result: &ExecutionResult,
    document: &Document,
    variables: &Variables,
) -> CacheResult<bool> {
    if result.has_errors() {
        debug!(errors = result.errors.len(), "subscription result carries errors, not written");
        return Ok(false);
    }

    cache.write(DataWrite::new(
        RootId::Subscription,
        result.data_or_null(),
        document.clone(),
        variables.clone(),
    ))?;
    Ok(true)
}

/// Write an already computed query result under `ROOT_QUERY`, unchecked.
pub fn mark_update_query_result(
    cache: &mut dyn DataProxy,
    document: &Document,
    variables: &Variables,
    new_result: Value,
) -> CacheResult<()> {
    cache.write(DataWrite::new(
        RootId::Query,
        new_result,
        document.clone(),
        variables.clone(),
    ))
}

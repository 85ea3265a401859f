//! Query, subscription and local update writes.

use pretty_assertions::assert_eq;
use strata_tests::prelude::*;

fn store() -> DataStore<RecordingCache> {
    DataStore::new(RecordingCache::new())
}

fn query_write(data: Value) -> CacheOp {
    CacheOp::Write {
        scope: Scope::default(),
        root: RootId::Query,
        operation_name: Some("Feed".to_string()),
        data,
    }
}

#[test]
fn test_query_result_is_written_once_under_query_root() {
    // GIVEN
    let mut store = store();
    let variables = vars(json!({ "limit": 10 }));

    // WHEN
    let written = store
        .mark_query_result(&feed_with_likes(3), &feed_query(), &variables, None, false)
        .unwrap();

    // THEN
    assert!(written);
    assert_eq!(
        store.cache().ops(),
        vec![query_write(json!({ "feed": [{ "id": "p1", "likes": 3 }] }))]
    );
    assert_eq!(
        store
            .cache()
            .inner()
            .read(RootId::Query, &feed_query(), &variables, false),
        Some(&json!({ "feed": [{ "id": "p1", "likes": 3 }] }))
    );
}

#[test]
fn test_query_error_policy() {
    let with_data = feed_with_likes(3).with_error(GraphQlError::new("partial"));
    let without_data = failed("down");

    // (result, ignore_errors, expected writes)
    let cases = [
        (&with_data, false, 0),
        (&with_data, true, 1),
        (&without_data, false, 0),
        (&without_data, true, 0),
    ];

    for (result, ignore_errors, expected) in cases {
        let mut store = store();
        store
            .mark_query_result(result, &feed_query(), &Variables::new(), None, ignore_errors)
            .unwrap();
        assert_eq!(
            store.cache().writes().len(),
            expected,
            "ignore_errors={ignore_errors} data={:?}",
            result.data
        );
    }
}

#[test]
fn test_fetch_more_result_makes_no_cache_call() {
    let mut store = store();

    let written = store
        .mark_query_result(&feed_with_likes(3), &feed_query(), &Variables::new(), Some("q7"), false)
        .unwrap();

    assert!(!written);
    assert!(store.cache().ops().is_empty());
}

#[test]
fn test_subscription_result_is_written_under_subscription_root() {
    // GIVEN
    let mut store = store();
    let result = ExecutionResult::from_data(json!({ "likes": { "id": "p1", "likes": 9 } }));

    // WHEN
    store
        .mark_subscription_result(&result, &likes_subscription(), &Variables::new())
        .unwrap();
    store
        .mark_subscription_result(&failed("gone"), &likes_subscription(), &Variables::new())
        .unwrap();

    // THEN
    assert_eq!(
        store.cache().ops(),
        vec![CacheOp::Write {
            scope: Scope::default(),
            root: RootId::Subscription,
            operation_name: Some("Likes".to_string()),
            data: json!({ "likes": { "id": "p1", "likes": 9 } }),
        }]
    );
}

#[test]
fn test_update_query_result_overwrites_unconditionally() {
    let mut store = store();
    store
        .mark_query_result(&feed_with_likes(3), &feed_query(), &Variables::new(), None, false)
        .unwrap();

    store
        .mark_update_query_result(&feed_query(), &Variables::new(), json!({ "feed": [] }))
        .unwrap();

    assert_eq!(store.cache().writes().len(), 2);
    assert_eq!(
        store
            .cache()
            .inner()
            .read(RootId::Query, &feed_query(), &Variables::new(), false),
        Some(&json!({ "feed": [] }))
    );
}

#[test]
fn test_query_writes_are_keyed_by_variables() {
    let mut store = store();
    let first = vars(json!({ "limit": 1 }));
    let second = vars(json!({ "limit": 2 }));

    store
        .mark_query_result(&feed_with_likes(1), &feed_query(), &first, None, false)
        .unwrap();
    store
        .mark_query_result(&feed_with_likes(2), &feed_query(), &second, None, false)
        .unwrap();

    let cache = store.cache().inner();
    assert_eq!(
        cache.read(RootId::Query, &feed_query(), &first, false),
        Some(&json!({ "feed": [{ "id": "p1", "likes": 1 }] }))
    );
    assert_eq!(
        cache.read(RootId::Query, &feed_query(), &second, false),
        Some(&json!({ "feed": [{ "id": "p1", "likes": 2 }] }))
    );
}

//! Documents and results shared by the integration tests.

use serde_json::{json, Map, Value};
use strata_core::{Document, ExecutionResult, GraphQlError, Variables};

/// `query Feed`, the query most scenarios cache and update.
pub fn feed_query() -> Document {
    Document::named("query Feed($limit: Int) { feed(limit: $limit) { id likes } }", "Feed")
}

/// `mutation Like`, the mutation most scenarios apply.
pub fn like_mutation() -> Document {
    Document::named("mutation Like($id: ID!) { like(id: $id) { id likes } }", "Like")
}

/// `subscription Likes`.
pub fn likes_subscription() -> Document {
    Document::named("subscription Likes { likes { id likes } }", "Likes")
}

/// Build variables from a JSON object literal; anything else yields none.
pub fn vars(value: Value) -> Variables {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// A feed result holding one post with `likes` likes.
pub fn feed_with_likes(likes: i64) -> ExecutionResult {
    ExecutionResult::from_data(json!({ "feed": [{ "id": "p1", "likes": likes }] }))
}

/// A `like` payload reporting `likes` likes.
pub fn like_payload(likes: i64) -> Value {
    json!({ "like": { "id": "p1", "likes": likes } })
}

/// A result whose only content is one error.
pub fn failed(message: &str) -> ExecutionResult {
    ExecutionResult::from_errors(vec![GraphQlError::new(message)])
}

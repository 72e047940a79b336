//! HTTP-level integration tests for the groups endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};

#[tokio::test]
async fn groups_are_distinct_sorted_and_null_free() {
    let store = common::test_store();
    for (email, group) in [
        ("a@x.com", Some("Sales")),
        ("b@x.com", Some("Design")),
        ("c@x.com", Some("Sales")),
        ("d@x.com", None),
    ] {
        let body = match group {
            Some(group) => serde_json::json!({"name": "U", "email": email, "group": group}),
            None => serde_json::json!({"name": "U", "email": email}),
        };
        post_json(common::build_test_app(store.clone()), "/users", body).await;
    }

    let response = get(common::build_test_app(store), "/groups").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!(["Design", "Sales"])
    );
}

#[tokio::test]
async fn groups_on_empty_store_is_empty_list() {
    let response = get(common::build_test_app(common::test_store()), "/groups").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

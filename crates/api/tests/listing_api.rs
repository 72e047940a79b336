//! HTTP-level integration tests for the listing protocol.
//!
//! Covers the query-parameter contract: pagination math, clamping,
//! case-insensitive search and sort, and the degrade-not-reject policy
//! for malformed parameters.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use staffdir_core::store::UserStore;

/// Seed `count` users "User 001".."User NNN" with cycling groups.
async fn seed_users(store: &Arc<dyn UserStore>, count: usize) {
    let groups = [Some("Engineering"), Some("Design"), None];
    for i in 1..=count {
        let body = match groups[i % groups.len()] {
            Some(group) => serde_json::json!({
                "name": format!("User {i:03}"),
                "email": format!("user{i:03}@x.com"),
                "group": group,
            }),
            None => serde_json::json!({
                "name": format!("User {i:03}"),
                "email": format!("user{i:03}@x.com"),
            }),
        };
        let response = post_json(common::build_test_app(store.clone()), "/users", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

#[tokio::test]
async fn empty_listing_still_reports_one_page() {
    let store = common::test_store();
    let response = get(common::build_test_app(store), "/users?pageSize=12").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["items"], serde_json::json!([]));
    assert_eq!(json["total"], 0);
    assert_eq!(json["totalPages"], 1);
}

#[tokio::test]
async fn pagination_math_over_three_pages() {
    let store = common::test_store();
    seed_users(&store, 30).await;

    let json = body_json(get(common::build_test_app(store.clone()), "/users?pageSize=12").await).await;
    assert_eq!(json["items"].as_array().unwrap().len(), 12);
    assert_eq!(json["total"], 30);
    assert_eq!(json["totalPages"], 3);
    assert_eq!(json["page"], 1);

    let json = body_json(
        get(
            common::build_test_app(store),
            "/users?page=3&pageSize=12",
        )
        .await,
    )
    .await;
    assert_eq!(json["items"].as_array().unwrap().len(), 6);
    assert_eq!(json["page"], 3);
}

#[tokio::test]
async fn page_beyond_last_returns_empty_items_not_an_error() {
    let store = common::test_store();
    seed_users(&store, 5).await;

    let response = get(common::build_test_app(store), "/users?page=40").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["items"], serde_json::json!([]));
    assert_eq!(json["total"], 5);
}

#[tokio::test]
async fn malformed_page_and_page_size_degrade_to_defaults() {
    let store = common::test_store();
    seed_users(&store, 3).await;

    let response = get(
        common::build_test_app(store.clone()),
        "/users?page=abc&pageSize=xyz",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["page"], 1);
    assert_eq!(json["pageSize"], 12);

    // Oversized pageSize is clamped, not rejected.
    let json = body_json(
        get(common::build_test_app(store), "/users?pageSize=500").await,
    )
    .await;
    assert_eq!(json["pageSize"], 100);
}

#[tokio::test]
async fn search_is_case_insensitive() {
    let store = common::test_store();
    post_json(
        common::build_test_app(store.clone()),
        "/users",
        serde_json::json!({"name": "Anna", "email": "anna@x.com"}),
    )
    .await;
    post_json(
        common::build_test_app(store.clone()),
        "/users",
        serde_json::json!({"name": "Bo", "email": "bo@x.com"}),
    )
    .await;

    let json = body_json(get(common::build_test_app(store), "/users?search=ann").await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["name"], "Anna");
    assert_eq!(json["search"], "ann");
}

#[tokio::test]
async fn create_then_conflict_then_search_scenario() {
    let store = common::test_store();

    let response = post_json(
        common::build_test_app(store.clone()),
        "/users",
        serde_json::json!({"name": "Ann", "email": "a@x.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let ann = body_json(response).await;
    assert!(ann["id"].is_number());

    let response = post_json(
        common::build_test_app(store.clone()),
        "/users",
        serde_json::json!({"name": "Ben", "email": "a@x.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "EMAIL_EXISTS");

    let json = body_json(get(common::build_test_app(store), "/users?search=ann").await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["id"], ann["id"]);
}

#[tokio::test]
async fn sort_by_name_descending() {
    let store = common::test_store();
    for (name, email) in [("bob", "b@x.com"), ("Anna", "a@x.com"), ("carl", "c@x.com")] {
        post_json(
            common::build_test_app(store.clone()),
            "/users",
            serde_json::json!({"name": name, "email": email}),
        )
        .await;
    }

    let json = body_json(
        get(
            common::build_test_app(store),
            "/users?sortBy=name&sortDir=desc",
        )
        .await,
    )
    .await;
    let names: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["carl", "bob", "Anna"]);
    assert_eq!(json["sortBy"], "name");
    assert_eq!(json["sortDir"], "desc");
}

#[tokio::test]
async fn sort_by_group_places_null_groups_first_ascending() {
    let store = common::test_store();
    post_json(
        common::build_test_app(store.clone()),
        "/users",
        serde_json::json!({"name": "Grouped", "email": "g@x.com", "group": "Design"}),
    )
    .await;
    post_json(
        common::build_test_app(store.clone()),
        "/users",
        serde_json::json!({"name": "Groupless", "email": "n@x.com"}),
    )
    .await;

    let json = body_json(
        get(common::build_test_app(store), "/users?sortBy=group").await,
    )
    .await;
    assert_eq!(json["items"][0]["name"], "Groupless");
}

#[tokio::test]
async fn unrecognized_sort_by_degrades_to_insertion_order() {
    let store = common::test_store();
    for (name, email) in [("bob", "b@x.com"), ("Anna", "a@x.com")] {
        post_json(
            common::build_test_app(store.clone()),
            "/users",
            serde_json::json!({"name": name, "email": email}),
        )
        .await;
    }

    let response = get(
        common::build_test_app(store),
        "/users?sortBy=id&sortDir=desc",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["sortBy"].is_null());
    assert_eq!(json["sortDir"], "asc");
    assert_eq!(json["items"][0]["name"], "bob");
}

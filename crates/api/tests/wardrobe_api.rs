//! Integration tests for the add-item flow and wardrobe browsing.

mod common;

use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use common::{body_json, png_data_url};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: full add-item flow stores the processed item
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_item_flow_saves_analyzed_and_professionalized_item() {
    let app = common::build_test_app();
    app.gateway.queue_kinds(&["جينز"]);

    let opened = app.post_empty("/api/v1/intake").await;
    assert_eq!(opened.status(), StatusCode::CREATED);
    assert_eq!(body_json(opened).await["data"]["stage"], "awaiting_image");

    let processed = app
        .post("/api/v1/intake/process", json!({ "image": png_data_url() }))
        .await;
    assert_eq!(processed.status(), StatusCode::OK);
    let draft = body_json(processed).await["data"].clone();
    assert_eq!(draft["stage"], "reviewing");
    assert_eq!(draft["draft"]["type"], "جينز");
    assert_eq!(draft["draft"]["original_image"], png_data_url());
    assert_eq!(draft["draft"]["processed_image"], "data:image/png;base64,AQEB");

    let saved = app.post_empty("/api/v1/intake/save").await;
    assert_eq!(saved.status(), StatusCode::CREATED);
    let item = body_json(saved).await["data"].clone();
    assert_eq!(item["type"], "جينز");
    assert_eq!(item["category"], "bottoms");
    assert!(item["id"].is_i64());

    let closed = body_json(app.get("/api/v1/intake").await).await;
    assert!(closed["data"].is_null(), "saving closes the flow");

    let items = body_json(app.get("/api/v1/items").await).await;
    assert_eq!(items["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: draft edits are applied before saving
// ---------------------------------------------------------------------------

#[tokio::test]
async fn edited_draft_fields_are_saved() {
    let app = common::build_test_app();
    app.post_empty("/api/v1/intake").await;
    app.post("/api/v1/intake/process", json!({ "image": png_data_url() }))
        .await;

    let edited = app
        .patch(
            "/api/v1/intake/draft",
            json!({ "type": "جاكيت", "color": "رمادي" }),
        )
        .await;
    assert_eq!(edited.status(), StatusCode::OK);

    let item = body_json(app.post_empty("/api/v1/intake/save").await).await["data"].clone();
    assert_eq!(item["type"], "جاكيت");
    assert_eq!(item["color"], "رمادي");
    assert_eq!(item["style"], "كاجوال");
    assert_eq!(item["category"], "outerwear");
}

#[tokio::test]
async fn empty_draft_edit_is_bad_request() {
    let app = common::build_test_app();
    app.post_empty("/api/v1/intake").await;

    let response = app.patch("/api/v1/intake/draft", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: processing failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analysis_failure_returns_502_and_nothing_is_saved() {
    let app = common::build_test_app();
    app.gateway.fail_analyze.store(true, Ordering::SeqCst);
    app.post_empty("/api/v1/intake").await;

    let response = app
        .post("/api/v1/intake/process", json!({ "image": png_data_url() }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "GATEWAY_ERROR");

    let state = body_json(app.get("/api/v1/intake").await).await;
    assert_eq!(state["data"]["stage"], "awaiting_image");
    assert!(state["data"]["error"].is_string());

    let save = app.post_empty("/api/v1/intake/save").await;
    assert_eq!(save.status(), StatusCode::BAD_REQUEST);
    let items = body_json(app.get("/api/v1/items").await).await;
    assert!(items["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn non_image_upload_is_rejected() {
    let app = common::build_test_app();
    app.post_empty("/api/v1/intake").await;

    let response = app
        .post(
            "/api/v1/intake/process",
            json!({ "image": "data:text/plain;base64,aGVsbG8=" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn upload_without_open_flow_is_conflict() {
    let app = common::build_test_app();

    let response = app
        .post("/api/v1/intake/process", json!({ "image": png_data_url() }))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn discarding_draft_returns_to_image_selection() {
    let app = common::build_test_app();
    app.post_empty("/api/v1/intake").await;
    app.post("/api/v1/intake/process", json!({ "image": png_data_url() }))
        .await;

    let discarded = app.post_empty("/api/v1/intake/draft/discard").await;
    assert_eq!(discarded.status(), StatusCode::OK);
    let state = body_json(discarded).await;
    assert_eq!(state["data"]["stage"], "awaiting_image");
    assert!(state["data"]["draft"].is_null());
}

#[tokio::test]
async fn closing_the_flow_discards_the_draft() {
    let app = common::build_test_app();
    app.post_empty("/api/v1/intake").await;
    app.post("/api/v1/intake/process", json!({ "image": png_data_url() }))
        .await;

    let closed = app.delete("/api/v1/intake").await;
    assert_eq!(closed.status(), StatusCode::NO_CONTENT);

    let save = app.post_empty("/api/v1/intake/save").await;
    assert_eq!(save.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: browsing and removal
// ---------------------------------------------------------------------------

#[tokio::test]
async fn items_are_listed_in_insertion_order_with_categories() {
    let app = common::build_test_app();
    let shirt = app.add_item("قميص").await;
    let hat = app.add_item("قبعة").await;
    let boots = app.add_item("حذاء").await;

    let items = body_json(app.get("/api/v1/items").await).await["data"].clone();
    let ids: Vec<_> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].clone())
        .collect();
    assert_eq!(ids, vec![shirt["id"].clone(), hat["id"].clone(), boots["id"].clone()]);
    assert!(items[1]["category"].is_null(), "a hat fits no outfit slot");

    let buckets = body_json(app.get("/api/v1/items/categories").await).await["data"].clone();
    assert_eq!(buckets["tops"].as_array().unwrap().len(), 1);
    assert_eq!(buckets["shoes"].as_array().unwrap().len(), 1);
    assert!(buckets["bottoms"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn item_ids_are_unique_even_when_saved_back_to_back() {
    let app = common::build_test_app();
    let first = app.add_item("قميص").await;
    let second = app.add_item("قميص").await;

    assert_ne!(first["id"], second["id"]);
    assert!(second["id"].as_i64().unwrap() > first["id"].as_i64().unwrap());
}

#[tokio::test]
async fn get_item_by_id_and_unknown_id() {
    let app = common::build_test_app();
    let shirt = app.add_item("قميص").await;
    let id = shirt["id"].as_i64().unwrap();

    let found = app.get(&format!("/api/v1/items/{id}")).await;
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(body_json(found).await["data"]["type"], "قميص");

    let missing = app.get(&format!("/api/v1/items/{}", id + 1000)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn removing_items_is_idempotent() {
    let app = common::build_test_app();
    let shirt = app.add_item("قميص").await;
    let id = shirt["id"].as_i64().unwrap();

    assert_eq!(
        app.delete(&format!("/api/v1/items/{id}")).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.delete(&format!("/api/v1/items/{id}")).await.status(),
        StatusCode::NO_CONTENT
    );
    let items = body_json(app.get("/api/v1/items").await).await;
    assert!(items["data"].as_array().unwrap().is_empty());
}

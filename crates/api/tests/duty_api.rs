//! Integration tests for the `/api/v1/duties` resource.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use common::{body_bytes, body_json, delete, get, post_json, put_json, seeded_store, send_raw};
use duties_api::router::build_app_router;
use duties_api::services::DutyService;
use duties_api::state::AppState;
use duties_core::duty::{Duty, DutyInput, BASE_DUTIES_ROUTE};
use duties_core::error::{CoreError, CoreResult};
use duties_db::repositories::MemoryDutyDao;
use serde_json::json;

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_every_duty() {
    let app = common::build_test_app(seeded_store());
    let response = get(app, "/api/v1/duties").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        json!([
            {"id": "1", "name": "write unit tests"},
            {"id": "2", "name": "write documentation"},
        ])
    );
}

#[tokio::test]
async fn list_of_empty_store_is_an_empty_array() {
    let app = common::build_test_app(MemoryDutyDao::new());
    let json = body_json(get(app, "/api/v1/duties").await).await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn list_applies_offset_and_limit() {
    let store = seeded_store();

    let json = body_json(get(common::build_test_app(store.clone()), "/api/v1/duties?limit=1").await).await;
    assert_eq!(json, json!([{"id": "1", "name": "write unit tests"}]));

    let json = body_json(get(common::build_test_app(store.clone()), "/api/v1/duties?offset=1").await).await;
    assert_eq!(json, json!([{"id": "2", "name": "write documentation"}]));

    let json =
        body_json(get(common::build_test_app(store), "/api/v1/duties?offset=5&limit=1").await).await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn list_rejects_non_numeric_paging() {
    let response = get(common::build_test_app(seeded_store()), "/api/v1/duties?limit=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], 400);
    assert_eq!(json["message"], "limit must be a number");

    let response = get(common::build_test_app(seeded_store()), "/api/v1/duties?offset=x1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Get by id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_returns_the_duty() {
    let response = get(common::build_test_app(seeded_store()), "/api/v1/duties/2").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": "2", "name": "write documentation"})
    );
}

#[tokio::test]
async fn get_of_missing_duty_is_404() {
    let response = get(common::build_test_app(seeded_store()), "/api/v1/duties/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["status"], 404);
    assert_eq!(json["message"], "Duty with id 42 not found.");
}

#[tokio::test]
async fn get_with_overlong_id_is_400() {
    let uri = format!("/api/v1/duties/{}", "a".repeat(256));
    let response = get(common::build_test_app(seeded_store()), &uri).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Length of id is too long");
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_and_stores_the_duty() {
    let store = seeded_store();
    let response = put_json(
        common::build_test_app(store.clone()),
        "/api/v1/duties",
        json!({"name": "buy milk"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "buy milk");
    let id = json["id"].as_str().unwrap();
    assert!(!id.is_empty());

    assert_eq!(store.len().await, 3);
    let fetched = body_json(get(common::build_test_app(store), &format!("/api/v1/duties/{id}")).await).await;
    assert_eq!(fetched, json);
}

#[tokio::test]
async fn create_keeps_a_supplied_id() {
    let response = put_json(
        common::build_test_app(seeded_store()),
        "/api/v1/duties",
        json!({"id": "custom", "name": "mine"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await, json!({"id": "custom", "name": "mine"}));
}

#[tokio::test]
async fn create_without_name_is_400() {
    let store = seeded_store();
    for body in [json!({}), json!({"name": ""})] {
        let response = put_json(common::build_test_app(store.clone()), "/api/v1/duties", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Name is mandatory");
    }
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn create_with_overlong_name_is_400() {
    let response = put_json(
        common::build_test_app(seeded_store()),
        "/api/v1/duties",
        json!({"name": "n".repeat(256)}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Duty object is not valid!");
}

#[tokio::test]
async fn create_with_malformed_json_is_400() {
    let response = send_raw(
        common::build_test_app(seeded_store()),
        Method::PUT,
        "/api/v1/duties",
        "{\"name\": ",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], 400);
    assert!(json["message"].is_string());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_renames_the_duty() {
    let store = seeded_store();
    let response = post_json(
        common::build_test_app(store.clone()),
        "/api/v1/duties/1",
        json!({"name": "booo"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"id": "1", "name": "booo"}));
    assert_eq!(store.snapshot().await[0].name, "booo");
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn update_ignores_an_id_in_the_body() {
    let store = seeded_store();
    let response = post_json(
        common::build_test_app(store.clone()),
        "/api/v1/duties/1",
        json!({"id": "2", "name": "renamed"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let rows = store.snapshot().await;
    assert_eq!(rows[0].name, "renamed");
    assert_eq!(rows[1].name, "write documentation");
}

#[tokio::test]
async fn update_without_name_is_400() {
    let response = post_json(
        common::build_test_app(seeded_store()),
        "/api/v1/duties/1",
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "name is required");
}

#[tokio::test]
async fn update_of_missing_duty_is_404() {
    let response = post_json(
        common::build_test_app(seeded_store()),
        "/api/v1/duties/ghost",
        json!({"name": "boo"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_returns_204_and_removes_the_duty() {
    let store = seeded_store();
    let response = delete(common::build_test_app(store.clone()), "/api/v1/duties/2").await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());
    assert_eq!(store.len().await, 1);

    let response = get(common::build_test_app(store), "/api/v1/duties/2").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_missing_duty_is_404() {
    let store = seeded_store();
    let response = delete(common::build_test_app(store.clone()), "/api/v1/duties/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Missing duty with id 42");
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn delete_with_overlong_id_is_400() {
    let uri = format!("/api/v1/duties/{}", "a".repeat(256));
    let response = delete(common::build_test_app(seeded_store()), &uri).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

#[tokio::test]
async fn time_returns_current_date() {
    let response = get(common::build_test_app(MemoryDutyDao::new()), "/api/v1/time").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let date = json["currentDate"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok());
}

#[tokio::test]
async fn duties_are_served_at_the_shared_base_route() {
    let response = get(common::build_test_app(seeded_store()), BASE_DUTIES_ROUTE).await;
    assert_eq!(response.status(), StatusCode::OK);

    let uri = format!("{BASE_DUTIES_ROUTE}/1");
    let response = get(common::build_test_app(seeded_store()), &uri).await;
    assert_eq!(body_json(response).await["name"], "write unit tests");
}

// ---------------------------------------------------------------------------
// Slow storage
// ---------------------------------------------------------------------------

/// Service whose delete takes a while before it commits.
struct SlowDelete {
    committed: Arc<AtomicBool>,
}

#[async_trait]
impl DutyService for SlowDelete {
    async fn get_duties(&self, _offset: i64, _limit: i64) -> CoreResult<Vec<Duty>> {
        Ok(Vec::new())
    }

    async fn get_duty(&self, id: &str) -> CoreResult<Duty> {
        Err(CoreError::not_found(format!("Duty with id {id} not found.")))
    }

    async fn create_duty(&self, _input: DutyInput) -> CoreResult<Duty> {
        Err(CoreError::bad_request("read only"))
    }

    async fn update_duty(&self, _input: DutyInput) -> CoreResult<Duty> {
        Err(CoreError::bad_request("read only"))
    }

    async fn delete_duty(&self, _id: &str) -> CoreResult<()> {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        self.committed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn is_storage_healthy(&self) -> bool {
        true
    }
}

#[tokio::test]
async fn slow_delete_runs_to_completion() {
    let committed = Arc::new(AtomicBool::new(false));
    let state = AppState {
        duties: Arc::new(SlowDelete {
            committed: Arc::clone(&committed),
        }),
    };
    let app = build_app_router(state, &common::test_config());

    let response = delete(app, "/api/v1/duties/1").await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(committed.load(Ordering::SeqCst));
}

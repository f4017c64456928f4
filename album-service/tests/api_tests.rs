//! Integration tests for album-service API endpoints
//!
//! Tests cover:
//! - Album CRUD endpoints and their status codes
//! - Partial update semantics
//! - Error bodies (`{"error": ...}`) for 400/404/500
//! - Health endpoints

use album_service::{build_router, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: in-memory store with the albums table
///
/// A single connection keeps every query on the same in-memory database.
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should create in-memory database");
    album_service::db::create_albums_table(&pool)
        .await
        .expect("Should create albums table");
    pool
}

/// Test helper: Create app over the given pool
fn setup_app(db: SqlitePool) -> Router {
    build_router(AppState::new(db))
}

/// Test helper: Create request without body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Create request with JSON body
fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Send request, return status and JSON body
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Should parse JSON")
    };
    (status, body)
}

/// Test helper: Create an album and return its id
async fn create(app: &Router, body: Value) -> String {
    let (status, created) = send(app, json_request("POST", "/api/albums", &body.to_string())).await;
    assert_eq!(status, StatusCode::CREATED);
    created["id"].as_str().expect("id should be a string").to_string()
}

// =============================================================================
// Health Endpoints
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(setup_test_db().await);

    let (status, body) = send(&app, test_request("GET", "/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "album-service");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_root_health_text() {
    let app = setup_app(setup_test_db().await);

    let response = app.oneshot(test_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("/api/albums"));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = setup_app(setup_test_db().await);

    let (status, body) = send(&app, test_request("GET", "/api/artists")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

// =============================================================================
// Create / Read / Delete Lifecycle
// =============================================================================

#[tokio::test]
async fn test_album_lifecycle() {
    let app = setup_app(setup_test_db().await);

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/albums",
            r#"{"title": "OK Computer", "artist": "Radiohead", "year": 1997}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["title"], "OK Computer");
    assert_eq!(created["artist"], "Radiohead");
    assert_eq!(created["year"], 1997);

    let (status, fetched) = send(&app, test_request("GET", &format!("/api/albums/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id.as_str());
    assert_eq!(fetched["title"], "OK Computer");
    assert_eq!(fetched["artist"], "Radiohead");
    assert_eq!(fetched["year"], 1997);

    let (status, deleted) =
        send(&app, test_request("DELETE", &format!("/api/albums/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Deleted successfully");

    let (status, missing) = send(&app, test_request("GET", &format!("/api/albums/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["error"], "Not found");
}

#[tokio::test]
async fn test_create_without_year_omits_field() {
    let app = setup_app(setup_test_db().await);

    let (status, created) = send(
        &app,
        json_request("POST", "/api/albums", r#"{"title": "Blue", "artist": "Joni Mitchell"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("year").is_none());
}

#[tokio::test]
async fn test_create_accepts_year_text_from_forms() {
    let app = setup_app(setup_test_db().await);

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/albums",
            r#"{"title": "Blue", "artist": "Joni Mitchell", "year": "1971"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["year"], 1971);
}

#[tokio::test]
async fn test_create_trims_text_fields() {
    let app = setup_app(setup_test_db().await);

    let (_, created) = send(
        &app,
        json_request("POST", "/api/albums", r#"{"title": "  Blue ", "artist": " Joni Mitchell"}"#),
    )
    .await;

    assert_eq!(created["title"], "Blue");
    assert_eq!(created["artist"], "Joni Mitchell");
}

// =============================================================================
// Create Validation
// =============================================================================

#[tokio::test]
async fn test_create_missing_title() {
    let app = setup_app(setup_test_db().await);

    let (status, body) =
        send(&app, json_request("POST", "/api/albums", r#"{"artist": "Unknown"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn test_create_rejects_bad_payloads() {
    let app = setup_app(setup_test_db().await);

    let cases = [
        r#"{"title": "", "artist": "Radiohead"}"#,
        r#"{"title": "Kid A"}"#,
        r#"{"title": "Kid A", "artist": "Radiohead", "year": 1899}"#,
        r#"{"title": "Kid A", "artist": "Radiohead", "year": 2101}"#,
        r#"{"title": "Kid A", "artist": "Radiohead", "year": "two thousand"}"#,
        r#"{"title": "Kid A", "artist": "Radiohead", "genre": "rock"}"#,
        r#"{"title": "Kid A", "artist": "#,
        r#"[]"#,
    ];

    for payload in cases {
        let (status, body) = send(&app, json_request("POST", "/api/albums", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
        assert!(body["error"].is_string(), "payload: {}", payload);
    }

    // Nothing was written
    let (_, list) = send(&app, test_request("GET", "/api/albums")).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_after_creates_and_deletes() {
    let app = setup_app(setup_test_db().await);

    let (status, list) = send(&app, test_request("GET", "/api/albums")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    let mut ids = Vec::new();
    for n in 0..5 {
        ids.push(create(&app, json!({"title": format!("Album {}", n), "artist": "Artist"})).await);
    }
    for id in &ids[..2] {
        let (status, _) = send(&app, test_request("DELETE", &format!("/api/albums/{}", id))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, list) = send(&app, test_request("GET", "/api/albums")).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(listed.len(), 3);
    for id in &ids[2..] {
        assert!(listed.contains(&id.as_str()));
    }
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_partial_preserves_other_fields() {
    let app = setup_app(setup_test_db().await);
    let id = create(&app, json!({"title": "Kid A", "artist": "Radiohead"})).await;

    let (status, updated) = send(
        &app,
        json_request("PUT", &format!("/api/albums/{}", id), r#"{"year": 2000}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["title"], "Kid A");
    assert_eq!(updated["artist"], "Radiohead");
    assert_eq!(updated["year"], 2000);

    let (_, fetched) = send(&app, test_request("GET", &format!("/api/albums/{}", id))).await;
    assert_eq!(fetched["year"], 2000);
    assert_eq!(fetched["title"], "Kid A");
}

#[tokio::test]
async fn test_update_full_replacement() {
    let app = setup_app(setup_test_db().await);
    let id = create(&app, json!({"title": "Kid A", "artist": "Radiohead", "year": 2000})).await;

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/albums/{}", id),
            r#"{"title": "Blue", "artist": "Joni Mitchell", "year": 1971}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Blue");
    assert_eq!(updated["artist"], "Joni Mitchell");
    assert_eq!(updated["year"], 1971);
}

#[tokio::test]
async fn test_update_null_year_clears_it() {
    let app = setup_app(setup_test_db().await);
    let id = create(&app, json!({"title": "Kid A", "artist": "Radiohead", "year": 2000})).await;

    let (status, updated) = send(
        &app,
        json_request("PUT", &format!("/api/albums/{}", id), r#"{"year": null}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(updated.get("year").is_none());
}

#[tokio::test]
async fn test_update_invalid_result_is_400() {
    let app = setup_app(setup_test_db().await);
    let id = create(&app, json!({"title": "Kid A", "artist": "Radiohead"})).await;
    let uri = format!("/api/albums/{}", id);

    for payload in [
        r#"{"title": ""}"#,
        r#"{"artist": null}"#,
        r#"{"year": 1800}"#,
        r#"{"label": "Parlophone"}"#,
        r#"not json"#,
    ] {
        let (status, body) = send(&app, json_request("PUT", &uri, payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
        assert!(body["error"].is_string());
    }

    let (_, fetched) = send(&app, test_request("GET", &uri)).await;
    assert_eq!(fetched["title"], "Kid A");
    assert_eq!(fetched["artist"], "Radiohead");
}

#[tokio::test]
async fn test_update_bad_id_is_404_regardless_of_body() {
    let app = setup_app(setup_test_db().await);
    let unknown = uuid::Uuid::new_v4();

    for uri in [
        "/api/albums/bad-id".to_string(),
        format!("/api/albums/{}", unknown),
    ] {
        for payload in [r#"{"title": "Kid A"}"#, r#"{"title": ""}"#, r#"{{{"#, "{}"] {
            let (status, body) = send(&app, json_request("PUT", &uri, payload)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "uri: {} payload: {}", uri, payload);
            assert_eq!(body["error"], "Not found");
        }
    }
}

// =============================================================================
// Read / Delete Unknown Ids
// =============================================================================

#[tokio::test]
async fn test_get_unknown_ids() {
    let app = setup_app(setup_test_db().await);

    for uri in [
        "/api/albums/bad-id".to_string(),
        "/api/albums/507f1f77bcf86cd799439011".to_string(),
        format!("/api/albums/{}", uuid::Uuid::new_v4()),
    ] {
        let (status, body) = send(&app, test_request("GET", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri: {}", uri);
        assert_eq!(body["error"], "Not found");
    }
}

#[tokio::test]
async fn test_delete_twice_is_404() {
    let app = setup_app(setup_test_db().await);
    let id = create(&app, json!({"title": "Blue", "artist": "Joni Mitchell"})).await;
    let uri = format!("/api/albums/{}", id);

    let (status, _) = send(&app, test_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, test_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

// =============================================================================
// Store Failures
// =============================================================================

#[tokio::test]
async fn test_store_failure_is_500() {
    let db = setup_test_db().await;
    let app = setup_app(db.clone());
    db.close().await;

    let (status, body) = send(&app, test_request("GET", "/api/albums")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        test_request("DELETE", &format!("/api/albums/{}", uuid::Uuid::new_v4())),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{mint_token, TestApp};
use employee_forms::api::{self, AppState};
use employee_forms::config::AppConfig;
use employee_forms::database::PgStore;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn public_routes_need_no_token() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["store"], "memory");
}

#[tokio::test]
async fn health_reports_unreachable_store_as_503() {
    // Nothing listens on port 1, so the lazy pool fails its first checkout
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy("postgres://nobody@127.0.0.1:1/employees")
        .unwrap();
    let state = AppState::new(Arc::new(PgStore::new(pool)), common::SECRET);
    let app = api::app(state, &AppConfig::testing());

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = common::body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
    assert_eq!(body["message"], "postgres store unavailable");
}

#[tokio::test]
async fn api_rejects_missing_token() {
    let app = TestApp::new();

    for uri in ["/api/forms", "/api/employees", "/api/employees/statistics"] {
        let (status, body) = app.request(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn api_rejects_token_signed_with_other_secret() {
    let app = TestApp::new();
    let forged = mint_token(Uuid::new_v4(), "mallory", "not-the-secret");

    let (status, _) = app.request(Method::GET, "/api/forms", None, Some(&forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn created_data_is_attributed_to_token_user() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/forms",
            serde_json::json!({ "name": "Staff", "fields_config": common::staff_fields() }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["created_by"], "hr-admin");

    let form_id = body["data"]["id"].as_i64().unwrap();
    let other = mint_token(Uuid::new_v4(), "clerk", common::SECRET);
    let (status, body) = app
        .request(
            Method::POST,
            "/api/employees",
            Some(serde_json::json!({ "form_id": form_id, "employee_data": {"full_name": "Ada"} })),
            Some(&other),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["created_by"], "clerk");
    assert_eq!(body["data"]["form"]["created_by"], "hr-admin");
}

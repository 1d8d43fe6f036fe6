//! Shared helpers: the full router over a fresh in-memory store, driven with
//! `tower::ServiceExt::oneshot`.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use employee_forms::api::{self, AppState};
use employee_forms::auth::{generate_jwt, Claims};
use employee_forms::config::AppConfig;
use employee_forms::database::MemoryStore;

pub const SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub token: String,
    pub user_id: Uuid,
}

impl TestApp {
    pub fn new() -> Self {
        let config = AppConfig::testing();
        let state = AppState::new(Arc::new(MemoryStore::new()), SECRET);
        let user_id = Uuid::new_v4();
        let token = mint_token(user_id, "hr-admin", SECRET);

        Self {
            router: api::app(state, &config),
            token,
            user_id,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        (status, body_json(response).await)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, Some(&self.token)).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), Some(&self.token)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body), Some(&self.token)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body), Some(&self.token)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None, Some(&self.token)).await
    }

    /// Create a template and return its id
    pub async fn create_form(&self, name: &str, fields: Value) -> i64 {
        let (status, body) = self
            .post("/api/forms", json!({ "name": name, "fields_config": fields }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create form failed: {}", body);
        body["data"]["id"].as_i64().unwrap()
    }

    /// Create an employee and return its id
    pub async fn create_employee(&self, form_id: i64, data: Value) -> i64 {
        let (status, body) = self
            .post("/api/employees", json!({ "form_id": form_id, "employee_data": data }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create employee failed: {}", body);
        body["data"]["id"].as_i64().unwrap()
    }
}

pub fn mint_token(user_id: Uuid, username: &str, secret: &str) -> String {
    generate_jwt(&Claims::new(user_id, username.to_string(), 1), secret).unwrap()
}

/// The field list used by most scenarios
pub fn staff_fields() -> Value {
    json!([
        {"name": "full_name", "type": "text", "label": "Full name"},
        {"name": "pay", "type": "number", "label": "Pay"}
    ])
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

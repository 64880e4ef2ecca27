//! Shared setup for staff-directory HTTP tests.
//!
//! The upstream identity and data API is replaced by a wiremock server.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use secrecy::Secret;
use serde_json::{json, Value};
use staff_directory::config::UpstreamSettings;
use staff_directory::startup::build_router;
use staff_directory::AppState;
use tower::util::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USER_TOKEN: &str = "user-token";
pub const ANON_KEY: &str = "anon-key";
pub const SERVICE_KEY: &str = "service-key";
pub const SUBJECT: &str = "7f1c2a9e-0000-4000-8000-000000000001";

pub fn app_for(server: &MockServer) -> Router {
    let settings = UpstreamSettings {
        url: server.uri(),
        anon_key: Secret::new(ANON_KEY.to_string()),
        service_role_key: Secret::new(SERVICE_KEY.to_string()),
    };
    build_router(AppState::new(Ok(settings)))
}

pub async fn get_users(app: Router, authorization: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().method("GET").uri("/users");
    if let Some(value) = authorization {
        request = request.header("Authorization", value);
    }
    send(app, request.body(Body::empty()).unwrap()).await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn bearer() -> String {
    format!("Bearer {}", USER_TOKEN)
}

/// Session check succeeds for `USER_TOKEN` and resolves to `SUBJECT`.
pub async fn mount_identity(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("apikey", ANON_KEY))
        .and(header("authorization", format!("Bearer {}", USER_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": SUBJECT,
            "email": "caller@example.com",
            "aud": "authenticated"
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Profile lookup for `SUBJECT` answering with `rows`.
pub async fn mount_profile(server: &MockServer, rows: Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(header("apikey", SERVICE_KEY))
        .and(header("authorization", format!("Bearer {}", SERVICE_KEY).as_str()))
        .and(query_param("select", "id,role,branch_id"))
        .and(query_param("id", format!("eq.{}", SUBJECT).as_str()))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .expect(1)
        .mount(server)
        .await;
}

/// The user listing must not be requested at all.
pub async fn forbid_user_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(server)
        .await;
}

/// The branch listing must not be requested at all.
pub async fn forbid_branch_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/branches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(server)
        .await;
}

pub async fn mount_branches(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/branches"))
        .and(header("apikey", SERVICE_KEY))
        .and(query_param("select", "id,name"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

pub fn user_row(id: &str, role: &str, branch_id: Option<&str>, created_at: &str) -> Value {
    json!({
        "id": id,
        "username": format!("user-{}", id),
        "email": format!("{}@example.com", id),
        "full_name": null,
        "role": role,
        "receives_transportation": false,
        "created_at": created_at,
        "branch_id": branch_id,
    })
}

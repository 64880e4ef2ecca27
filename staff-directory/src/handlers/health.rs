use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let upstream = if state.backend().is_ok() {
        "configured"
    } else {
        "missing"
    };

    Json(json!({
        "status": "ok",
        "service": "staff-directory",
        "version": env!("CARGO_PKG_VERSION"),
        "upstream": upstream,
    }))
}

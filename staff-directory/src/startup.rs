use axum::{middleware::from_fn, routing::get, Router};
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    health::health_check,
    metrics::metrics,
    users::{list_users, method_not_allowed},
};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        // `get` would also answer HEAD by running the full listing flow.
        .route(
            "/users",
            get(list_users)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        // Outermost so the trace span already sees the generated request id.
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

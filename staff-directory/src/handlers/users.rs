use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;
use service_core::error::AppError;

use crate::middleware::bearer_token;
use crate::models::UserView;
use crate::services::{directory, enrichment};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserView>,
}

/// `GET /users`: the listing the caller's role allows, decorated with branch names.
#[tracing::instrument(
    name = "list_users",
    skip_all,
    fields(subject = tracing::field::Empty, scope = tracing::field::Empty)
)]
pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UsersResponse>, AppError> {
    let backend = state.backend()?;
    let token = bearer_token(&headers)?;

    let subject = directory::authenticate(backend, token).await?;
    tracing::Span::current().record("subject", subject.as_str());

    let scope = directory::authorize(backend, &subject).await?;
    tracing::Span::current().record("scope", tracing::field::debug(&scope));

    let users = directory::visible_users(backend, &scope).await?;
    let users = enrichment::with_branch_names(backend, users).await;

    tracing::info!(count = users.len(), "Listed users");
    Ok(Json(UsersResponse { users }))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

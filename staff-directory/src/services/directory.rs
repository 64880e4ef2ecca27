//! Authentication, authorization and the scoped user listing.

use service_core::error::AppError;

use super::backend_client::{BackendClient, UpstreamError};
use crate::models::{CallerProfile, CallerRole, UserRecord, UserScope};

/// Subject id of the session behind `access_token`.
pub async fn authenticate(backend: &BackendClient, access_token: &str) -> Result<String, AppError> {
    let user = backend
        .current_user(access_token)
        .await
        .map_err(|e| match &e {
            UpstreamError::Status { status, .. } => {
                tracing::debug!(%status, "Identity provider rejected token");
                AppError::Unauthorized("Invalid or expired token".to_string())
            }
            UpstreamError::Decode { .. } => {
                tracing::warn!(error = %e, "Identity provider returned an unreadable user");
                AppError::Unauthorized("Invalid user payload".to_string())
            }
            UpstreamError::Transport { .. } => {
                tracing::error!(error = %e, "Identity provider unreachable");
                AppError::Upstream("Failed to verify token".to_string())
            }
        })?;

    user.subject()
        .map(str::to_string)
        .ok_or_else(|| AppError::Unauthorized("Invalid user payload".to_string()))
}

/// Load the caller's profile and derive what they may list.
pub async fn authorize(backend: &BackendClient, subject: &str) -> Result<UserScope, AppError> {
    let profile = backend
        .fetch_profile(subject)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Profile lookup failed");
            AppError::Upstream(format!("Failed to load profile: {}", upstream_detail(&e)))
        })?
        .ok_or_else(|| AppError::Forbidden("Profile not found".to_string()))?;

    scope_for(&profile)
}

pub fn scope_for(profile: &CallerProfile) -> Result<UserScope, AppError> {
    match profile.caller_role() {
        CallerRole::Admin => Ok(UserScope::All),
        CallerRole::BranchAdmin => profile
            .branch_id
            .clone()
            .filter(|id| !id.is_empty())
            .map(UserScope::Branch)
            .ok_or_else(|| {
                tracing::error!(profile_id = %profile.id, "Branch admin profile has no branch");
                AppError::DataIntegrity("Branch admin has no branch assigned".to_string())
            }),
        CallerRole::Other(role) => {
            tracing::info!(profile_id = %profile.id, %role, "Role may not list users");
            Err(AppError::Forbidden("Insufficient permissions".to_string()))
        }
    }
}

/// Users visible within `scope`, newest first.
pub async fn visible_users(
    backend: &BackendClient,
    scope: &UserScope,
) -> Result<Vec<UserRecord>, AppError> {
    let mut users = backend.list_users(scope).await.map_err(|e| {
        tracing::error!(error = %e, "User listing failed");
        AppError::Upstream(format!("Failed to fetch users: {}", upstream_detail(&e)))
    })?;

    let fetched = users.len();
    users.retain(|user| scope.permits(user));
    if users.len() != fetched {
        tracing::warn!(
            dropped = fetched - users.len(),
            "Upstream returned rows outside the caller's scope"
        );
    }

    Ok(users)
}

/// Client-facing part of an upstream failure. Upstream URLs stay in the logs.
fn upstream_detail(err: &UpstreamError) -> String {
    match err {
        UpstreamError::Status { body, .. } if !body.is_empty() => body.clone(),
        UpstreamError::Status { status, .. } => format!("upstream answered {}", status),
        UpstreamError::Transport { .. } => "upstream unreachable".to_string(),
        UpstreamError::Decode { .. } => "unexpected upstream payload".to_string(),
    }
}

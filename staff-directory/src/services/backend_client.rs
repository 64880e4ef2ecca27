//! Client for the hosted identity and data API.
//!
//! Three call shapes are used: the session check (`/auth/v1/user`, caller token
//! plus public key) and filtered or unfiltered table reads (`/rest/v1/<table>`,
//! privileged key) using `column=eq.value` filters and `column.desc` ordering.

use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use service_core::observability::TracedClientExt;
use thiserror::Error;

use crate::config::UpstreamSettings;
use crate::models::{Branch, CallerProfile, CurrentUser, UserRecord, UserScope};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("unexpected payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub struct BackendClient {
    client: Client,
    settings: UpstreamSettings,
}

impl BackendClient {
    pub fn new(settings: UpstreamSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Resolve the session behind a caller's bearer token.
    pub async fn current_user(&self, access_token: &str) -> Result<CurrentUser, UpstreamError> {
        let url = format!("{}/auth/v1/user", self.settings.url);

        let response = self
            .client
            .traced_get(&url)
            .header("apikey", self.settings.anon_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                url: url.clone(),
                source,
            })?;

        decode(url, response).await
    }

    /// The caller's profile row, if one exists.
    pub async fn fetch_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<CallerProfile>, UpstreamError> {
        let rows: Vec<CallerProfile> = self
            .select(
                "profiles",
                &[
                    ("select", "id,role,branch_id".to_string()),
                    ("id", format!("eq.{}", user_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        Ok(rows.into_iter().next())
    }

    /// User listing, newest first, restricted server-side to `scope`.
    pub async fn list_users(&self, scope: &UserScope) -> Result<Vec<UserRecord>, UpstreamError> {
        let mut query = vec![
            ("select", UserRecord::COLUMNS.to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        query.extend(scope.filters());

        self.select("profiles", &query).await
    }

    pub async fn list_branches(&self) -> Result<Vec<Branch>, UpstreamError> {
        self.select("branches", &[("select", Branch::COLUMNS.to_string())])
            .await
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, UpstreamError> {
        let url = format!("{}/rest/v1/{}", self.settings.url, table);
        let key = self.settings.service_role_key.expose_secret();

        let response = self
            .client
            .traced_get(&url)
            .header("apikey", key)
            .bearer_auth(key)
            .query(query)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                url: url.clone(),
                source,
            })?;

        decode(url, response).await
    }
}

async fn decode<T: DeserializeOwned>(
    url: String,
    response: reqwest::Response,
) -> Result<T, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status { url, status, body });
    }

    response
        .json()
        .await
        .map_err(|source| UpstreamError::Decode { url, source })
}

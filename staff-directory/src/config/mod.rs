use secrecy::Secret;
use service_core::config::{Config as ServerConfig, EnvKey};
use service_core::error::AppError;
use thiserror::Error;

pub const UPSTREAM_URL: EnvKey = EnvKey::new(&["SUPABASE_URL", "VITE_SUPABASE_URL"]);

pub const UPSTREAM_ANON_KEY: EnvKey = EnvKey::new(&["SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"]);

pub const UPSTREAM_SERVICE_KEY: EnvKey =
    EnvKey::new(&["SUPABASE_SERVICE_ROLE_KEY", "SERVICE_ROLE_KEY"]);

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    /// Kept as a result: a missing upstream setting rejects requests, it does not stop the server.
    pub upstream: Result<UpstreamSettings, MissingSettings>,
}

/// Coordinates of the hosted identity and data API.
#[derive(Debug, Clone)]
pub struct UpstreamSettings {
    /// Base URL without a trailing slash.
    pub url: String,
    /// Public key; only ever used for the caller's own session check.
    pub anon_key: Secret<String>,
    /// Privileged key for table reads that must bypass row-level policies.
    pub service_role_key: Secret<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("missing upstream settings: {}", .0.join(", "))]
pub struct MissingSettings(pub Vec<&'static str>);

impl UpstreamSettings {
    pub fn from_env() -> Result<Self, MissingSettings> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// All three settings or the list of those that could not be found.
    pub fn resolve<F>(lookup: F) -> Result<Self, MissingSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = UPSTREAM_URL.resolve(&lookup);
        let anon_key = UPSTREAM_ANON_KEY.resolve(&lookup);
        let service_role_key = UPSTREAM_SERVICE_KEY.resolve(&lookup);

        match (url, anon_key, service_role_key) {
            (Some(url), Some(anon_key), Some(service_role_key)) => Ok(Self {
                url: url.trim_end_matches('/').to_string(),
                anon_key: Secret::new(anon_key),
                service_role_key: Secret::new(service_role_key),
            }),
            (url, anon_key, service_role_key) => {
                let missing = [
                    (url.is_none(), UPSTREAM_URL),
                    (anon_key.is_none(), UPSTREAM_ANON_KEY),
                    (service_role_key.is_none(), UPSTREAM_SERVICE_KEY),
                ]
                .into_iter()
                .filter(|(absent, _)| *absent)
                .map(|(_, key)| key.primary())
                .collect();
                Err(MissingSettings(missing))
            }
        }
    }
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let server = ServerConfig::load()?;

    Ok(Settings {
        server,
        log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        otlp_endpoint: std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .filter(|v| !v.is_empty()),
        upstream: UpstreamSettings::from_env(),
    })
}

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use config::{MissingSettings, UpstreamSettings};
use service_core::error::AppError;
use services::BackendClient;
use std::sync::Arc;

/// Shared application state: the upstream client, or why it could not be built.
#[derive(Clone)]
pub struct AppState {
    backend: Arc<Result<BackendClient, MissingSettings>>,
}

impl AppState {
    pub fn new(upstream: Result<UpstreamSettings, MissingSettings>) -> Self {
        Self {
            backend: Arc::new(upstream.map(BackendClient::new)),
        }
    }

    /// The upstream client; a configuration error while settings are incomplete.
    pub fn backend(&self) -> Result<&BackendClient, AppError> {
        match &*self.backend {
            Ok(backend) => Ok(backend),
            Err(missing) => Err(AppError::ConfigError(anyhow::Error::new(missing.clone()))),
        }
    }
}

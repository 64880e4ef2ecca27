use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

pub mod env;

pub use env::{EnvKey, resolve_first};

/// Listener settings shared by every HTTP binary in the workspace.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Reads `configuration.{yaml,toml,json}` when present, then `APP_HOST` / `APP_PORT`.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        if config.port == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "APP_PORT must be greater than 0"
            )));
        }

        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

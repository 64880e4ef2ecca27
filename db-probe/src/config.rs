//! Connection settings for the probe, read from the environment on every run.

use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_DATABASE: &str = "app_db";
pub const DEFAULT_USER: &str = "postgres";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DB_PORT must be a port number, got {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub enum ConnectionTarget {
    /// A full connection string from `DATABASE_URL`.
    Url(Secret<String>),
    Discrete {
        host: String,
        port: u16,
        database: String,
        user: String,
        password: Secret<String>,
    },
}

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub target: ConnectionTarget,
    /// TLS is only requested for a connection string in production.
    pub ssl: bool,
}

/// Settings that are safe to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSummary {
    pub from_url: bool,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub ssl: bool,
}

impl ProbeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    pub fn resolve<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let production = get("NODE_ENV").is_some_and(|env| env.trim() == "production");

        if let Some(url) = get("DATABASE_URL") {
            return Ok(Self {
                target: ConnectionTarget::Url(Secret::new(url)),
                ssl: production,
            });
        }

        let port = match get("DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            target: ConnectionTarget::Discrete {
                host: get("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
                database: get("DB_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
                user: get("DB_USER").unwrap_or_else(|| DEFAULT_USER.to_string()),
                password: Secret::new(lookup("DB_PASSWORD").unwrap_or_default()),
            },
            ssl: false,
        })
    }

    pub fn ssl_mode(&self) -> PgSslMode {
        if self.ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Disable
        }
    }

    /// Driver options; fails only for a malformed connection string.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options = match &self.target {
            ConnectionTarget::Url(url) => PgConnectOptions::from_str(url.expose_secret())?,
            ConnectionTarget::Discrete {
                host,
                port,
                database,
                user,
                password,
            } => PgConnectOptions::new()
                .host(host)
                .port(*port)
                .database(database)
                .username(user)
                .password(password.expose_secret()),
        };

        Ok(options.ssl_mode(self.ssl_mode()))
    }

    /// Non-secret view of the settings; `None` when the connection string does not parse.
    pub fn summary(&self) -> Option<ConfigSummary> {
        let summary = match &self.target {
            ConnectionTarget::Url(_) => {
                let options = self.connect_options().ok()?;
                ConfigSummary {
                    from_url: true,
                    host: options.get_host().to_string(),
                    port: options.get_port(),
                    database: options.get_database().unwrap_or_default().to_string(),
                    user: options.get_username().to_string(),
                    ssl: self.ssl,
                }
            }
            ConnectionTarget::Discrete {
                host,
                port,
                database,
                user,
                ..
            } => ConfigSummary {
                from_url: false,
                host: host.clone(),
                port: *port,
                database: database.clone(),
                user: user.clone(),
                ssl: self.ssl,
            },
        };

        Some(summary)
    }
}

//! The probe run: connect, query clock/version, list tables.

use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::{Connection, PgConnection};
use std::io::Write;

use crate::config::ProbeConfig;
use crate::report;

const SERVER_INFO_QUERY: &str = "SELECT NOW() AS server_time, version() AS pg_version";

const PUBLIC_TABLES_QUERY: &str = "SELECT table_name::text FROM information_schema.tables \
     WHERE table_schema = 'public' ORDER BY table_name";

#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub server_time: DateTime<Utc>,
    pub version: String,
    pub tables: Vec<String>,
}

/// Run every check, writing progress to `out`.
///
/// On failure the error and the troubleshooting checklist are written before
/// the error is returned.
pub async fn run(config: &ProbeConfig, out: &mut impl Write) -> anyhow::Result<ProbeReport> {
    report::print_config(out, config.summary().as_ref())?;

    match probe(config, out).await {
        Ok(report) => Ok(report),
        Err(e) => {
            tracing::debug!(error = ?e, "Probe failed");
            report::print_failure(out, &e)?;
            Err(e)
        }
    }
}

async fn probe(config: &ProbeConfig, out: &mut impl Write) -> anyhow::Result<ProbeReport> {
    let options = config
        .connect_options()
        .context("invalid connection settings")?;

    let mut conn = PgConnection::connect_with(&options).await?;
    tracing::debug!("Connection established");

    let result = diagnose(&mut conn, out).await;

    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "Failed to close connection cleanly");
    }

    result
}

async fn diagnose(conn: &mut PgConnection, out: &mut impl Write) -> anyhow::Result<ProbeReport> {
    let (server_time, version): (DateTime<Utc>, String) = sqlx::query_as(SERVER_INFO_QUERY)
        .fetch_one(&mut *conn)
        .await
        .context("server info query failed")?;
    report::print_server(out, server_time, &version)?;

    let tables: Vec<String> = sqlx::query_scalar(PUBLIC_TABLES_QUERY)
        .fetch_all(&mut *conn)
        .await
        .context("table listing query failed")?;
    report::print_tables(out, &tables)?;

    Ok(ProbeReport {
        server_time,
        version,
        tables,
    })
}

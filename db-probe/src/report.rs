//! Console output of the probe.

use chrono::{DateTime, Utc};
use std::io::{self, Write};

use crate::config::ConfigSummary;

pub const TROUBLESHOOTING: [&str; 4] = [
    "Is the PostgreSQL service running?",
    "Are the username and password correct?",
    "Does the database exist?",
    "Is the port reachable from this machine?",
];

/// `PostgreSQL 16.2 on x86_64-pc-linux-gnu, ...` becomes `PostgreSQL 16.2`.
pub fn short_version(version: &str) -> String {
    version
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_config(out: &mut impl Write, summary: Option<&ConfigSummary>) -> io::Result<()> {
    writeln!(out, "Database connection check")?;
    match summary {
        Some(summary) => {
            let source = if summary.from_url {
                "DATABASE_URL"
            } else {
                "DB_* variables"
            };
            writeln!(out, "  source:   {}", source)?;
            writeln!(out, "  host:     {}", summary.host)?;
            writeln!(out, "  port:     {}", summary.port)?;
            writeln!(out, "  database: {}", summary.database)?;
            writeln!(out, "  user:     {}", summary.user)?;
            writeln!(
                out,
                "  ssl:      {}",
                if summary.ssl { "enabled" } else { "disabled" }
            )?;
        }
        None => writeln!(out, "  source:   DATABASE_URL (could not be parsed)")?,
    }
    writeln!(out)
}

pub fn print_server(out: &mut impl Write, now: DateTime<Utc>, version: &str) -> io::Result<()> {
    writeln!(out, "Connected.")?;
    writeln!(out, "  server time: {}", now.to_rfc3339())?;
    writeln!(out, "  version:     {}", short_version(version))?;
    writeln!(out)
}

pub fn print_tables(out: &mut impl Write, tables: &[String]) -> io::Result<()> {
    if tables.is_empty() {
        writeln!(out, "Tables in public schema: 0")?;
        writeln!(
            out,
            "Warning: the public schema is empty. Run the schema initialization scripts before starting the app."
        )?;
        return Ok(());
    }

    writeln!(out, "Tables in public schema: {}", tables.len())?;
    for table in tables {
        writeln!(out, "  - {}", table)?;
    }
    Ok(())
}

pub fn print_failure(out: &mut impl Write, error: &anyhow::Error) -> io::Result<()> {
    writeln!(out, "Database connection failed: {:#}", error)?;
    writeln!(out)?;
    writeln!(out, "Troubleshooting:")?;
    for (i, hint) in TROUBLESHOOTING.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, hint)?;
    }
    Ok(())
}

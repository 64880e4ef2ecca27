//! db-probe: checks that PostgreSQL is reachable and shows what the public schema holds.
pub mod config;
pub mod probe;
pub mod report;

pub use config::ProbeConfig;
pub use probe::{run, ProbeReport};

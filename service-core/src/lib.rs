//! service-core: shared plumbing for the workspace binaries.
//!
//! Error rendering, environment resolution, tracing setup and the common
//! axum middleware live here so each binary only carries its own logic.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

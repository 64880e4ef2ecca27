pub mod backend_client;
pub mod directory;
pub mod enrichment;

pub use backend_client::{BackendClient, UpstreamError};

pub mod logging;
pub mod metrics;
pub mod trace_context;

pub use logging::{init_console_tracing, init_tracing};
pub use metrics::{init_metrics, render_metrics};
pub use trace_context::{
    REQUEST_ID_HEADER, TRACEPARENT_HEADER, TracedClientExt, TracedRequest, extract_request_id,
    inject_trace_context,
};

use dotenvy::dotenv;
use service_core::observability::{init_metrics, init_tracing};
use staff_directory::config::get_configuration;
use staff_directory::startup::build_router;
use staff_directory::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "staff-directory",
        &configuration.log_level,
        configuration.otlp_endpoint.as_deref(),
    );
    init_metrics();

    if let Err(missing) = &configuration.upstream {
        tracing::error!(error = %missing, "Upstream is not configured; /users will answer 500");
    }

    let app = build_router(AppState::new(configuration.upstream));

    let address = configuration.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting staff-directory on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}

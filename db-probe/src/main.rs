use db_probe::ProbeConfig;
use dotenvy::dotenv;
use service_core::observability::init_console_tracing;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    init_console_tracing("warn");

    let config = match ProbeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid database configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    match db_probe::run(&config, &mut stdout).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

// src/main.rs
use dpp_logistics::api;
use dpp_logistics::config::{AppConfig, LogConfig};
use dpp_logistics::telemetry;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let dotenv_result = dotenvy::dotenv();

    let logging = LogConfig::from_env();
    telemetry::init(&logging);

    if let Err(err) = dotenv_result {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            warn!(error = %err, "could not load .env");
        }
    }

    let app_config = AppConfig::from_env(logging);

    info!("space-fitting service starting");
    api::start_api_server(app_config).await;
}

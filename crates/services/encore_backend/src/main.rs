// --- File: crates/services/encore_backend/src/main.rs ---
use encore_backend::{build_app, StartupError};
use encore_common::logging;
use encore_config::load_config;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Arc::new(load_config().map_err(|e| StartupError::Config(e.to_string()))?);
    let app = build_app(config.clone()).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;
    println!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(StartupError::Serve)
}

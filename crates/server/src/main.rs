use std::{path::PathBuf, sync::Arc};

use anyhow::Error as AnyhowError;
use jarvis::{Dispatcher, JarvisConfig, JarvisError, KeyValueStore};
use providers::{default_capabilities, JsonFileStore};
use server::{routes, AppState};
use thiserror::Error;
use tracing_subscriber::{prelude::*, EnvFilter};

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Jarvis(#[from] JarvisError),
    #[error(transparent)]
    Other(#[from] AnyhowError),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Pick up API keys from `.env` during local development
    dotenv::dotenv().ok();

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_string = format!(
        "warn,server={level},jarvis={level},providers={level}",
        level = log_level
    );
    let env_filter = EnvFilter::try_new(filter_string).map_err(AnyhowError::from)?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();

    let config = match std::env::var("JARVIS_CONFIG") {
        Ok(path) => JarvisConfig::load_from(&PathBuf::from(path))?,
        Err(_) => JarvisConfig::load()?,
    };

    let data_dir = config.storage.resolved_data_dir();
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::in_dir(&data_dir));
    tracing::info!("Using data directory {}", data_dir.display());

    let capabilities = default_capabilities(&config, store.clone());
    let dispatcher = Dispatcher::new(&config, capabilities)?;
    tracing::info!(
        "Loaded {} intent rules and {} modes",
        dispatcher.matcher().rules().len(),
        dispatcher.modes().modes().len()
    );

    let app_router = routes::router(AppState::new(dispatcher, store));

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    let actual_port = listener.local_addr()?.port();
    tracing::info!("Server running on http://{host}:{actual_port}");

    axum::serve(listener, app_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

//! Tally API Server
//!
//! Main entry point for the Tally ledger service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_api::{AppState, create_router};
use tally_core::memory::MemoryStore;
use tally_core::ports::UnitOfWork;
use tally_db::{DbUnitOfWork, connect_with};
use tally_shared::Settings;

/// `database.url` value that selects the in-memory store.
const MEMORY_DATABASE_URL: &str = "memory://";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; the same tree serves transfer limits at runtime
    let settings = Settings::load().context("Failed to load configuration")?;
    let config = settings
        .app_config()
        .context("Invalid application configuration")?;

    let uow: Arc<dyn UnitOfWork> = if config.database.url == MEMORY_DATABASE_URL {
        warn!("Using in-memory storage; data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let db = connect_with(&config.database)
            .await
            .context("Failed to connect to database")?;
        Arc::new(DbUnitOfWork::new(db))
    };

    // Create application state and router
    let state = AppState::new(uow, Arc::new(settings));
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

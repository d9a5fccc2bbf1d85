//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for clients and transfers
//! - Error-to-response mapping
//! - Extractors that keep malformed input in the error envelope
//! - Response types

pub mod error;
pub mod extract;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tally_core::client::ClientService;
use tally_core::ports::UnitOfWork;
use tally_core::transfer::TransferService;
use tally_shared::ConfigurationSource;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Transfer engine.
    pub transfers: Arc<TransferService>,
    /// Client onboarding.
    pub clients: Arc<ClientService>,
}

impl AppState {
    /// Builds the services over one unit of work and configuration source.
    #[must_use]
    pub fn new(uow: Arc<dyn UnitOfWork>, config: Arc<dyn ConfigurationSource>) -> Self {
        Self {
            transfers: Arc::new(TransferService::new(uow.clone(), config)),
            clients: Arc::new(ClientService::new(uow)),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

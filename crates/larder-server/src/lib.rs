//! Larder Server - Item CRUD API
//!
//! HTTP service over the item store. Handlers are stateless between
//! requests; all state lives in the store.

pub mod http;

use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use larder_core::Repository;

/// Shared application state
pub struct AppState {
    pub repository: Mutex<Repository>,
}

impl AppState {
    /// Open (or create) the item database at `path`
    pub fn with_database(path: impl AsRef<Path>) -> larder_core::Result<Self> {
        Ok(Self {
            repository: Mutex::new(Repository::new(path)?),
        })
    }

    /// In-memory state (for testing)
    pub fn in_memory() -> larder_core::Result<Self> {
        Ok(Self {
            repository: Mutex::new(Repository::in_memory()?),
        })
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/items", get(http::list_items))
        .route("/items", post(http::create_item))
        .route("/items/{id}", put(http::update_item))
        .route("/items/{id}", delete(http::delete_item))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Larder server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

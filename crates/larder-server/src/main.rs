//! Larder Server Binary
//!
//! Standalone server for the item CRUD API.

use std::sync::Arc;

use larder_server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let db_path = std::env::var("LARDER_DB").unwrap_or_else(|_| "larder.db".to_string());
    let addr = std::env::var("LARDER_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let state = Arc::new(AppState::with_database(&db_path)?);
    serve(&addr, state).await
}

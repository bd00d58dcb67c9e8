// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::load_app_config;
use crate::infrastructure::postgres_repository::PgRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(PgRepository::connect(&config.database).await?);

    // Create controllers (application layer)
    let state = Arc::new(AppState::new(
        repository,
        config.pagination.items_per_page,
    ));

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting aquarium-maintenance service on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

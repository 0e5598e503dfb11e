//! Boards API Server

use boards_core::Config;
use boards_db::DbPool;
use boards_server::{routes, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::load();
    info!(database_url = %config.database_url, "connecting to database");
    let pool = DbPool::connect(&config.database_url).await?;

    let state = AppState::new(pool, &config);
    let app = routes::router(state);

    info!("Boards server starting on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

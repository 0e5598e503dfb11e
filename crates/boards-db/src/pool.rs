//! Database connection pool

use crate::{migrations, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

/// Database connection pool wrapper
#[derive(Debug, Clone)]
pub struct DbPool(SqlitePool);

impl DbPool {
    /// Connect to the database and run migrations
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to database: {}", url);

        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect(url)
            .await?;

        info!("Running database migrations");
        migrations::run_migrations(&pool).await?;

        info!("Database initialized successfully");
        Ok(Self(pool))
    }

    /// Create an in-memory database for testing
    pub async fn in_memory() -> Result<Self> {
        // A single connection keeps the in-memory database alive and shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        migrations::run_migrations(&pool).await?;
        Ok(Self(pool))
    }

    /// Get the inner pool
    pub fn inner(&self) -> &SqlitePool {
        &self.0
    }

    /// Begin a transaction
    pub async fn begin(&self) -> Result<sqlx::Transaction<'static, sqlx::Sqlite>> {
        Ok(self.0.begin().await?)
    }

    /// Close the pool
    pub async fn close(&self) {
        self.0.close().await;
    }
}

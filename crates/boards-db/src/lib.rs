//! # Boards Database Layer
//!
//! SQLite-based persistence with sqlx for users, projects, members,
//! issues, comments and notifications.
//!
//! ## Modules
//!
//! - [`pool`] - Database connection pool
//! - [`migrations`] - Embedded schema migrations
//! - [`models`] - Database row models
//! - [`repo`] - Repository query functions
//! - [`error`] - Database error types
//!
//! Repository functions take a `&mut SqliteConnection` so callers decide
//! the transaction boundary; a multi-step cascade runs every step on one
//! transaction and commits once.

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod repo;

pub use error::DbError;
pub use pool::DbPool;

/// Result type alias
pub type Result<T> = std::result::Result<T, DbError>;

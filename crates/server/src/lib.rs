//! Boards API Server
//!
//! The axum REST surface over the service layer: bearer-token
//! authentication, JSON request/response mapping and error → status
//! translation. All business rules live below, in `boards-service`.

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod token;
pub mod transport;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

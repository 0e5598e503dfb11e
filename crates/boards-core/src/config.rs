//! Server configuration
//!
//! Loaded from the environment with working defaults for local runs.

use serde::{Deserialize, Serialize};

/// Runtime configuration for the boards server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Secret used to sign access tokens
    pub token_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: u64,
}

impl Config {
    /// Load configuration from the environment, falling back to the
    /// defaults for any unset variable.
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            database_url: std::env::var("BOARDS_DATABASE_URL")
                .unwrap_or(defaults.database_url),
            bind_addr: std::env::var("BOARDS_BIND_ADDR").unwrap_or(defaults.bind_addr),
            token_secret: std::env::var("BOARDS_TOKEN_SECRET").unwrap_or(defaults.token_secret),
            token_ttl_secs: std::env::var("BOARDS_TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.token_ttl_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://boards.db?mode=rwc".to_string(),
            bind_addr: "127.0.0.1:8080".to_string(),
            token_secret: "dev-only-secret".to_string(),
            token_ttl_secs: 24 * 3600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fixed() {
        // Defaults never consult the environment.
        let config = Config::default();
        assert_eq!(config.database_url, "sqlite://boards.db?mode=rwc");
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.token_secret, "dev-only-secret");
        assert_eq!(config.token_ttl_secs, 24 * 3600);
    }
}

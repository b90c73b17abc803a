/// Configuration management for the Flowdeck subsystem
///
/// Handles server binding, flow database location, and the execution backend
/// endpoint plus its polling policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Flow database configuration
    pub database: DatabaseConfig,
    /// Execution backend configuration
    pub engine: EngineConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// SQLite database configuration for flow persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL (default: "sqlite:flowdeck.db")
    pub url: String,
}

/// Execution backend endpoint and client-side polling policy
///
/// The polling ceiling is a client-side safety net, independent of any
/// server-side timeout. It does not cancel the underlying run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the execution backend (e.g., "http://localhost:8000/api/v1")
    pub base_url: String,
    /// Interval between status polls, in milliseconds
    pub poll_interval_ms: u64,
    /// Maximum number of status polls before giving up
    pub poll_max_attempts: u32,
}

impl EngineConfig {
    /// Poll interval as a `Duration` for timer setup
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("FLOWDECK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("FLOWDECK_PORT")
                    .unwrap_or_else(|_| "3006".to_string())
                    .parse()
                    .unwrap_or(3006),
            },
            database: DatabaseConfig {
                url: std::env::var("FLOWDECK_DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite:flowdeck.db".to_string()),
            },
            engine: EngineConfig {
                base_url: std::env::var("FLOWDECK_ENGINE_URL")
                    .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string()),
                poll_interval_ms: std::env::var("FLOWDECK_POLL_INTERVAL_MS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()
                    .unwrap_or(2000),
                poll_max_attempts: std::env::var("FLOWDECK_POLL_MAX_ATTEMPTS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
            },
        }
    }
}

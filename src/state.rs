use std::env;
use tokio::sync::RwLock;

use crate::registry::BookingRegistry;

/// Application configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server to.
    pub bind_address: String,
}

impl Config {
    /// Creates Config from environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
        }
    }
}

/// Shared application state passed to all request handlers.
#[derive(Debug, Default)]
pub struct AppState {
    /// The single registry instance for this process.
    /// Mutations hold the write guard for the whole operation.
    pub registry: RwLock<BookingRegistry>,
}

impl AppState {
    pub fn new(registry: BookingRegistry) -> Self {
        Self {
            registry: RwLock::new(registry),
        }
    }
}

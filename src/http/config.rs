//! Server configuration from the environment.

use std::env;
use std::time::Duration;

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// CORS allowlist; empty means permissive (local development).
    pub allowed_origins: Vec<String>,
    /// Artificial delay on predict endpoints, for demo realism.
    pub simulated_latency: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: Vec::new(),
            simulated_latency: Duration::ZERO,
        }
    }
}

impl ServerConfig {
    /// Read configuration from `HOST`, `PORT`, `FRONTEND_ORIGINS`
    /// (comma-separated), and `SIMULATED_LATENCY_MS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let allowed_origins = env::var("FRONTEND_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let simulated_latency = env::var("SIMULATED_LATENCY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.simulated_latency);

        Self {
            host,
            port,
            allowed_origins,
            simulated_latency,
        }
    }
}

use std::env;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    /// Single allowed origin; any origin when unset
    pub cors_origin: Option<String>,
    pub upstream_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origin: None,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("NETZERO_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let cors_origin = env::var("NETZERO_CORS_ORIGIN")
            .ok()
            .filter(|origin| !origin.trim().is_empty());

        let timeout_secs = env::var("NETZERO_UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse::<u64>().ok())
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);

        Self {
            port,
            cors_origin,
            upstream_timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// CORS policy: the configured origin only, or any origin
    pub fn cors_layer(&self) -> anyhow::Result<CorsLayer> {
        let layer = CorsLayer::new().allow_methods([Method::GET, Method::OPTIONS]);

        Ok(match &self.cors_origin {
            Some(origin) => layer.allow_origin(origin.parse::<HeaderValue>()?),
            None => layer.allow_origin(Any).allow_headers(Any),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in ["NETZERO_PORT", "NETZERO_CORS_ORIGIN", "NETZERO_UPSTREAM_TIMEOUT_SECS"] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = ApiConfig::from_env();
        assert_eq!(config.port, 3001);
        assert_eq!(config.cors_origin, None);
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
        assert_eq!(config.bind_address(), "0.0.0.0:3001");
    }

    #[test]
    #[serial]
    fn test_environment_values() {
        clear_env();
        env::set_var("NETZERO_PORT", "8080");
        env::set_var("NETZERO_CORS_ORIGIN", "http://localhost:5173");
        env::set_var("NETZERO_UPSTREAM_TIMEOUT_SECS", "0");

        let config = ApiConfig::from_env();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:5173"));
        // Zero is not a usable timeout
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
        assert!(config.cors_layer().is_ok());

        clear_env();
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let config = ApiConfig {
            cors_origin: Some("bad\norigin".to_string()),
            ..ApiConfig::default()
        };
        assert!(config.cors_layer().is_err());
    }
}

//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use golfitter_shared::constants::{APP_NAME, DEFAULT_HTTP_PORT, MAX_UPLOAD_SIZE};

/// Headroom on top of the largest accepted video. Bodies up to this much
/// over the limit still reach upload validation and get its message.
const MULTIPART_OVERHEAD: usize = 16 * 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Path of the SQLite video database.
    /// Env: `DATABASE_PATH`
    /// Default: `None` (platform data directory).
    pub database_path: Option<PathBuf>,

    /// Maximum request body size in bytes.
    /// Env: `MAX_BODY_SIZE`
    /// Default: 100 MiB plus multipart overhead.
    pub max_body_size: usize,

    /// Human-readable name for this instance.
    /// Env: `INSTANCE_NAME`
    /// Default: `"Golfitter"`
    pub instance_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            database_path: None,
            max_body_size: MAX_UPLOAD_SIZE as usize + MULTIPART_OVERHEAD,
            instance_name: APP_NAME.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Some(path) = lookup("DATABASE_PATH") {
            if !path.is_empty() {
                config.database_path = Some(PathBuf::from(path));
            }
        }

        if let Some(val) = lookup("MAX_BODY_SIZE") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.max_body_size = n,
                _ => tracing::warn!(value = %val, "Invalid MAX_BODY_SIZE, using default"),
            }
        }

        if let Some(name) = lookup("INSTANCE_NAME") {
            config.instance_name = name;
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.http_addr, ([0, 0, 0, 0], 8080).into());
        assert!(config.database_path.is_none());
        assert!(config.max_body_size > MAX_UPLOAD_SIZE as usize);
        assert_eq!(config.instance_name, APP_NAME);
    }

    #[test]
    fn test_overrides() {
        let config = from_map(&[
            ("HTTP_ADDR", "127.0.0.1:9000"),
            ("DATABASE_PATH", "/tmp/golfitter.db"),
            ("MAX_BODY_SIZE", "2048"),
            ("INSTANCE_NAME", "Range"),
        ]);
        assert_eq!(config.http_addr, ([127, 0, 0, 1], 9000).into());
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/golfitter.db")));
        assert_eq!(config.max_body_size, 2048);
        assert_eq!(config.instance_name, "Range");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = from_map(&[("HTTP_ADDR", "nowhere"), ("MAX_BODY_SIZE", "-1")]);
        assert_eq!(config.http_addr, ServerConfig::default().http_addr);
        assert_eq!(config.max_body_size, ServerConfig::default().max_body_size);
    }
}

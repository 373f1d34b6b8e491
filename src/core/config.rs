//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally seeded from a `.env` file by the binary).

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{Error, Result};
use super::transport::HttpConfig;

/// Environment variable holding the bearer secret.
pub const API_KEY_ENV: &str = "MCP_API_KEY";

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// HTTP transport configuration.
    pub transport: HttpConfig,

    /// Authentication configuration.
    pub auth: AuthConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported in logs.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Authentication configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret expected as `Authorization: Bearer <api_key>`.
    #[serde(skip_serializing)]
    pub api_key: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "math-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Load logging configuration from `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.level = level;
        }
        config
    }
}

impl Config {
    /// Create a configuration with default values and the given secret.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            transport: HttpConfig::default(),
            auth: AuthConfig {
                api_key: api_key.into(),
            },
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `MCP_API_KEY` is required; every other variable has a default.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `PORT`.
    pub fn from_env() -> Result<Self> {
        let api_key = match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => key,
            _ => {
                return Err(Error::config(format!(
                    "{API_KEY_ENV} environment variable is required"
                )));
            }
        };

        let mut config = Self::with_api_key(api_key);

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        // Load transport configuration from environment
        config.transport = HttpConfig::from_env()?;

        if config.transport.enable_cors {
            info!("CORS enabled for all origins");
        } else {
            warn!("CORS disabled - browser clients on other origins will be refused");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        unsafe {
            std::env::remove_var(API_KEY_ENV);
            std::env::remove_var("PORT");
            std::env::remove_var("MCP_HTTP_HOST");
            std::env::remove_var("MCP_HTTP_CORS");
            std::env::remove_var("MCP_SERVER_NAME");
        }
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("MCP_API_KEY"));
    }

    #[test]
    fn test_empty_api_key_is_fatal() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var(API_KEY_ENV, "");
        }
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_defaults_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var(API_KEY_ENV, "test_key_12345");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.auth.api_key, "test_key_12345");
        assert_eq!(config.transport.port, 3000);
        assert_eq!(config.transport.host, "0.0.0.0");
        assert!(config.transport.enable_cors);
        assert_eq!(config.server.name, "math-mcp-server");
        clear_env();
    }

    #[test]
    fn test_port_and_cors_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var(API_KEY_ENV, "k");
            std::env::set_var("PORT", "8123");
            std::env::set_var("MCP_HTTP_CORS", "false");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.transport.port, 8123);
        assert!(!config.transport.enable_cors);
        clear_env();
    }

    #[test]
    fn test_invalid_port_rejected() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var(API_KEY_ENV, "k");
            std::env::set_var("PORT", "not-a-port");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("PORT"));
        clear_env();
    }

    #[test]
    fn test_api_key_redacted() {
        let config = Config::with_api_key("super_secret_key");

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super_secret_key"));
    }
}

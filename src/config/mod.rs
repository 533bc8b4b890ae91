//! Configuration module for the HRMS backend.
//!
//! Loaded from environment variables. The two store connection parameters
//! (database path and API pre-shared key) are required; startup fails fast
//! when either is absent.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key gating the API surface (required)
    pub api_psk: String,
    /// Path to SQLite database file (required)
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Startup configuration error.
#[derive(Debug)]
pub struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables, after layering in a
    /// `.env` file when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_process_env()
    }

    /// Read configuration from the process environment only.
    fn from_process_env() -> Result<Self, ConfigError> {
        let db_path = env::var("HRMS_DB_PATH")
            .map_err(|_| ConfigError("HRMS_DB_PATH is required".to_string()))?
            .into();

        let api_psk = env::var("HRMS_API_PSK")
            .map_err(|_| ConfigError("HRMS_API_PSK is required".to_string()))?;

        let bind_addr = env::var("HRMS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|_| ConfigError("invalid HRMS_BIND_ADDR format".to_string()))?;

        let log_level = env::var("HRMS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_vars_fail_fast() {
        // Bypasses the .env layer so a developer-local file cannot leak in
        env::remove_var("HRMS_DB_PATH");
        env::remove_var("HRMS_API_PSK");
        env::remove_var("HRMS_BIND_ADDR");
        env::remove_var("HRMS_LOG_LEVEL");

        let err = Config::from_process_env().unwrap_err();
        assert!(err.to_string().contains("HRMS_DB_PATH"));

        env::set_var("HRMS_DB_PATH", "./data/hrms.sqlite");
        let err = Config::from_process_env().unwrap_err();
        assert!(err.to_string().contains("HRMS_API_PSK"));

        env::set_var("HRMS_API_PSK", "test-key");
        let config = Config::from_process_env().unwrap();
        assert_eq!(config.db_path, PathBuf::from("./data/hrms.sqlite"));
        assert_eq!(config.api_psk, "test-key");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");

        env::remove_var("HRMS_DB_PATH");
        env::remove_var("HRMS_API_PSK");
    }
}

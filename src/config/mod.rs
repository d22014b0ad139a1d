//! Configuration module for the RecipeMate backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default lifetime of a login session.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 30;

/// Longest accepted session lifetime, about a century.
pub const MAX_SESSION_TTL_DAYS: i64 = 36_500;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for API authentication (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// How long an issued session token stays valid
    pub session_ttl_days: i64,
}

/// A configuration variable that was set but could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {} value: {:?}", self.variable, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_psk = env::var("RECIPEMATE_API_PSK")
            .ok()
            .filter(|psk| !psk.trim().is_empty());

        let db_path = env::var("RECIPEMATE_DB_PATH")
            .unwrap_or_else(|_| "./data/recipemate.sqlite".to_string())
            .into();

        let raw_addr =
            env::var("RECIPEMATE_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = raw_addr.parse().map_err(|_| ConfigError {
            variable: "RECIPEMATE_BIND_ADDR",
            value: raw_addr.clone(),
        })?;

        let log_level = env::var("RECIPEMATE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let session_ttl_days = match env::var("RECIPEMATE_SESSION_TTL_DAYS") {
            Ok(raw) => match raw.trim().parse::<i64>() {
                Ok(days) if (1..=MAX_SESSION_TTL_DAYS).contains(&days) => days,
                _ => {
                    return Err(ConfigError {
                        variable: "RECIPEMATE_SESSION_TTL_DAYS",
                        value: raw,
                    })
                }
            },
            Err(_) => DEFAULT_SESSION_TTL_DAYS,
        };

        Ok(Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            session_ttl_days,
        })
    }
}

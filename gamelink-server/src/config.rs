//! Server configuration: database URL, bind address, log path.
//! Loaded from environment variables DATABASE_URL, BIND_ADDR, LOG_FILE.

use std::env;

/// Runtime configuration for the read-state service.
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub log_file: Option<String>,
}

impl ServerConfig {
    /// Loads from the environment; every variable has a default, so this
    /// never fails. Call after `dotenvy::dotenv()` if a `.env` file is used.
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://gamelink.db".to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_file = env::var("LOG_FILE").ok();
        Self {
            database_url,
            bind_addr,
            log_file,
        }
    }

    /// Uses the given database URL with defaults for everything else.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            bind_addr: "0.0.0.0:8080".to_string(),
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_database_url() {
        let config = ServerConfig::with_database_url("sqlite::memory:");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(config.log_file.is_none());
    }
}

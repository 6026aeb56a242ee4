//! Configuration for the chat server

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};

/// Upper bound for `limit` on the JSON log endpoint
pub const MAX_LOG_LIMIT: usize = 500;

/// Configuration for the HTTP server and its chat log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: String,
    /// SQLite file holding the chat log
    pub database_path: PathBuf,
    /// Number of records shown on the log page
    pub log_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            database_path: PathBuf::from("chat_logs.db"),
            log_limit: 50,
        }
    }
}

impl ServerConfig {
    /// Create a new configuration builder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Create config from `CHATBOT_BIND`, `CHATBOT_DB` and `CHATBOT_LOG_LIMIT`
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.bind_addr.parse::<SocketAddr>().map_err(|e| {
            ServerError::ConfigError(format!("invalid bind address '{}': {e}", self.bind_addr))
        })?;

        if self.log_limit == 0 || self.log_limit > MAX_LOG_LIMIT {
            return Err(ServerError::ConfigError(format!(
                "log_limit must be between 1 and {MAX_LOG_LIMIT}"
            )));
        }

        Ok(())
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    bind_addr: Option<String>,
    database_path: Option<PathBuf>,
    log_limit: Option<usize>,
}

impl ServerConfigBuilder {
    /// Set the listen address
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = Some(addr.into());
        self
    }

    /// Set the SQLite file
    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Set the log page size
    pub fn log_limit(mut self, limit: usize) -> Self {
        self.log_limit = Some(limit);
        self
    }

    /// Fill unset fields from the environment
    pub fn with_env(mut self) -> Result<Self> {
        if self.bind_addr.is_none() {
            self.bind_addr = std::env::var("CHATBOT_BIND").ok();
        }
        if self.database_path.is_none() {
            self.database_path = std::env::var_os("CHATBOT_DB").map(PathBuf::from);
        }
        if self.log_limit.is_none() {
            if let Ok(raw) = std::env::var("CHATBOT_LOG_LIMIT") {
                let limit = raw.parse().map_err(|_| {
                    ServerError::ConfigError(format!("CHATBOT_LOG_LIMIT is not a number: {raw}"))
                })?;
                self.log_limit = Some(limit);
            }
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig> {
        let defaults = ServerConfig::default();

        let config = ServerConfig {
            bind_addr: self.bind_addr.unwrap_or(defaults.bind_addr),
            database_path: self.database_path.unwrap_or(defaults.database_path),
            log_limit: self.log_limit.unwrap_or(defaults.log_limit),
        };

        config.validate()?;
        Ok(config)
    }
}

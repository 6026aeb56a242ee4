//! Configuration management utilities

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "chatbot".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `CHATBOT_APP_NAME` / `CHATBOT_ENV`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            app_name: lookup("CHATBOT_APP_NAME").unwrap_or(defaults.app_name),
            environment: lookup("CHATBOT_ENV").unwrap_or(defaults.environment),
        }
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production") || self.environment == "prod"
    }
}

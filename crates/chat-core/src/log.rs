//! Chat log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One request/response exchange, created once and never mutated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLogEntry {
    /// What the user typed
    pub user_input: String,
    /// What the bot answered
    pub bot_response: String,
    /// When the exchange happened
    pub timestamp: DateTime<Utc>,
}

impl ChatLogEntry {
    /// Create an entry stamped with the current time
    pub fn new(user_input: impl Into<String>, bot_response: impl Into<String>) -> Self {
        Self::at(user_input, bot_response, Utc::now())
    }

    /// Create an entry with an explicit timestamp
    pub fn at(
        user_input: impl Into<String>,
        bot_response: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            user_input: user_input.into(),
            bot_response: bot_response.into(),
            timestamp,
        }
    }
}

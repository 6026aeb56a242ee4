//! Configuration for the chat facade

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

/// Text returned when the responder has nothing to say
pub const DEFAULT_FALLBACK: &str = "I'm still learning. Could you try asking something else?";

/// Configuration for [`crate::ChatBot`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Reply used when no rule produces text
    pub fallback_response: String,
    /// Input that ends an interactive session
    pub quit_command: String,
    /// Optional JSON rules file; the built-in support rules are used otherwise
    pub rules_path: Option<PathBuf>,
    /// Welcome message for console sessions
    pub welcome_message: String,
    /// Prompt prefix for console sessions
    pub prompt: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            fallback_response: DEFAULT_FALLBACK.to_string(),
            quit_command: "quit".to_string(),
            rules_path: None,
            welcome_message: "Hi! I'm ChatBot. Type 'quit' to leave.".to_string(),
            prompt: "> ".to_string(),
        }
    }
}

impl ChatConfig {
    /// Create a builder
    pub fn builder() -> ChatConfigBuilder {
        ChatConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads `CHATBOT_RULES`, `CHATBOT_FALLBACK` and `CHATBOT_QUIT`.
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.fallback_response.trim().is_empty() {
            return Err(ChatError::ConfigError(
                "fallback_response must not be empty".to_string(),
            ));
        }

        if self.quit_command.trim().is_empty() {
            return Err(ChatError::ConfigError(
                "quit_command must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for ChatConfig
#[derive(Debug, Default)]
pub struct ChatConfigBuilder {
    fallback_response: Option<String>,
    quit_command: Option<String>,
    rules_path: Option<PathBuf>,
    welcome_message: Option<String>,
    prompt: Option<String>,
}

impl ChatConfigBuilder {
    /// Set the fallback response
    pub fn fallback_response(mut self, text: impl Into<String>) -> Self {
        self.fallback_response = Some(text.into());
        self
    }

    /// Set the quit command
    pub fn quit_command(mut self, command: impl Into<String>) -> Self {
        self.quit_command = Some(command.into());
        self
    }

    /// Set the rules file
    pub fn rules_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rules_path = Some(path.into());
        self
    }

    /// Set the welcome message
    pub fn welcome_message(mut self, msg: impl Into<String>) -> Self {
        self.welcome_message = Some(msg.into());
        self
    }

    /// Set the prompt
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Fill unset fields from the environment
    pub fn with_env(mut self) -> Self {
        if self.rules_path.is_none() {
            self.rules_path = std::env::var_os("CHATBOT_RULES").map(PathBuf::from);
        }
        if self.fallback_response.is_none() {
            self.fallback_response = std::env::var("CHATBOT_FALLBACK").ok();
        }
        if self.quit_command.is_none() {
            self.quit_command = std::env::var("CHATBOT_QUIT").ok();
        }
        self
    }

    /// Build the config
    pub fn build(self) -> Result<ChatConfig> {
        let defaults = ChatConfig::default();

        let config = ChatConfig {
            fallback_response: self.fallback_response.unwrap_or(defaults.fallback_response),
            quit_command: self.quit_command.unwrap_or(defaults.quit_command),
            rules_path: self.rules_path,
            welcome_message: self.welcome_message.unwrap_or(defaults.welcome_message),
            prompt: self.prompt.unwrap_or(defaults.prompt),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChatConfig::default();
        assert_eq!(config.fallback_response, DEFAULT_FALLBACK);
        assert_eq!(config.quit_command, "quit");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ChatConfig::builder()
            .quit_command("bye")
            .prompt("$ ")
            .rules_path("rules.json")
            .build()
            .unwrap();

        assert_eq!(config.quit_command, "bye");
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.rules_path, Some(PathBuf::from("rules.json")));
    }

    #[test]
    fn test_validation_empty_fallback() {
        let result = ChatConfig::builder().fallback_response("  ").build();
        assert!(matches!(result, Err(ChatError::ConfigError(_))));
    }

    #[test]
    fn test_validation_empty_quit() {
        let config = ChatConfig {
            quit_command: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

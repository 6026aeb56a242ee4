//! Error types for chat-core
//!
//! The responder itself never fails at runtime; every variant here is raised
//! while a rule set, reflection table or configuration is being built.

use thiserror::Error;

/// Result type alias for chat-core
pub type Result<T> = std::result::Result<T, ChatError>;

/// Configuration-time errors for rule sets and the chat facade
#[derive(Error, Debug)]
pub enum ChatError {
    /// A rule pattern failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A rule was declared without any candidate response
    #[error("Rule '{0}' has no candidate responses")]
    EmptyResponses(String),

    /// No rules were supplied
    #[error("Rule set is empty")]
    EmptyRuleSet,

    /// The final rule does not match every input
    #[error("Last rule '{0}' is not a catch-all")]
    MissingCatchAll(String),

    /// The reflection table could not be compiled
    #[error("Invalid reflection table: {0}")]
    InvalidReflections(String),

    /// Invalid chat configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Reading a rules file failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A rules file is not valid JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChatError::EmptyResponses("hello".to_string());
        assert_eq!(err.to_string(), "Rule 'hello' has no candidate responses");

        let err = ChatError::MissingCatchAll("quit".to_string());
        assert_eq!(err.to_string(), "Last rule 'quit' is not a catch-all");
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = ChatError::InvalidPattern {
            pattern: "(unclosed".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid pattern '(unclosed'"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

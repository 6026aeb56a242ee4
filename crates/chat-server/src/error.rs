//! Error types for the chat server

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Result type alias for chat-server
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors raised while serving chat requests or touching the chat log
#[derive(Debug, Error)]
pub enum ServerError {
    /// SQLite failure
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A previous writer panicked while holding the connection
    #[error("Storage lock poisoned")]
    LockPoisoned,

    /// Page rendering failed
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Building the chat bot failed
    #[error("Chat error: {0}")]
    Chat(#[from] chat_core::ChatError),

    /// Invalid server configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A blocking storage task was cancelled or panicked
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Socket or file error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::ConfigError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ServerError::ConfigError("log_limit must be greater than 0".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: log_limit must be greater than 0"
        );
        assert_eq!(ServerError::LockPoisoned.to_string(), "Storage lock poisoned");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServerError::LockPoisoned.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::ConfigError("bad".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }
}

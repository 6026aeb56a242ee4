//! Shared application state

use std::sync::Arc;

use chat_core::ChatBot;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::store::ChatLogStore;
use crate::templates::Templates;

/// State handed to every handler through axum's `State` extractor
#[derive(Clone)]
pub struct AppState {
    /// Immutable responder plus fallback policy
    pub bot: Arc<ChatBot>,
    /// Append-only chat log
    pub store: Arc<ChatLogStore>,
    /// Compiled HTML templates
    pub templates: Arc<Templates>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Name shown on the chat page
    pub app_name: String,
}

impl AppState {
    /// Assemble the state from its parts
    pub fn new(bot: ChatBot, store: ChatLogStore, config: ServerConfig) -> Result<Self> {
        Ok(Self {
            bot: Arc::new(bot),
            store: Arc::new(store),
            templates: Arc::new(Templates::new()?),
            config: Arc::new(config),
            app_name: "ChatBot".to_string(),
        })
    }

    /// Override the page title
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }
}

//! HTTP front end for the rule-based chatbot
//!
//! Wraps a [`chat_core::ChatBot`] in an axum router and appends every
//! exchange to a SQLite chat log.
//!
//! # Example
//!
//! ```rust,no_run
//! use chat_core::{ChatBot, ChatConfig};
//! use chat_server::{AppState, ChatLogStore, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     let bot = ChatBot::from_config(ChatConfig::default())?;
//!     let store = ChatLogStore::open(&config.database_path)?;
//!     chat_server::serve(AppState::new(bot, store, config)?).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
pub mod templates;

pub use config::{ServerConfig, ServerConfigBuilder};
pub use error::{Result, ServerError};
pub use routes::{ChatRequest, ChatResponse, create_router};
pub use state::AppState;
pub use store::{ChatLogStore, StoredChatLog};
pub use templates::Templates;

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&state.config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Chat server listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Chat server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Cannot listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

//! Chat server
//!
//! Serves the chat page, `POST /chat` and the conversation log.
//!
//! # Usage
//!
//! ```bash
//! # Optional overrides
//! export CHATBOT_BIND="0.0.0.0:5000"
//! export CHATBOT_DB="data/chat_logs.db"
//! export CHATBOT_RULES="rules.json"
//!
//! cargo run --bin chat-server -p chat-server
//! ```

use anyhow::Context;
use chat_core::{ChatBot, ChatConfig};
use chat_server::{AppState, ChatLogStore, ServerConfig};
use chat_utils::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = Config::from_env();
    chat_utils::init_tracing_with(&app_config, "info");

    let server_config = ServerConfig::from_env().context("invalid server configuration")?;
    let chat_config = ChatConfig::from_env().context("invalid chat configuration")?;

    tracing::info!(
        app = %app_config.app_name,
        environment = %app_config.environment,
        "Starting chat server"
    );

    let bot = ChatBot::from_config(chat_config).context("failed to load chat rules")?;
    let store = ChatLogStore::open(&server_config.database_path)
        .with_context(|| format!("failed to open {}", server_config.database_path.display()))?;

    let state = AppState::new(bot, store, server_config)?.with_app_name(app_config.app_name);
    chat_server::serve(state).await?;

    Ok(())
}

//! Axum route handlers for the chat server.
//!
//! # Routes
//!
//! - `GET  /`: chat page
//! - `POST /chat`: `{"message": "..."}` in, `{"response": "..."}` out
//! - `GET  /logs`: most recent conversations as HTML
//! - `GET  /api/logs`: most recent conversations as JSON (`?limit=N`)
//! - `GET  /health`: liveness check

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use chat_core::ChatLogEntry;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::MAX_LOG_LIMIT;
use crate::error::Result;
use crate::state::AppState;
use crate::store::StoredChatLog;

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message text
    pub message: String,
}

/// Reply from `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The bot's answer
    pub response: String,
}

/// Query string of `GET /api/logs`
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    /// Number of records, capped at [`MAX_LOG_LIMIT`]
    pub limit: Option<usize>,
}

/// Build the axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/chat", post(chat_handler))
        .route("/logs", get(logs_page_handler))
        .route("/api/logs", get(logs_json_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /: the chat page.
async fn index_handler(State(state): State<AppState>) -> Result<Html<String>> {
    Ok(Html(state.templates.render_index(&state.app_name)?))
}

/// POST /chat: answer a message and log the exchange.
///
/// A failed log write fails the request; the reply is not returned.
async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let response = state.bot.reply(&request.message);
    let entry = ChatLogEntry::new(request.message, response.clone());

    let store = state.store.clone();
    let id = tokio::task::spawn_blocking(move || store.append(&entry)).await??;
    tracing::debug!(log_id = id, "Chat exchange logged");

    Ok(Json(ChatResponse { response }))
}

/// GET /logs: recent conversations, newest first.
async fn logs_page_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let logs = fetch_recent(&state, state.config.log_limit).await?;
    Ok(Html(state.templates.render_logs(&logs)?))
}

/// GET /api/logs: recent conversations as JSON.
async fn logs_json_handler(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<Vec<StoredChatLog>>> {
    let limit = query
        .limit
        .unwrap_or(state.config.log_limit)
        .clamp(1, MAX_LOG_LIMIT);
    Ok(Json(fetch_recent(&state, limit).await?))
}

/// GET /health: liveness check.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "chat-server",
    }))
}

async fn fetch_recent(state: &AppState, limit: usize) -> Result<Vec<StoredChatLog>> {
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || store.recent(limit)).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::store::ChatLogStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chat_core::{ChatBot, ChatConfig};
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let bot = ChatBot::from_config(ChatConfig::default()).unwrap();
        let store = ChatLogStore::open_in_memory().unwrap();
        AppState::new(bot, store, ServerConfig::default()).unwrap()
    }

    fn chat_request(message: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header("Content-Type", "application/json")
            .body(Body::from(
                serde_json::to_string(&ChatRequest {
                    message: message.to_string(),
                })
                .unwrap(),
            ))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(test_state());
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "chat-server");
    }

    #[tokio::test]
    async fn test_chat_identity_question() {
        let state = test_state();
        let app = create_router(state.clone());

        let response = app.oneshot(chat_request("what is your name?")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(
            json["response"],
            "I'm a chatbot created to assist you. You can call me ChatBot!"
        );
    }

    #[tokio::test]
    async fn test_chat_logs_exchange() {
        let state = test_state();
        let app = create_router(state.clone());

        let response = app.oneshot(chat_request("my name is Ada")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let logs = state.store.recent(10).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].entry.user_input, "my name is Ada");
        assert_eq!(
            logs[0].entry.bot_response,
            "Hello Ada, how can I help you today?"
        );
    }

    #[tokio::test]
    async fn test_chat_empty_message_gets_reply() {
        let app = create_router(test_state());
        let response = app.oneshot(chat_request("")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(!json["response"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_rejects_missing_message() {
        let app = create_router(test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/chat")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"text": "hello"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_logs_json_newest_first() {
        let state = test_state();
        for message in ["first", "second", "third"] {
            let app = create_router(state.clone());
            app.oneshot(chat_request(message)).await.unwrap();
        }

        let app = create_router(state);
        let request = Request::builder()
            .uri("/api/logs?limit=2")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let logs = json.as_array().unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0]["user_input"], "third");
        assert_eq!(logs[1]["user_input"], "second");
    }

    #[tokio::test]
    async fn test_logs_page_renders() {
        let state = test_state();
        create_router(state.clone())
            .oneshot(chat_request("quit"))
            .await
            .unwrap();

        let request = Request::builder()
            .uri("/logs")
            .body(Body::empty())
            .unwrap();
        let response = create_router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Thank you for chatting! Have a great day!"));
    }

    #[tokio::test]
    async fn test_index_page() {
        let app = create_router(test_state());
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

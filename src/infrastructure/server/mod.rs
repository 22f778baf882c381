//! Webhook HTTP server

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::application::errors::BotError;
use crate::application::messaging::{Discard, DispatchOutcome, MessageDispatcher};
use crate::infrastructure::adapters::spark::{SparkAdapter, WebhookEvent};

/// Shared state for webhook handlers
#[derive(Clone)]
pub struct WebhookState {
    pub dispatcher: Arc<MessageDispatcher>,
    pub spark: Arc<SparkAdapter>,
    pub bot_id: String,
    pub webhook_path: String,
    pub since: DateTime<Utc>,
}

impl WebhookState {
    pub fn new(
        dispatcher: Arc<MessageDispatcher>,
        spark: Arc<SparkAdapter>,
        bot_id: impl Into<String>,
        webhook_path: impl Into<String>,
    ) -> Self {
        Self {
            dispatcher,
            spark,
            bot_id: bot_id.into(),
            webhook_path: webhook_path.into(),
            since: Utc::now(),
        }
    }
}

#[derive(Serialize)]
struct PingResponse {
    message: &'static str,
    since: DateTime<Utc>,
    webhook: String,
}

pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route(&state.webhook_path, post(handle_webhook))
        .route("/ping", get(ping))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(port: u16, state: WebhookState) -> Result<(), BotError> {
    let path = state.webhook_path.clone();
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| BotError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Webhook server listening on {} (path: {})", addr, path);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| BotError::Internal(format!("Webhook server exited: {}", e)))
}

async fn ping(State(state): State<WebhookState>) -> impl IntoResponse {
    Json(PingResponse {
        message: "Congrats, your bot is up and running",
        since: state.since,
        webhook: state.webhook_path.clone(),
    })
}

/// Acknowledge right away; the reply is produced in its own task
async fn handle_webhook(State(state): State<WebhookState>, body: Bytes) -> StatusCode {
    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Rejected webhook: invalid JSON payload: {}", e);
            return StatusCode::BAD_REQUEST;
        }
    };

    tokio::spawn(async move {
        if let Some(outcome) = process_event(&state, event).await {
            tracing::debug!("Webhook processed: {:?}", outcome);
        }
    });

    StatusCode::OK
}

/// Resolve and dispatch one webhook event. Returns None for events that are
/// not new messages or whose message could not be fetched.
pub async fn process_event(state: &WebhookState, event: WebhookEvent) -> Option<DispatchOutcome> {
    if !event.is_message_created() {
        tracing::debug!("Ignoring {}/{} event", event.resource, event.event);
        return None;
    }

    // Skip the message lookup entirely for our own posts
    if !state.bot_id.is_empty() && event.data.person_id == state.bot_id {
        tracing::debug!("bot is writing => ignoring");
        return Some(DispatchOutcome::Discarded(Discard::OwnMessage));
    }

    match state.spark.get_message(&event.data.id).await {
        Ok(message) => Some(state.dispatcher.dispatch(message).await),
        Err(e) => {
            tracing::error!("Could not fetch message {}: {}", event.data.id, e);
            None
        }
    }
}

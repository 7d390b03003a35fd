use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use tracing::{info, warn};

use crate::connector::api::Container;
use crate::domain::{sanitize_text_field, ConversationHandle};

use super::payloads::{ChatRequest, Envelope};

/// Chat endpoint path.
pub const CHAT_PATH: &str = "/chat";
/// Credential check endpoint path.
pub const VALIDATE_PATH: &str = "/validate";
/// Health endpoint path.
pub const HEALTH_PATH: &str = "/health";

/// [`ChatRequest`] extracted from either a JSON or a urlencoded form body.
pub struct ChatInput(pub ChatRequest);

impl<S> FromRequest<S> for ChatInput
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let parsed = if is_json {
            Json::<ChatRequest>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|e| e.body_text())
        } else {
            Form::<ChatRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|e| e.body_text())
        };

        parsed.map(ChatInput).map_err(|detail| {
            warn!("Rejected chat request body: {}", detail);
            (
                StatusCode::BAD_REQUEST,
                Json(Envelope::failure("Invalid request.")),
            )
                .into_response()
        })
    }
}

/// Build the relay routes over a shared container.
pub fn routes(container: Arc<Container>) -> Router {
    Router::new()
        .route(CHAT_PATH, post(chat))
        .route(VALIDATE_PATH, get(validate))
        .route(HEALTH_PATH, get(health))
        .with_state(container)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Chat relay listening on http://{}", listener.local_addr()?);
    axum::serve(listener, routes(container)).await?;
    Ok(())
}

async fn chat(State(container): State<Arc<Container>>, ChatInput(input): ChatInput) -> Json<Envelope> {
    let message = sanitize_text_field(&input.message);
    if message.is_empty() {
        return Json(Envelope::failure("Empty message."));
    }

    let thread = input
        .thread_id
        .as_deref()
        .map(sanitize_text_field)
        .and_then(|id| ConversationHandle::from_optional(Some(id.as_str())));

    info!(
        "Chat request on {}",
        thread.as_ref().map(|t| t.as_str()).unwrap_or("new thread")
    );

    let result = container.relay().process_message(&message, thread).await;
    if let Err(e) = &result {
        warn!("Chat turn failed ({}): {}", e.kind(), e);
    }
    Json(Envelope::from_reply(result))
}

async fn validate(State(container): State<Arc<Container>>) -> Json<Envelope> {
    let result = container.validate_use_case().execute().await;
    Json(Envelope::from_validation(result))
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

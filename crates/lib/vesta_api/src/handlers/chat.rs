//! Chat request handlers.

use axum::Json;
use axum::body::Bytes;
use tracing::{debug, info};
use vesta_core::ChatResponse;
use vesta_core::echo;

/// `GET /chat` — constant reply used as a liveness check.
pub async fn liveness_handler() -> Json<ChatResponse> {
    Json(ChatResponse {
        reply: echo::LIVENESS_REPLY.to_string(),
    })
}

/// `POST /chat` — reports how many messages arrived and the last user turn.
///
/// The body is read raw so that a missing content type, a non-object body or
/// an absent `messages` field all degrade to an empty transcript.
pub async fn chat_handler(body: Bytes) -> Json<ChatResponse> {
    let messages = echo::parse_transcript(&body);

    info!(count = messages.len(), "Received messages");
    debug!(messages = ?messages, "Received transcript");

    Json(ChatResponse {
        reply: echo::reply_for(&messages),
    })
}

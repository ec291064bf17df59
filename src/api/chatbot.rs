use axum::{extract::State, routing::post, Json, Router};

use crate::core::state::AppState;
use crate::schemas::chat::{ChatMessageRequest, ChatMessageResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/message", post(message))
}

/// The chatbot endpoint always answers 200; every failure becomes a reply.
async fn message(
    State(state): State<AppState>,
    Json(payload): Json<ChatMessageRequest>,
) -> Json<ChatMessageResponse> {
    let message = payload.message.unwrap_or_default();
    let reply = state.chat().reply(&message).await;
    Json(ChatMessageResponse { reply })
}

#[cfg(test)]
mod tests;

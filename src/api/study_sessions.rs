use axum::{
    extract::Path,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::core::state::AppState;
use crate::schemas::analytics::StatusResponse;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", post(save_session)).route("/user/:user_id", get(sessions_for_user))
}

/// Study sessions are log-only for now.
async fn save_session(Json(session): Json<Value>) -> Json<StatusResponse> {
    tracing::info!(
        user_id = %session.get("userId").unwrap_or(&serde_json::Value::Null),
        duration_minutes = %session.get("durationMinutes").unwrap_or(&serde_json::Value::Null),
        topic = %session.get("topic").unwrap_or(&serde_json::Value::Null),
        session_date = %session.get("sessionDate").unwrap_or(&serde_json::Value::Null),
        "Study session saved"
    );

    Json(StatusResponse {
        status: "success".to_string(),
        message: "Study session saved successfully".to_string(),
    })
}

async fn sessions_for_user(Path(user_id): Path<String>) -> Json<Value> {
    Json(json!({
        "userId": user_id,
        "totalSessions": 0,
        "totalMinutes": 0,
        "sessions": [],
    }))
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::schemas::analytics::{
    DashboardResponse, ProgressResponse, SaveResultRequest, StatusResponse, WeakTopic,
};
use crate::services::analytics;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/weak-topics/:user_id", get(weak_topics))
        .route("/progress/:user_id", get(progress))
        .route("/dashboard/:user_id", get(dashboard))
        .route("/quiz-result", post(save_quiz_result))
}

async fn weak_topics(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<WeakTopic>>, ApiError> {
    let topics = analytics::weak_topics(state.db(), &user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to compute weak topics"))?;
    Ok(Json(topics))
}

async fn progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProgressResponse>, ApiError> {
    Ok(Json(ProgressResponse {
        average_accuracy: analytics::average_accuracy(state.db(), &user_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to compute average accuracy"))?,
        total_quizzes: analytics::total_quizzes(state.db(), &user_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to count quizzes"))?,
        weekly_streak: analytics::weekly_streak(state.db(), &user_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to compute weekly streak"))?,
    }))
}

async fn dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let stats = analytics::dashboard(state.db(), &user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to build dashboard"))?;
    Ok(Json(stats))
}

/// Stores a flat result row. Failures come back in the source's
/// `{status, message}` envelope rather than the usual `{error}` body.
async fn save_quiz_result(
    State(state): State<AppState>,
    Json(payload): Json<SaveResultRequest>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<StatusResponse>)> {
    let saved = analytics::save_result(
        state.db(),
        analytics::SaveResult {
            user_id: &payload.user_id,
            topic: &payload.topic,
            score: payload.score,
            total_questions: payload.total_questions,
        },
    )
    .await;

    match saved {
        Ok(()) => Ok(Json(StatusResponse {
            status: "success".to_string(),
            message: "Quiz result saved successfully".to_string(),
        })),
        Err(err) => {
            tracing::error!(error = %err, "Failed to save quiz result");
            Err((
                StatusCode::BAD_REQUEST,
                Json(StatusResponse {
                    status: "error".to_string(),
                    message: "Failed to save quiz result".to_string(),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests;

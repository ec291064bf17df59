use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::note::{NoteCreate, NoteResponse, NoteUpdate};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_note))
        .route("/user/:user_id", get(notes_for_user))
        .route("/user/:user_id/subject/:subject", get(notes_for_subject))
        .route("/:id", put(update_note).delete(delete_note))
}

async fn create_note(
    State(state): State<AppState>,
    Json(payload): Json<NoteCreate>,
) -> Result<Json<NoteResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = repositories::users::find_by_id(state.db(), &payload.user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let now = primitive_now_utc();
    let note = repositories::notes::create(
        state.db(),
        repositories::notes::CreateNote {
            id: &Uuid::new_v4().to_string(),
            user_id: &user.id,
            subject: &payload.subject,
            title: &payload.title,
            content: &payload.content,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create note"))?;

    Ok(Json(NoteResponse::from_db(note)))
}

async fn notes_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let notes = repositories::notes::list_for_user(state.db(), &user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list notes"))?;

    Ok(Json(notes.into_iter().map(NoteResponse::from_db).collect()))
}

async fn notes_for_subject(
    State(state): State<AppState>,
    Path((user_id, subject)): Path<(String, String)>,
) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let notes = repositories::notes::list_for_user_subject(state.db(), &user_id, &subject)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list notes"))?;

    Ok(Json(notes.into_iter().map(NoteResponse::from_db).collect()))
}

async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NoteUpdate>,
) -> Result<Json<NoteResponse>, ApiError> {
    let updated = repositories::notes::update(
        state.db(),
        &id,
        repositories::notes::UpdateNote {
            subject: payload.subject.as_deref(),
            title: payload.title.as_deref(),
            content: payload.content.as_deref(),
            updated_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update note"))?
    .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(NoteResponse::from_db(updated)))
}

async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let deleted = repositories::notes::delete(state.db(), &id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete note"))?;

    if deleted {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::NotFound("Note not found".to_string()))
    }
}

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::admin::ResourceResponse;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/:user_id", get(recommend_for_user))
        .route("/topic/:topic_id", get(resources_for_topic))
}

// TODO: filter by the user's weakness analyses instead of returning the whole
// active catalogue
async fn recommend_for_user(
    State(state): State<AppState>,
    Path(_user_id): Path<String>,
) -> Result<Json<Vec<ResourceResponse>>, ApiError> {
    let resources = repositories::learning_resources::list_active_by_relevance(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load learning resources"))?;

    Ok(Json(resources.into_iter().map(ResourceResponse::from_db).collect()))
}

async fn resources_for_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
) -> Result<Json<Vec<ResourceResponse>>, ApiError> {
    let topic = repositories::topics::find_by_id(state.db(), &topic_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load topic"))?
        .ok_or_else(|| ApiError::NotFound("Topic not found".to_string()))?;

    let resources = repositories::learning_resources::list_for_topic(state.db(), &topic.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load learning resources"))?;

    Ok(Json(resources.into_iter().map(ResourceResponse::from_db).collect()))
}

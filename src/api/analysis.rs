use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::schemas::analysis::{RefreshQuery, WeaknessAnalysisResponse};
use crate::services::weakness;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/:user_id", get(analyze_user)).route("/refresh", post(refresh))
}

async fn analyze_user(Path(user_id): Path<String>) -> Json<WeaknessAnalysisResponse> {
    Json(weakness::predict_weakness(&user_id))
}

async fn refresh(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<WeaknessAnalysisResponse>, ApiError> {
    let analysis = weakness::refresh_for_user(state.db(), &query.user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to refresh weakness analysis"))?;
    Ok(Json(analysis))
}

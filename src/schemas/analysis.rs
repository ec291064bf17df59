use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WeaknessAnalysisResponse {
    pub(crate) topic_name: String,
    pub(crate) weakness_level: String,
    pub(crate) accuracy_percentage: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshQuery {
    pub(crate) user_id: String,
}

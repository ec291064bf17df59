use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WeakTopic {
    pub(crate) topic: String,
    pub(crate) current_score: f64,
    pub(crate) goal_score: f64,
    pub(crate) total_attempts: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecentAccuracy {
    pub(crate) name: String,
    pub(crate) accuracy: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProgressResponse {
    pub(crate) average_accuracy: f64,
    pub(crate) total_quizzes: i64,
    pub(crate) weekly_streak: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DashboardResponse {
    pub(crate) total_quizzes: i64,
    pub(crate) average_score: f64,
    pub(crate) weekly_streak: i64,
    pub(crate) weak_topics: Vec<WeakTopic>,
    pub(crate) recent_accuracy: Vec<RecentAccuracy>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveResultRequest {
    pub(crate) user_id: String,
    pub(crate) topic: String,
    pub(crate) score: i32,
    pub(crate) total_questions: i32,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusResponse {
    pub(crate) status: String,
    pub(crate) message: String,
}

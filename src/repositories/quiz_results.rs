use sqlx::{FromRow, PgConnection, PgPool};
use time::PrimitiveDateTime;

use crate::db::models::QuizResult;

const COLUMNS: &str =
    "id, user_id, quiz_id, topic, score, total_questions, accuracy, completed_at";

pub(crate) struct CreateResult<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub quiz_id: Option<&'a str>,
    pub topic: &'a str,
    pub score: i32,
    pub total_questions: i32,
    pub accuracy: f64,
    pub completed_at: PrimitiveDateTime,
}

pub(crate) async fn insert(
    conn: &mut PgConnection,
    params: CreateResult<'_>,
) -> Result<QuizResult, sqlx::Error> {
    sqlx::query_as::<_, QuizResult>(&format!(
        "INSERT INTO quiz_results (
            id, user_id, quiz_id, topic, score, total_questions, accuracy, completed_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.user_id)
    .bind(params.quiz_id)
    .bind(params.topic)
    .bind(params.score)
    .bind(params.total_questions)
    .bind(params.accuracy)
    .bind(params.completed_at)
    .fetch_one(conn)
    .await
}

pub(crate) async fn list_for_user_desc(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<QuizResult>, sqlx::Error> {
    sqlx::query_as::<_, QuizResult>(&format!(
        "SELECT {COLUMNS} FROM quiz_results WHERE user_id = $1 ORDER BY completed_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn average_accuracy(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<f64>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<f64>>(
        "SELECT AVG(accuracy) FROM quiz_results WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub(crate) async fn count_for_user(pool: &PgPool, user_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quiz_results WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Per-topic average accuracy and attempt count over the flat results table.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct TopicPerformance {
    pub(crate) topic: String,
    pub(crate) avg_accuracy: f64,
    pub(crate) total_attempts: i64,
}

pub(crate) async fn topic_performance(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<TopicPerformance>, sqlx::Error> {
    sqlx::query_as::<_, TopicPerformance>(
        "SELECT topic, AVG(accuracy) AS avg_accuracy, COUNT(*) AS total_attempts
         FROM quiz_results
         WHERE user_id = $1
         GROUP BY topic",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

use sqlx::{FromRow, PgPool};

use crate::db::models::Topic;
use crate::db::types::DifficultyLevel;

const COLUMNS: &str =
    "id, subject_id, topic_name, topic_order, difficulty_level, description, created_at";

/// Topic listing row for the public catalogue, question count included.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct TopicWithQuestionCount {
    pub(crate) id: String,
    pub(crate) topic_name: String,
    pub(crate) difficulty_level: DifficultyLevel,
    pub(crate) description: Option<String>,
    pub(crate) question_count: i64,
}

pub(crate) struct CreateTopic<'a> {
    pub id: &'a str,
    pub subject_id: &'a str,
    pub topic_name: &'a str,
    pub topic_order: i32,
    pub difficulty_level: DifficultyLevel,
    pub description: Option<&'a str>,
    pub created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateTopic<'_>) -> Result<Topic, sqlx::Error> {
    sqlx::query_as::<_, Topic>(&format!(
        "INSERT INTO topics (
            id, subject_id, topic_name, topic_order, difficulty_level, description, created_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7)
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.subject_id)
    .bind(params.topic_name)
    .bind(params.topic_order)
    .bind(params.difficulty_level)
    .bind(params.description)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Topic>, sqlx::Error> {
    sqlx::query_as::<_, Topic>(&format!("SELECT {COLUMNS} FROM topics WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list_with_question_counts(
    pool: &PgPool,
) -> Result<Vec<TopicWithQuestionCount>, sqlx::Error> {
    sqlx::query_as::<_, TopicWithQuestionCount>(
        "SELECT t.id, t.topic_name, t.difficulty_level, t.description,
                COUNT(q.id) AS question_count
         FROM topics t
         LEFT JOIN questions q ON q.topic_id = t.id
         GROUP BY t.id, t.topic_name, t.difficulty_level, t.description, t.topic_order, t.created_at
         ORDER BY t.topic_order ASC, t.created_at ASC",
    )
    .fetch_all(pool)
    .await
}

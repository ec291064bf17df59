use sqlx::PgPool;

use crate::db::models::LearningResource;
use crate::db::types::{ResourceDifficulty, ResourceType};

const COLUMNS: &str = "\
    id, topic_id, resource_type, title, url, description, difficulty_level, \
    duration_minutes, relevance_score, is_active, created_at";

pub(crate) struct CreateResource<'a> {
    pub id: &'a str,
    pub topic_id: &'a str,
    pub resource_type: ResourceType,
    pub title: &'a str,
    pub url: &'a str,
    pub description: Option<&'a str>,
    pub difficulty_level: ResourceDifficulty,
    pub duration_minutes: Option<i32>,
    pub relevance_score: f64,
    pub is_active: bool,
    pub created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateResource<'_>,
) -> Result<LearningResource, sqlx::Error> {
    sqlx::query_as::<_, LearningResource>(&format!(
        "INSERT INTO learning_resources (
            id, topic_id, resource_type, title, url, description, difficulty_level,
            duration_minutes, relevance_score, is_active, created_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.topic_id)
    .bind(params.resource_type)
    .bind(params.title)
    .bind(params.url)
    .bind(params.description)
    .bind(params.difficulty_level)
    .bind(params.duration_minutes)
    .bind(params.relevance_score)
    .bind(params.is_active)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_active_by_relevance(
    pool: &PgPool,
) -> Result<Vec<LearningResource>, sqlx::Error> {
    sqlx::query_as::<_, LearningResource>(&format!(
        "SELECT {COLUMNS} FROM learning_resources WHERE is_active ORDER BY relevance_score DESC"
    ))
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_for_topic(
    pool: &PgPool,
    topic_id: &str,
) -> Result<Vec<LearningResource>, sqlx::Error> {
    sqlx::query_as::<_, LearningResource>(&format!(
        "SELECT {COLUMNS} FROM learning_resources
         WHERE topic_id = $1
         ORDER BY relevance_score DESC",
    ))
    .bind(topic_id)
    .fetch_all(pool)
    .await
}

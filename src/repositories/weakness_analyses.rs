use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::WeaknessAnalysis;
use crate::db::types::StrengthLevel;

const COLUMNS: &str = "\
    id, user_id, topic_id, strength_level, confidence_score, avg_score, total_attempts, \
    last_attempt_date, analyzed_at";

pub(crate) struct UpsertAnalysis<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub topic_id: &'a str,
    pub strength_level: StrengthLevel,
    pub confidence_score: f64,
    pub avg_score: f64,
    pub total_attempts: i32,
    pub last_attempt_date: Option<PrimitiveDateTime>,
    pub analyzed_at: PrimitiveDateTime,
}

/// One row per (user, topic); a refresh replaces the previous analysis.
pub(crate) async fn upsert(
    pool: &PgPool,
    params: UpsertAnalysis<'_>,
) -> Result<WeaknessAnalysis, sqlx::Error> {
    sqlx::query_as::<_, WeaknessAnalysis>(&format!(
        "INSERT INTO weakness_analyses (
            id, user_id, topic_id, strength_level, confidence_score, avg_score,
            total_attempts, last_attempt_date, analyzed_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
        ON CONFLICT (user_id, topic_id) DO UPDATE SET
            strength_level = EXCLUDED.strength_level,
            confidence_score = EXCLUDED.confidence_score,
            avg_score = EXCLUDED.avg_score,
            total_attempts = EXCLUDED.total_attempts,
            last_attempt_date = EXCLUDED.last_attempt_date,
            analyzed_at = EXCLUDED.analyzed_at
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.user_id)
    .bind(params.topic_id)
    .bind(params.strength_level)
    .bind(params.confidence_score)
    .bind(params.avg_score)
    .bind(params.total_attempts)
    .bind(params.last_attempt_date)
    .bind(params.analyzed_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_for_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<WeaknessAnalysis>, sqlx::Error> {
    sqlx::query_as::<_, WeaknessAnalysis>(&format!(
        "SELECT {COLUMNS} FROM weakness_analyses WHERE user_id = $1 ORDER BY avg_score ASC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

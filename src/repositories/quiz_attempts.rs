use sqlx::{FromRow, PgConnection, PgPool};
use time::PrimitiveDateTime;

use crate::db::models::{QuizAttempt, QuizResponse};

const COLUMNS: &str = "\
    id, user_id, topic_id, total_questions, correct_answers, score_percentage, \
    time_taken_seconds, started_at, completed_at, created_at";

pub(crate) struct CreateAttempt<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub topic_id: &'a str,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub score_percentage: f64,
    pub time_taken_seconds: i32,
    pub started_at: PrimitiveDateTime,
    pub completed_at: PrimitiveDateTime,
    pub created_at: PrimitiveDateTime,
}

pub(crate) struct CreateResponse<'a> {
    pub id: &'a str,
    pub attempt_id: &'a str,
    pub question_id: &'a str,
    pub user_answer: &'a str,
    pub is_correct: bool,
    pub time_taken_seconds: Option<i32>,
    pub answered_at: PrimitiveDateTime,
}

pub(crate) async fn insert(
    conn: &mut PgConnection,
    params: CreateAttempt<'_>,
) -> Result<QuizAttempt, sqlx::Error> {
    sqlx::query_as::<_, QuizAttempt>(&format!(
        "INSERT INTO quiz_attempts (
            id, user_id, topic_id, total_questions, correct_answers, score_percentage,
            time_taken_seconds, started_at, completed_at, created_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.user_id)
    .bind(params.topic_id)
    .bind(params.total_questions)
    .bind(params.correct_answers)
    .bind(params.score_percentage)
    .bind(params.time_taken_seconds)
    .bind(params.started_at)
    .bind(params.completed_at)
    .bind(params.created_at)
    .fetch_one(conn)
    .await
}

pub(crate) async fn insert_response(
    conn: &mut PgConnection,
    params: CreateResponse<'_>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO quiz_responses (
            id, attempt_id, question_id, user_answer, is_correct, time_taken_seconds, answered_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7)",
    )
    .bind(params.id)
    .bind(params.attempt_id)
    .bind(params.question_id)
    .bind(params.user_answer)
    .bind(params.is_correct)
    .bind(params.time_taken_seconds)
    .bind(params.answered_at)
    .execute(conn)
    .await?;
    Ok(())
}

pub(crate) async fn responses_for_attempt(
    pool: &PgPool,
    attempt_id: &str,
) -> Result<Vec<QuizResponse>, sqlx::Error> {
    sqlx::query_as::<_, QuizResponse>(
        "SELECT id, attempt_id, question_id, user_answer, is_correct, time_taken_seconds, \
         answered_at
         FROM quiz_responses
         WHERE attempt_id = $1
         ORDER BY answered_at ASC, id ASC",
    )
    .bind(attempt_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_for_user_desc(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<QuizAttempt>, sqlx::Error> {
    sqlx::query_as::<_, QuizAttempt>(&format!(
        "SELECT {COLUMNS} FROM quiz_attempts WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Per-topic aggregate over a user's attempts, for the weakness refresh.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct TopicAttemptStats {
    pub(crate) topic_id: String,
    pub(crate) topic_name: String,
    pub(crate) avg_score: f64,
    pub(crate) total_attempts: i64,
    pub(crate) last_attempt_date: Option<PrimitiveDateTime>,
}

pub(crate) async fn topic_stats_for_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<TopicAttemptStats>, sqlx::Error> {
    sqlx::query_as::<_, TopicAttemptStats>(
        "SELECT qa.topic_id,
                t.topic_name,
                AVG(qa.score_percentage) AS avg_score,
                COUNT(*) AS total_attempts,
                MAX(qa.completed_at) AS last_attempt_date
         FROM quiz_attempts qa
         JOIN topics t ON t.id = qa.topic_id
         WHERE qa.user_id = $1
         GROUP BY qa.topic_id, t.topic_name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

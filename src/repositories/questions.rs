use sqlx::{PgConnection, PgPool};

use crate::db::models::{Question, QuestionOption};
use crate::db::types::{DifficultyLevel, QuestionType};

const COLUMNS: &str = "\
    id, topic_id, question_text, question_type, difficulty_level, correct_answer, \
    explanation, is_active, created_at, updated_at";

const OPTION_COLUMNS: &str = "id, question_id, option_label, option_text, is_correct";

pub(crate) struct CreateQuestion<'a> {
    pub id: &'a str,
    pub topic_id: &'a str,
    pub question_text: &'a str,
    pub question_type: QuestionType,
    pub difficulty_level: DifficultyLevel,
    pub correct_answer: &'a str,
    pub explanation: Option<&'a str>,
    pub is_active: bool,
    pub created_at: time::PrimitiveDateTime,
    pub updated_at: time::PrimitiveDateTime,
}

pub(crate) struct CreateOption<'a> {
    pub id: &'a str,
    pub question_id: &'a str,
    pub option_label: &'a str,
    pub option_text: &'a str,
    pub is_correct: bool,
}

pub(crate) async fn insert(
    conn: &mut PgConnection,
    params: CreateQuestion<'_>,
) -> Result<Question, sqlx::Error> {
    sqlx::query_as::<_, Question>(&format!(
        "INSERT INTO questions (
            id, topic_id, question_text, question_type, difficulty_level, correct_answer,
            explanation, is_active, created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
        RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.topic_id)
    .bind(params.question_text)
    .bind(params.question_type)
    .bind(params.difficulty_level)
    .bind(params.correct_answer)
    .bind(params.explanation)
    .bind(params.is_active)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(conn)
    .await
}

pub(crate) async fn insert_option(
    conn: &mut PgConnection,
    params: CreateOption<'_>,
) -> Result<QuestionOption, sqlx::Error> {
    sqlx::query_as::<_, QuestionOption>(&format!(
        "INSERT INTO question_options (id, question_id, option_label, option_text, is_correct)
         VALUES ($1,$2,$3,$4,$5)
         RETURNING {OPTION_COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.question_id)
    .bind(params.option_label)
    .bind(params.option_text)
    .bind(params.is_correct)
    .fetch_one(conn)
    .await
}

pub(crate) async fn list_by_topic(
    pool: &PgPool,
    topic_id: &str,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {COLUMNS} FROM questions WHERE topic_id = $1 ORDER BY created_at ASC"
    ))
    .bind(topic_id)
    .fetch_all(pool)
    .await
}

/// Uniform draw without replacement across matching active questions, capped by `limit`.
pub(crate) async fn list_random_active(
    pool: &PgPool,
    topic_id: &str,
    difficulty: Option<DifficultyLevel>,
    limit: i64,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {COLUMNS} FROM questions
         WHERE topic_id = $1
           AND is_active
           AND ($2::difficultylevel IS NULL OR difficulty_level = $2::difficultylevel)
         ORDER BY RANDOM()
         LIMIT $3",
    ))
    .bind(topic_id)
    .bind(difficulty)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub(crate) async fn find_by_ids(
    pool: &PgPool,
    ids: &[String],
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {COLUMNS} FROM questions WHERE id = ANY($1)"
    ))
    .bind(ids)
    .fetch_all(pool)
    .await
}

pub(crate) async fn options_for_questions(
    pool: &PgPool,
    question_ids: &[String],
) -> Result<Vec<QuestionOption>, sqlx::Error> {
    sqlx::query_as::<_, QuestionOption>(&format!(
        "SELECT {OPTION_COLUMNS} FROM question_options
         WHERE question_id = ANY($1)
         ORDER BY question_id, option_label ASC",
    ))
    .bind(question_ids)
    .fetch_all(pool)
    .await
}

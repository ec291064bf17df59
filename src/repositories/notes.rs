use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::Note;

const COLUMNS: &str = "id, user_id, subject, title, content, created_at, updated_at";

pub(crate) struct CreateNote<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub subject: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateNote<'_>) -> Result<Note, sqlx::Error> {
    sqlx::query_as::<_, Note>(&format!(
        "INSERT INTO notes (id, user_id, subject, title, content, created_at, updated_at)
         VALUES ($1,$2,$3,$4,$5,$6,$7)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.user_id)
    .bind(params.subject)
    .bind(params.title)
    .bind(params.content)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(&format!("SELECT {COLUMNS} FROM notes WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list_for_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(&format!(
        "SELECT {COLUMNS} FROM notes WHERE user_id = $1 ORDER BY updated_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_for_user_subject(
    pool: &PgPool,
    user_id: &str,
    subject: &str,
) -> Result<Vec<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(&format!(
        "SELECT {COLUMNS} FROM notes WHERE user_id = $1 AND subject = $2 ORDER BY updated_at DESC"
    ))
    .bind(user_id)
    .bind(subject)
    .fetch_all(pool)
    .await
}

pub(crate) struct UpdateNote<'a> {
    pub subject: Option<&'a str>,
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub updated_at: PrimitiveDateTime,
}

pub(crate) async fn update(
    pool: &PgPool,
    id: &str,
    params: UpdateNote<'_>,
) -> Result<Option<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(&format!(
        "UPDATE notes SET
            subject = COALESCE($1, subject),
            title = COALESCE($2, title),
            content = COALESCE($3, content),
            updated_at = $4
         WHERE id = $5
         RETURNING {COLUMNS}",
    ))
    .bind(params.subject)
    .bind(params.title)
    .bind(params.content)
    .bind(params.updated_at)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM notes WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

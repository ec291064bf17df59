use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::core::time::{primitive_now_utc, to_primitive_utc};
use crate::db::models::Topic;
use crate::db::types::DifficultyLevel;
use crate::repositories;
use crate::schemas::quiz::{
    AttemptResponse, QuestionResponse, QuizQuestionsResponse, SubmitRequest, SubmitResponse,
    TopicSummary,
};
use crate::services::scoring;

/// A generated quiz never exceeds ten questions.
const QUIZ_SIZE: i64 = 10;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/topics", get(list_topics))
        .route("/:topic_id/difficulty/:difficulty", get(quiz_by_difficulty))
        .route("/:topic_id/questions", get(questions_for_topic))
        .route("/submit", post(submit))
        .route("/history/:user_id", get(history))
}

async fn list_topics(
    State(state): State<AppState>,
) -> Result<Json<Vec<TopicSummary>>, ApiError> {
    let rows = repositories::topics::list_with_question_counts(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list topics"))?;

    Ok(Json(rows.into_iter().map(TopicSummary::from_row).collect()))
}

async fn quiz_by_difficulty(
    State(state): State<AppState>,
    Path((topic_id, difficulty)): Path<(String, String)>,
) -> Result<Json<QuizQuestionsResponse>, ApiError> {
    let difficulty = DifficultyLevel::parse(&difficulty)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid difficulty level: {difficulty}")))?;

    let topic = fetch_topic(&state, &topic_id).await?;

    let questions =
        repositories::questions::list_random_active(state.db(), &topic.id, Some(difficulty), QUIZ_SIZE)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load questions"))?;

    if questions.is_empty() {
        tracing::warn!(topic_id = %topic.id, ?difficulty, "No questions found for quiz");
    }

    let questions = with_options(&state, questions).await?;

    Ok(Json(QuizQuestionsResponse {
        topic_id: topic.id,
        topic_name: topic.topic_name,
        questions,
    }))
}

async fn questions_for_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
) -> Result<Json<Vec<QuestionResponse>>, ApiError> {
    let questions = repositories::questions::list_by_topic(state.db(), &topic_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load questions"))?;

    Ok(Json(with_options(&state, questions).await?))
}

async fn submit(
    CurrentUser(context): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let topic = fetch_topic(&state, &payload.topic_id).await?;

    let now = OffsetDateTime::now_utc();
    let started_at = to_primitive_utc(payload.started_at.unwrap_or(now));
    let completed_at = to_primitive_utc(payload.completed_at.unwrap_or(now));
    if completed_at < started_at {
        return Err(ApiError::BadRequest(
            "completedAt must not precede startedAt".to_string(),
        ));
    }
    let time_taken_seconds = (completed_at - started_at).whole_seconds() as i32;

    let question_ids: Vec<String> =
        payload.answers.iter().map(|answer| answer.question_id.clone()).collect();
    let questions = repositories::questions::find_by_ids(state.db(), &question_ids)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load questions"))?;

    let mut graded = Vec::with_capacity(payload.answers.len());
    for answer in &payload.answers {
        let question = questions
            .iter()
            .find(|question| question.id == answer.question_id)
            .ok_or_else(|| {
                ApiError::NotFound(format!("Question not found: {}", answer.question_id))
            })?;
        let is_correct = scoring::grade_answer(&answer.selected_answer, &question.correct_answer);
        graded.push((answer, is_correct));
    }

    let total_questions = graded.len() as i32;
    let correct_answers = graded.iter().filter(|(_, is_correct)| *is_correct).count() as i32;
    let score = scoring::score_percentage(correct_answers, total_questions);

    let created_at = primitive_now_utc();
    let attempt_id = Uuid::new_v4().to_string();

    // The attempt, its responses, and the flat analytics row land together or
    // not at all.
    let mut tx = state
        .db()
        .begin()
        .await
        .map_err(|e| ApiError::internal(e, "Failed to start transaction"))?;

    let attempt = repositories::quiz_attempts::insert(
        &mut *tx,
        repositories::quiz_attempts::CreateAttempt {
            id: &attempt_id,
            user_id: &context.user_id,
            topic_id: &topic.id,
            total_questions,
            correct_answers,
            score_percentage: score,
            time_taken_seconds,
            started_at,
            completed_at,
            created_at,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to record quiz attempt"))?;

    for (answer, is_correct) in &graded {
        repositories::quiz_attempts::insert_response(
            &mut *tx,
            repositories::quiz_attempts::CreateResponse {
                id: &Uuid::new_v4().to_string(),
                attempt_id: &attempt.id,
                question_id: &answer.question_id,
                user_answer: &answer.selected_answer,
                is_correct: *is_correct,
                time_taken_seconds: answer.time_taken_seconds,
                answered_at: completed_at,
            },
        )
        .await
        .map_err(|e| ApiError::internal(e, "Failed to record quiz response"))?;
    }

    repositories::quiz_results::insert(
        &mut *tx,
        repositories::quiz_results::CreateResult {
            id: &Uuid::new_v4().to_string(),
            user_id: &context.user_id,
            quiz_id: Some(&attempt.id),
            topic: &topic.topic_name,
            score: correct_answers,
            total_questions,
            accuracy: score,
            completed_at,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to record quiz result"))?;

    tx.commit().await.map_err(|e| ApiError::internal(e, "Failed to commit transaction"))?;

    tracing::info!(
        attempt_id = %attempt.id,
        user_id = %context.user_id,
        score,
        "Quiz attempt submitted"
    );

    Ok(Json(SubmitResponse {
        message: format!("Quiz submitted successfully. Score: {score}%"),
    }))
}

async fn history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<AttemptResponse>>, ApiError> {
    let attempts = repositories::quiz_attempts::list_for_user_desc(state.db(), &user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load quiz history"))?;

    Ok(Json(attempts.into_iter().map(AttemptResponse::from_db).collect()))
}

async fn fetch_topic(state: &AppState, topic_id: &str) -> Result<Topic, ApiError> {
    repositories::topics::find_by_id(state.db(), topic_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load topic"))?
        .ok_or_else(|| ApiError::NotFound("Topic not found".to_string()))
}

async fn with_options(
    state: &AppState,
    questions: Vec<crate::db::models::Question>,
) -> Result<Vec<QuestionResponse>, ApiError> {
    let ids: Vec<String> = questions.iter().map(|question| question.id.clone()).collect();
    let options = repositories::questions::options_for_questions(state.db(), &ids)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load question options"))?;

    Ok(QuestionResponse::from_db_many(questions, options))
}

#[cfg(test)]
mod tests;

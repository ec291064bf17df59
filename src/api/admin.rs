use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::{is_unique_violation, ApiError};
use crate::api::validation::{validate_question_payload, validate_relevance_score};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::admin::{
    QuestionCreate, ResourceCreate, ResourceResponse, SubjectCreate, SubjectResponse, TopicCreate,
    TopicResponse,
};
use crate::schemas::quiz::QuestionResponse;

const DEFAULT_RELEVANCE_SCORE: f64 = 0.5;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/subject", post(create_subject))
        .route("/topic", post(create_topic))
        .route("/question", post(create_question))
        .route("/resource", post(create_resource))
        .route("/subjects", get(list_subjects))
}

async fn create_subject(
    State(state): State<AppState>,
    Json(payload): Json<SubjectCreate>,
) -> Result<Json<SubjectResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let subject = repositories::subjects::create(
        state.db(),
        repositories::subjects::CreateSubject {
            id: &Uuid::new_v4().to_string(),
            subject_name: &payload.subject_name,
            subject_code: &payload.subject_code,
            description: payload.description.as_deref(),
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("Subject code already exists".to_string())
        } else {
            ApiError::internal(e, "Failed to create subject")
        }
    })?;

    Ok(Json(SubjectResponse::from_db(subject)))
}

async fn create_topic(
    State(state): State<AppState>,
    Json(payload): Json<TopicCreate>,
) -> Result<Json<TopicResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let subject = repositories::subjects::find_by_id(state.db(), &payload.subject_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load subject"))?
        .ok_or_else(|| ApiError::NotFound("Subject not found".to_string()))?;

    let topic = repositories::topics::create(
        state.db(),
        repositories::topics::CreateTopic {
            id: &Uuid::new_v4().to_string(),
            subject_id: &subject.id,
            topic_name: &payload.topic_name,
            topic_order: payload.topic_order,
            difficulty_level: payload.difficulty_level,
            description: payload.description.as_deref(),
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create topic"))?;

    Ok(Json(TopicResponse::from_db(topic)))
}

async fn create_question(
    State(state): State<AppState>,
    Json(payload): Json<QuestionCreate>,
) -> Result<Json<QuestionResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    validate_question_payload(&payload)?;

    let topic = repositories::topics::find_by_id(state.db(), &payload.topic_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load topic"))?
        .ok_or_else(|| ApiError::NotFound("Topic not found".to_string()))?;

    let now = primitive_now_utc();
    let question_id = Uuid::new_v4().to_string();

    let mut tx = state
        .db()
        .begin()
        .await
        .map_err(|e| ApiError::internal(e, "Failed to start transaction"))?;

    let question = repositories::questions::insert(
        &mut *tx,
        repositories::questions::CreateQuestion {
            id: &question_id,
            topic_id: &topic.id,
            question_text: &payload.question_text,
            question_type: payload.question_type,
            difficulty_level: payload.difficulty_level,
            correct_answer: &payload.correct_answer,
            explanation: payload.explanation.as_deref(),
            is_active: payload.is_active,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create question"))?;

    let mut options = Vec::with_capacity(payload.options.len());
    for option in &payload.options {
        let created = repositories::questions::insert_option(
            &mut *tx,
            repositories::questions::CreateOption {
                id: &Uuid::new_v4().to_string(),
                question_id: &question.id,
                option_label: &option.option_label.trim().to_ascii_uppercase(),
                option_text: &option.option_text,
                is_correct: option.is_correct,
            },
        )
        .await
        .map_err(|e| ApiError::internal(e, "Failed to create question option"))?;
        options.push(created);
    }

    tx.commit().await.map_err(|e| ApiError::internal(e, "Failed to commit transaction"))?;

    Ok(Json(QuestionResponse::from_db(question, options)))
}

async fn create_resource(
    State(state): State<AppState>,
    Json(payload): Json<ResourceCreate>,
) -> Result<Json<ResourceResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let relevance_score = payload.relevance_score.unwrap_or(DEFAULT_RELEVANCE_SCORE);
    validate_relevance_score(relevance_score)?;

    let topic = repositories::topics::find_by_id(state.db(), &payload.topic_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load topic"))?
        .ok_or_else(|| ApiError::NotFound("Topic not found".to_string()))?;

    let resource = repositories::learning_resources::create(
        state.db(),
        repositories::learning_resources::CreateResource {
            id: &Uuid::new_v4().to_string(),
            topic_id: &topic.id,
            resource_type: payload.resource_type,
            title: &payload.title,
            url: &payload.url,
            description: payload.description.as_deref(),
            difficulty_level: payload.difficulty_level,
            duration_minutes: payload.duration_minutes,
            relevance_score,
            is_active: payload.is_active,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create learning resource"))?;

    Ok(Json(ResourceResponse::from_db(resource)))
}

async fn list_subjects(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubjectResponse>>, ApiError> {
    let subjects = repositories::subjects::list_all(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list subjects"))?;

    Ok(Json(subjects.into_iter().map(SubjectResponse::from_db).collect()))
}

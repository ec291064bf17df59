use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::{LearningResource, Subject, Topic};
use crate::db::types::{DifficultyLevel, QuestionType, ResourceDifficulty, ResourceType};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubjectCreate {
    #[validate(length(min = 1, max = 100, message = "subjectName must be between 1 and 100 chars"))]
    pub(crate) subject_name: String,
    #[validate(length(min = 1, max = 20, message = "subjectCode must be between 1 and 20 chars"))]
    pub(crate) subject_code: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TopicCreate {
    pub(crate) subject_id: String,
    #[validate(length(min = 1, max = 100, message = "topicName must be between 1 and 100 chars"))]
    pub(crate) topic_name: String,
    #[serde(default)]
    pub(crate) topic_order: i32,
    pub(crate) difficulty_level: DifficultyLevel,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OptionCreate {
    pub(crate) option_label: String,
    pub(crate) option_text: String,
    #[serde(default)]
    pub(crate) is_correct: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionCreate {
    pub(crate) topic_id: String,
    #[validate(length(min = 1, message = "questionText is required"))]
    pub(crate) question_text: String,
    pub(crate) question_type: QuestionType,
    pub(crate) difficulty_level: DifficultyLevel,
    #[validate(length(min = 1, message = "correctAnswer is required"))]
    pub(crate) correct_answer: String,
    #[serde(default)]
    pub(crate) explanation: Option<String>,
    #[serde(default = "default_true")]
    pub(crate) is_active: bool,
    #[serde(default)]
    pub(crate) options: Vec<OptionCreate>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResourceCreate {
    pub(crate) topic_id: String,
    pub(crate) resource_type: ResourceType,
    #[validate(length(min = 1, max = 200, message = "title must be between 1 and 200 chars"))]
    pub(crate) title: String,
    #[validate(length(min = 1, max = 500, message = "url must be between 1 and 500 chars"))]
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    pub(crate) difficulty_level: ResourceDifficulty,
    #[serde(default)]
    pub(crate) duration_minutes: Option<i32>,
    #[serde(default)]
    pub(crate) relevance_score: Option<f64>,
    #[serde(default = "default_true")]
    pub(crate) is_active: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubjectResponse {
    pub(crate) subject_id: String,
    pub(crate) subject_name: String,
    pub(crate) subject_code: String,
    pub(crate) description: Option<String>,
    pub(crate) created_at: String,
}

impl SubjectResponse {
    pub(crate) fn from_db(subject: Subject) -> Self {
        Self {
            subject_id: subject.id,
            subject_name: subject.subject_name,
            subject_code: subject.subject_code,
            description: subject.description,
            created_at: format_primitive(subject.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TopicResponse {
    pub(crate) topic_id: String,
    pub(crate) subject_id: String,
    pub(crate) topic_name: String,
    pub(crate) topic_order: i32,
    pub(crate) difficulty_level: DifficultyLevel,
    pub(crate) description: Option<String>,
    pub(crate) created_at: String,
}

impl TopicResponse {
    pub(crate) fn from_db(topic: Topic) -> Self {
        Self {
            topic_id: topic.id,
            subject_id: topic.subject_id,
            topic_name: topic.topic_name,
            topic_order: topic.topic_order,
            difficulty_level: topic.difficulty_level,
            description: topic.description,
            created_at: format_primitive(topic.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResourceResponse {
    pub(crate) resource_id: String,
    pub(crate) topic_id: String,
    pub(crate) resource_type: ResourceType,
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) description: Option<String>,
    pub(crate) difficulty_level: ResourceDifficulty,
    pub(crate) duration_minutes: Option<i32>,
    pub(crate) relevance_score: f64,
    pub(crate) is_active: bool,
    pub(crate) created_at: String,
}

impl ResourceResponse {
    pub(crate) fn from_db(resource: LearningResource) -> Self {
        Self {
            resource_id: resource.id,
            topic_id: resource.topic_id,
            resource_type: resource.resource_type,
            title: resource.title,
            url: resource.url,
            description: resource.description,
            difficulty_level: resource.difficulty_level,
            duration_minutes: resource.duration_minutes,
            relevance_score: resource.relevance_score,
            is_active: resource.is_active,
            created_at: format_primitive(resource.created_at),
        }
    }
}

fn default_true() -> bool {
    true
}

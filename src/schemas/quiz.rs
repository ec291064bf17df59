use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::core::time::format_primitive;
use crate::db::models::{Question, QuestionOption, QuizAttempt};
use crate::db::types::{DifficultyLevel, QuestionType, StrengthLevel};
use crate::repositories::topics::TopicWithQuestionCount;
use crate::services::scoring;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TopicSummary {
    pub(crate) topic_id: String,
    pub(crate) topic_name: String,
    pub(crate) difficulty_level: DifficultyLevel,
    pub(crate) description: Option<String>,
    pub(crate) question_count: i64,
}

impl TopicSummary {
    pub(crate) fn from_row(row: TopicWithQuestionCount) -> Self {
        Self {
            topic_id: row.id,
            topic_name: row.topic_name,
            difficulty_level: row.difficulty_level,
            description: row.description,
            question_count: row.question_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OptionResponse {
    pub(crate) option_id: String,
    pub(crate) option_label: String,
    pub(crate) option_text: String,
    pub(crate) is_correct: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionResponse {
    pub(crate) question_id: String,
    pub(crate) topic_id: String,
    pub(crate) question_text: String,
    pub(crate) question_type: QuestionType,
    pub(crate) difficulty_level: DifficultyLevel,
    pub(crate) correct_answer: String,
    pub(crate) explanation: Option<String>,
    pub(crate) is_active: bool,
    pub(crate) options: Vec<OptionResponse>,
}

impl QuestionResponse {
    pub(crate) fn from_db(question: Question, options: Vec<QuestionOption>) -> Self {
        Self {
            question_id: question.id,
            topic_id: question.topic_id,
            question_text: question.question_text,
            question_type: question.question_type,
            difficulty_level: question.difficulty_level,
            correct_answer: question.correct_answer,
            explanation: question.explanation,
            is_active: question.is_active,
            options: options
                .into_iter()
                .map(|option| OptionResponse {
                    option_id: option.id,
                    option_label: option.option_label,
                    option_text: option.option_text,
                    is_correct: option.is_correct,
                })
                .collect(),
        }
    }

    /// Pair each question with its options, preserving question order.
    pub(crate) fn from_db_many(
        questions: Vec<Question>,
        options: Vec<QuestionOption>,
    ) -> Vec<Self> {
        let mut by_question: HashMap<String, Vec<QuestionOption>> = HashMap::new();
        for option in options {
            by_question.entry(option.question_id.clone()).or_default().push(option);
        }

        questions
            .into_iter()
            .map(|question| {
                let options = by_question.remove(&question.id).unwrap_or_default();
                Self::from_db(question, options)
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizQuestionsResponse {
    pub(crate) topic_id: String,
    pub(crate) topic_name: String,
    pub(crate) questions: Vec<QuestionResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitAnswer {
    pub(crate) question_id: String,
    #[serde(alias = "userAnswer")]
    pub(crate) selected_answer: String,
    #[serde(default)]
    pub(crate) time_taken_seconds: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitRequest {
    pub(crate) topic_id: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub(crate) started_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub(crate) completed_at: Option<OffsetDateTime>,
    pub(crate) answers: Vec<SubmitAnswer>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitResponse {
    pub(crate) message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AttemptResponse {
    pub(crate) attempt_id: String,
    pub(crate) user_id: String,
    pub(crate) topic_id: String,
    pub(crate) total_questions: i32,
    pub(crate) correct_answers: i32,
    pub(crate) score_percentage: f64,
    pub(crate) time_taken_seconds: i32,
    pub(crate) started_at: String,
    pub(crate) completed_at: String,
    pub(crate) performance_level: StrengthLevel,
    pub(crate) passed: bool,
}

impl AttemptResponse {
    pub(crate) fn from_db(attempt: QuizAttempt) -> Self {
        Self {
            attempt_id: attempt.id,
            user_id: attempt.user_id,
            topic_id: attempt.topic_id,
            total_questions: attempt.total_questions,
            correct_answers: attempt.correct_answers,
            score_percentage: attempt.score_percentage,
            time_taken_seconds: attempt.time_taken_seconds,
            started_at: format_primitive(attempt.started_at),
            completed_at: format_primitive(attempt.completed_at),
            performance_level: scoring::performance_level(attempt.score_percentage),
            passed: scoring::passed(attempt.score_percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::primitive_now_utc;

    #[test]
    fn attempt_response_derives_performance_fields() {
        let now = primitive_now_utc();
        let attempt = QuizAttempt {
            id: "a-1".to_string(),
            user_id: "u-1".to_string(),
            topic_id: "t-1".to_string(),
            total_questions: 3,
            correct_answers: 2,
            score_percentage: 66.67,
            time_taken_seconds: 120,
            started_at: now,
            completed_at: now,
            created_at: now,
        };

        let response = AttemptResponse::from_db(attempt);
        assert_eq!(response.performance_level, StrengthLevel::Moderate);
        assert!(response.passed);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["performanceLevel"], "MODERATE");
        assert_eq!(json["scorePercentage"], 66.67);
    }

    #[test]
    fn submit_answer_accepts_user_answer_alias() {
        let answer: SubmitAnswer =
            serde_json::from_str(r#"{"questionId":"q-1","userAnswer":"A"}"#).unwrap();
        assert_eq!(answer.selected_answer, "A");
        assert_eq!(answer.time_taken_seconds, None);
    }

    #[test]
    fn options_group_by_question() {
        let now = primitive_now_utc();
        let question = |id: &str| Question {
            id: id.to_string(),
            topic_id: "t-1".to_string(),
            question_text: "?".to_string(),
            question_type: QuestionType::Mcq,
            difficulty_level: DifficultyLevel::Easy,
            correct_answer: "A".to_string(),
            explanation: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let option = |id: &str, question_id: &str| QuestionOption {
            id: id.to_string(),
            question_id: question_id.to_string(),
            option_label: "A".to_string(),
            option_text: "text".to_string(),
            is_correct: true,
        };

        let responses = QuestionResponse::from_db_many(
            vec![question("q-1"), question("q-2")],
            vec![option("o-1", "q-1"), option("o-2", "q-2"), option("o-3", "q-2")],
        );

        assert_eq!(responses[0].options.len(), 1);
        assert_eq!(responses[1].options.len(), 2);
    }
}

use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::db::types::{
    DifficultyLevel, QuestionType, ResourceDifficulty, ResourceType, StrengthLevel, UserRole,
};

#[derive(Debug, Clone, FromRow)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) hashed_password: String,
    pub(crate) full_name: String,
    pub(crate) role: UserRole,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct Subject {
    pub(crate) id: String,
    pub(crate) subject_name: String,
    pub(crate) subject_code: String,
    pub(crate) description: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct Topic {
    pub(crate) id: String,
    pub(crate) subject_id: String,
    pub(crate) topic_name: String,
    pub(crate) topic_order: i32,
    pub(crate) difficulty_level: DifficultyLevel,
    pub(crate) description: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct Question {
    pub(crate) id: String,
    pub(crate) topic_id: String,
    pub(crate) question_text: String,
    pub(crate) question_type: QuestionType,
    pub(crate) difficulty_level: DifficultyLevel,
    pub(crate) correct_answer: String,
    pub(crate) explanation: Option<String>,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct QuestionOption {
    pub(crate) id: String,
    pub(crate) question_id: String,
    pub(crate) option_label: String,
    pub(crate) option_text: String,
    pub(crate) is_correct: bool,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct QuizAttempt {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) topic_id: String,
    pub(crate) total_questions: i32,
    pub(crate) correct_answers: i32,
    pub(crate) score_percentage: f64,
    pub(crate) time_taken_seconds: i32,
    pub(crate) started_at: PrimitiveDateTime,
    pub(crate) completed_at: PrimitiveDateTime,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct QuizResponse {
    pub(crate) id: String,
    pub(crate) attempt_id: String,
    pub(crate) question_id: String,
    pub(crate) user_answer: String,
    pub(crate) is_correct: bool,
    pub(crate) time_taken_seconds: Option<i32>,
    pub(crate) answered_at: PrimitiveDateTime,
}

/// Flat per-quiz record the analytics queries aggregate over.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct QuizResult {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) quiz_id: Option<String>,
    pub(crate) topic: String,
    pub(crate) score: i32,
    pub(crate) total_questions: i32,
    pub(crate) accuracy: f64,
    pub(crate) completed_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct WeaknessAnalysis {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) topic_id: String,
    pub(crate) strength_level: StrengthLevel,
    pub(crate) confidence_score: f64,
    pub(crate) avg_score: f64,
    pub(crate) total_attempts: i32,
    pub(crate) last_attempt_date: Option<PrimitiveDateTime>,
    pub(crate) analyzed_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct LearningResource {
    pub(crate) id: String,
    pub(crate) topic_id: String,
    pub(crate) resource_type: ResourceType,
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) description: Option<String>,
    pub(crate) difficulty_level: ResourceDifficulty,
    pub(crate) duration_minutes: Option<i32>,
    pub(crate) relevance_score: f64,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct Note {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) subject: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

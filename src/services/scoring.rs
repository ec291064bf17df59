use crate::db::types::StrengthLevel;

pub(crate) const PASS_THRESHOLD: f64 = 60.0;
pub(crate) const STRONG_THRESHOLD: f64 = 80.0;

/// Answers match when they are equal after trimming and lowercasing.
pub(crate) fn grade_answer(user_answer: &str, correct_answer: &str) -> bool {
    user_answer.trim().to_lowercase() == correct_answer.trim().to_lowercase()
}

/// Percentage of correct answers, rounded to two decimals. Zero questions
/// score zero rather than dividing by zero.
pub(crate) fn score_percentage(correct_answers: i32, total_questions: i32) -> f64 {
    if total_questions <= 0 {
        return 0.0;
    }
    round2(100.0 * f64::from(correct_answers) / f64::from(total_questions))
}

pub(crate) fn performance_level(score: f64) -> StrengthLevel {
    if score >= STRONG_THRESHOLD {
        StrengthLevel::Strong
    } else if score >= PASS_THRESHOLD {
        StrengthLevel::Moderate
    } else {
        StrengthLevel::Weak
    }
}

pub(crate) fn passed(score: f64) -> bool {
    score >= PASS_THRESHOLD
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

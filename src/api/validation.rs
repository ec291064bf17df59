use crate::api::errors::ApiError;
use crate::db::types::QuestionType;
use crate::schemas::admin::QuestionCreate;

const MCQ_LABELS: &[&str] = &["A", "B", "C", "D"];

/// Enforce the MCQ shape: labels A-D without duplicates, exactly one correct
/// option, and `correctAnswer` naming that option. Non-MCQ questions carry no
/// options at all.
pub(crate) fn validate_question_payload(payload: &QuestionCreate) -> Result<(), ApiError> {
    if payload.question_type != QuestionType::Mcq {
        if !payload.options.is_empty() {
            return Err(ApiError::BadRequest(
                "Options are only allowed for MCQ questions".to_string(),
            ));
        }
        return Ok(());
    }

    if payload.options.is_empty() {
        return Err(ApiError::BadRequest("MCQ questions require options".to_string()));
    }

    let mut seen = Vec::new();
    for option in &payload.options {
        let label = option.option_label.trim().to_ascii_uppercase();
        if !MCQ_LABELS.contains(&label.as_str()) {
            return Err(ApiError::BadRequest(format!(
                "Option label '{}' must be one of A, B, C, D",
                option.option_label
            )));
        }
        if seen.contains(&label) {
            return Err(ApiError::BadRequest(format!("Duplicate option label '{label}'")));
        }
        seen.push(label);
    }

    let correct: Vec<&str> = payload
        .options
        .iter()
        .filter(|option| option.is_correct)
        .map(|option| option.option_label.as_str())
        .collect();

    if correct.len() != 1 {
        return Err(ApiError::BadRequest(
            "MCQ questions require exactly one correct option".to_string(),
        ));
    }

    let answer = payload.correct_answer.trim().to_ascii_uppercase();
    if answer != correct[0].trim().to_ascii_uppercase() {
        return Err(ApiError::BadRequest(
            "correctAnswer must equal the correct option's label".to_string(),
        ));
    }

    Ok(())
}

pub(crate) fn validate_relevance_score(score: f64) -> Result<(), ApiError> {
    if (0.0..=1.0).contains(&score) {
        Ok(())
    } else {
        Err(ApiError::BadRequest("relevanceScore must be between 0 and 1".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::types::DifficultyLevel;
    use crate::schemas::admin::OptionCreate;

    fn mcq(options: Vec<OptionCreate>, correct_answer: &str) -> QuestionCreate {
        QuestionCreate {
            topic_id: "t-1".to_string(),
            question_text: "Pick one".to_string(),
            question_type: QuestionType::Mcq,
            difficulty_level: DifficultyLevel::Easy,
            correct_answer: correct_answer.to_string(),
            explanation: None,
            is_active: true,
            options,
        }
    }

    fn option(label: &str, is_correct: bool) -> OptionCreate {
        OptionCreate {
            option_label: label.to_string(),
            option_text: format!("option {label}"),
            is_correct,
        }
    }

    #[test]
    fn valid_mcq_passes() {
        let payload = mcq(vec![option("A", true), option("B", false)], "A");
        assert!(validate_question_payload(&payload).is_ok());
    }

    #[test]
    fn mcq_requires_exactly_one_correct_option() {
        let none = mcq(vec![option("A", false), option("B", false)], "A");
        assert!(validate_question_payload(&none).is_err());

        let two = mcq(vec![option("A", true), option("B", true)], "A");
        assert!(validate_question_payload(&two).is_err());
    }

    #[test]
    fn mcq_correct_answer_must_match_label() {
        let payload = mcq(vec![option("A", true), option("B", false)], "B");
        assert!(validate_question_payload(&payload).is_err());
    }

    #[test]
    fn mcq_rejects_out_of_range_labels() {
        let payload = mcq(vec![option("E", true)], "E");
        assert!(validate_question_payload(&payload).is_err());
    }

    #[test]
    fn mcq_rejects_duplicate_labels() {
        let payload = mcq(vec![option("A", true), option("a", false)], "A");
        assert!(validate_question_payload(&payload).is_err());
    }

    #[test]
    fn non_mcq_must_not_carry_options() {
        let mut payload = mcq(vec![option("A", true)], "TRUE");
        payload.question_type = QuestionType::TrueFalse;
        assert!(validate_question_payload(&payload).is_err());

        payload.options.clear();
        assert!(validate_question_payload(&payload).is_ok());
    }

    #[test]
    fn relevance_score_bounds() {
        assert!(validate_relevance_score(0.0).is_ok());
        assert!(validate_relevance_score(1.0).is_ok());
        assert!(validate_relevance_score(1.1).is_err());
        assert!(validate_relevance_score(-0.1).is_err());
    }
}

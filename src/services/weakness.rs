use sqlx::PgPool;
use uuid::Uuid;

use crate::core::time::primitive_now_utc;
use crate::db::types::StrengthLevel;
use crate::repositories;
use crate::schemas::analysis::WeaknessAnalysisResponse;
use crate::services::scoring;

/// Contract of the external weakness predictor. The model service is not
/// deployed, so this returns a fixed value.
// TODO: call the Python prediction API once it is deployed
pub(crate) fn predict_weakness(_user_id: &str) -> WeaknessAnalysisResponse {
    WeaknessAnalysisResponse {
        topic_name: "DSA".to_string(),
        weakness_level: "Weak".to_string(),
        accuracy_percentage: 45.0,
    }
}

/// Recompute per-topic aggregates from the user's attempts and replace the
/// stored analyses. Returns the weakest topic, or the predictor's answer when
/// the user has no attempts yet.
pub(crate) async fn refresh_for_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<WeaknessAnalysisResponse, sqlx::Error> {
    let stats = repositories::quiz_attempts::topic_stats_for_user(pool, user_id).await?;
    if stats.is_empty() {
        return Ok(predict_weakness(user_id));
    }

    let analyzed_at = primitive_now_utc();
    let mut weakest: Option<(String, f64)> = None;

    for row in &stats {
        let strength_level = scoring::performance_level(row.avg_score);
        repositories::weakness_analyses::upsert(
            pool,
            repositories::weakness_analyses::UpsertAnalysis {
                id: &Uuid::new_v4().to_string(),
                user_id,
                topic_id: &row.topic_id,
                strength_level,
                confidence_score: confidence_score(row.total_attempts),
                avg_score: row.avg_score,
                total_attempts: row.total_attempts as i32,
                last_attempt_date: row.last_attempt_date,
                analyzed_at,
            },
        )
        .await?;

        let weaker = match &weakest {
            Some((_, score)) => row.avg_score < *score,
            None => true,
        };
        if weaker {
            weakest = Some((row.topic_name.clone(), row.avg_score));
        }
    }

    let Some((topic_name, avg_score)) = weakest else {
        return Ok(predict_weakness(user_id));
    };

    Ok(WeaknessAnalysisResponse {
        topic_name,
        weakness_level: strength_label(scoring::performance_level(avg_score)).to_string(),
        accuracy_percentage: scoring::round2(avg_score),
    })
}

/// More attempts give more confidence, saturating at ten.
fn confidence_score(total_attempts: i64) -> f64 {
    (total_attempts as f64 / 10.0).min(1.0)
}

fn strength_label(level: StrengthLevel) -> &'static str {
    match level {
        StrengthLevel::Weak => "Weak",
        StrengthLevel::Moderate => "Moderate",
        StrengthLevel::Strong => "Strong",
    }
}

use std::collections::HashSet;

use sqlx::PgPool;
use time::{Date, Duration, OffsetDateTime};
use uuid::Uuid;

use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::repositories::quiz_results::TopicPerformance;
use crate::schemas::analytics::{DashboardResponse, RecentAccuracy, WeakTopic};

/// Topics below this average accuracy count as weak.
pub(crate) const GOAL_SCORE: f64 = 80.0;

const WEAK_TOPIC_LIMIT: usize = 4;
const RECENT_LIMIT: usize = 5;

pub(crate) async fn weak_topics(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<WeakTopic>, sqlx::Error> {
    let performance = repositories::quiz_results::topic_performance(pool, user_id).await?;
    Ok(select_weak_topics(performance))
}

pub(crate) async fn average_accuracy(pool: &PgPool, user_id: &str) -> Result<f64, sqlx::Error> {
    let avg = repositories::quiz_results::average_accuracy(pool, user_id).await?;
    Ok(avg.map(round1).unwrap_or(0.0))
}

pub(crate) async fn total_quizzes(pool: &PgPool, user_id: &str) -> Result<i64, sqlx::Error> {
    repositories::quiz_results::count_for_user(pool, user_id).await
}

pub(crate) async fn weekly_streak(pool: &PgPool, user_id: &str) -> Result<i64, sqlx::Error> {
    let results = repositories::quiz_results::list_for_user_desc(pool, user_id).await?;
    let days: HashSet<Date> = results.iter().map(|result| result.completed_at.date()).collect();
    Ok(count_active_days(&days, OffsetDateTime::now_utc().date()))
}

pub(crate) async fn recent_accuracy(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<RecentAccuracy>, sqlx::Error> {
    let results = repositories::quiz_results::list_for_user_desc(pool, user_id).await?;
    Ok(results
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|result| RecentAccuracy {
            name: format!("Quiz {}", result.id),
            accuracy: result.accuracy,
        })
        .collect())
}

pub(crate) async fn dashboard(
    pool: &PgPool,
    user_id: &str,
) -> Result<DashboardResponse, sqlx::Error> {
    Ok(DashboardResponse {
        total_quizzes: total_quizzes(pool, user_id).await?,
        average_score: average_accuracy(pool, user_id).await?,
        weekly_streak: weekly_streak(pool, user_id).await?,
        weak_topics: weak_topics(pool, user_id).await?,
        recent_accuracy: recent_accuracy(pool, user_id).await?,
    })
}

pub(crate) struct SaveResult<'a> {
    pub user_id: &'a str,
    pub topic: &'a str,
    pub score: i32,
    pub total_questions: i32,
}

/// Insert a flat result row; accuracy and the completion time are set here,
/// never taken from the client.
pub(crate) async fn save_result(pool: &PgPool, params: SaveResult<'_>) -> Result<(), sqlx::Error> {
    let accuracy = if params.total_questions > 0 {
        100.0 * f64::from(params.score) / f64::from(params.total_questions)
    } else {
        0.0
    };

    let mut conn = pool.acquire().await?;
    repositories::quiz_results::insert(
        &mut conn,
        repositories::quiz_results::CreateResult {
            id: &Uuid::new_v4().to_string(),
            user_id: params.user_id,
            quiz_id: None,
            topic: params.topic,
            score: params.score,
            total_questions: params.total_questions,
            accuracy,
            completed_at: primitive_now_utc(),
        },
    )
    .await?;
    Ok(())
}

/// Keep topics averaging below the goal, worst first, at most four.
fn select_weak_topics(performance: Vec<TopicPerformance>) -> Vec<WeakTopic> {
    let mut weak: Vec<WeakTopic> = performance
        .into_iter()
        .filter(|row| row.avg_accuracy < GOAL_SCORE)
        .map(|row| WeakTopic {
            topic: row.topic,
            current_score: row.avg_accuracy,
            goal_score: GOAL_SCORE,
            total_attempts: row.total_attempts,
        })
        .collect();

    weak.sort_by(|a, b| a.current_score.total_cmp(&b.current_score));
    weak.truncate(WEAK_TOPIC_LIMIT);
    weak
}

/// Number of distinct days with results inside the trailing 7-day window.
/// Deliberately not the consecutive-run streak.
fn count_active_days(days: &HashSet<Date>, today: Date) -> i64 {
    (0..7).filter(|offset| days.contains(&(today - Duration::days(*offset)))).count() as i64
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn perf(topic: &str, avg: f64, attempts: i64) -> TopicPerformance {
        TopicPerformance { topic: topic.to_string(), avg_accuracy: avg, total_attempts: attempts }
    }

    #[test]
    fn weak_topics_are_filtered_sorted_and_capped() {
        let rows = vec![perf("Arrays", 50.0, 2), perf("Trees", 90.0, 1), perf("Graphs", 50.0, 1)];
        let weak = select_weak_topics(rows);

        assert_eq!(weak.len(), 2);
        assert!(weak.iter().all(|topic| topic.current_score < GOAL_SCORE));
        assert!(weak.iter().all(|topic| topic.goal_score == GOAL_SCORE));
        assert_eq!(weak[0].current_score, 50.0);
        assert_eq!(weak[1].current_score, 50.0);
    }

    #[test]
    fn weak_topics_keep_at_most_four() {
        let rows = (0..6).map(|i| perf(&format!("T{i}"), 10.0 * i as f64, 1)).collect();
        let weak = select_weak_topics(rows);
        assert_eq!(weak.len(), 4);
        assert_eq!(weak[0].current_score, 0.0);
        assert_eq!(weak[3].current_score, 30.0);
    }

    #[test]
    fn streak_counts_active_days_in_window() {
        let today = date!(2026 - 08 - 05);
        let days: HashSet<Date> = [
            today,
            today, // duplicate day collapses
            today - Duration::days(2),
            today - Duration::days(6),
            today - Duration::days(8),
        ]
        .into_iter()
        .collect();

        assert_eq!(count_active_days(&days, today), 3);
    }

    #[test]
    fn streak_is_zero_without_results() {
        assert_eq!(count_active_days(&HashSet::new(), date!(2026 - 08 - 05)), 0);
    }

    #[test]
    fn round1_keeps_one_decimal() {
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(50.0), 50.0);
    }
}

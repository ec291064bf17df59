use axum::http::{Method, StatusCode};
use serde_json::json;
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;
use uuid::Uuid;

use crate::core::state::AppState;
use crate::core::time::to_primitive_utc;
use crate::db::types::UserRole;
use crate::repositories;
use crate::test_support;

async fn insert_result(
    state: &AppState,
    user_id: &str,
    topic: &str,
    score: i32,
    total: i32,
    completed_at: OffsetDateTime,
) {
    let mut conn = state.db().acquire().await.expect("conn");
    repositories::quiz_results::insert(
        &mut conn,
        repositories::quiz_results::CreateResult {
            id: &Uuid::new_v4().to_string(),
            user_id,
            quiz_id: None,
            topic,
            score,
            total_questions: total,
            accuracy: 100.0 * f64::from(score) / f64::from(total),
            completed_at: to_primitive_utc(completed_at),
        },
    )
    .await
    .expect("insert result");
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn weak_topics_aggregate_filter_and_sort() {
    let _guard = test_support::env_lock();
    let ctx = test_support::setup_test_context().await;

    let user = test_support::insert_user(
        ctx.state.db(),
        "analyst",
        "analyst@x.io",
        "analyst-pass",
        UserRole::Student,
    )
    .await;
    let token = test_support::bearer_token(&user, ctx.state.settings());

    let now = OffsetDateTime::now_utc();
    insert_result(&ctx.state, &user.id, "Arrays", 40, 100, now).await;
    insert_result(&ctx.state, &user.id, "Arrays", 60, 100, now).await;
    insert_result(&ctx.state, &user.id, "Trees", 90, 100, now).await;
    insert_result(&ctx.state, &user.id, "Graphs", 50, 100, now).await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/analytics/weak-topics/{}", user.id),
            Some(&token),
            None,
        ))
        .await
        .expect("weak topics");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");

    let topics = body.as_array().expect("array");
    assert_eq!(topics.len(), 2);
    for topic in topics {
        assert_eq!(topic["currentScore"], 50.0);
        assert_eq!(topic["goalScore"], 80.0);
    }
    let names: Vec<&str> = topics.iter().map(|t| t["topic"].as_str().unwrap()).collect();
    assert!(names.contains(&"Arrays"));
    assert!(names.contains(&"Graphs"));
    let arrays = topics.iter().find(|t| t["topic"] == "Arrays").unwrap();
    assert_eq!(arrays["totalAttempts"], 2);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn streak_counts_distinct_days_in_the_last_week() {
    let _guard = test_support::env_lock();
    let ctx = test_support::setup_test_context().await;

    let user = test_support::insert_user(
        ctx.state.db(),
        "streaker",
        "streaker@x.io",
        "streak-pass",
        UserRole::Student,
    )
    .await;
    let token = test_support::bearer_token(&user, ctx.state.settings());

    let now = OffsetDateTime::now_utc();
    for days_ago in [0, 0, 2, 6, 8] {
        insert_result(&ctx.state, &user.id, "Arrays", 50, 100, now - Duration::days(days_ago))
            .await;
    }

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/analytics/progress/{}", user.id),
            Some(&token),
            None,
        ))
        .await
        .expect("progress");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["weeklyStreak"], 3);
    assert_eq!(body["totalQuizzes"], 5);
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn save_quiz_result_sets_accuracy_server_side() {
    let _guard = test_support::env_lock();
    let ctx = test_support::setup_test_context().await;

    let user = test_support::insert_user(
        ctx.state.db(),
        "saver",
        "saver@x.io",
        "saver-pass",
        UserRole::Student,
    )
    .await;
    let token = test_support::bearer_token(&user, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/analytics/quiz-result",
            Some(&token),
            Some(json!({
                "userId": user.id,
                "topic": "Arrays",
                "score": 3,
                "totalQuestions": 4
            })),
        ))
        .await
        .expect("save result");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["status"], "success");

    let results =
        repositories::quiz_results::list_for_user_desc(ctx.state.db(), &user.id).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].accuracy, 75.0);

    // Unknown user fails the foreign key and comes back in the status envelope.
    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/analytics/quiz-result",
            Some(&token),
            Some(json!({
                "userId": "missing-user",
                "topic": "Arrays",
                "score": 3,
                "totalQuestions": 4
            })),
        ))
        .await
        .expect("save result");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

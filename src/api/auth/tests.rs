use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::db::types::UserRole;
use crate::test_support;

#[tokio::test]
async fn register_rejects_invalid_payload_before_touching_the_database() {
    let _guard = test_support::env_lock();
    test_support::set_test_env();

    let (_, app) = test_support::build_lazy_app();

    let response = app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": "alice",
                "fullName": "Alice",
                "email": "not-an-email",
                "password": "short"
            })),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = test_support::read_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn register_then_login_roundtrip() {
    let _guard = test_support::env_lock();
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": "alice",
                "fullName": "Alice",
                "email": "A@X.io",
                "password": "secret1"
            })),
        ))
        .await
        .expect("register");

    let status = response.status();
    let created = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {created}");
    assert!(created["userId"].is_string());
    assert_eq!(created["name"], "Alice");
    assert_eq!(created["email"], "a@x.io");

    // Duplicate registration reports the email clash.
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": "alice2",
                "fullName": "Alice Again",
                "email": "a@x.io",
                "password": "secret1"
            })),
        ))
        .await
        .expect("duplicate register");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "a@x.io", "password": "secret1"})),
        ))
        .await
        .expect("login");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["type"], "Bearer");
    let token = body["token"].as_str().expect("token").to_string();

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/api/auth/me", Some(&token), None))
        .await
        .expect("me");

    let status = response.status();
    let me = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {me}");
    assert_eq!(me["email"], "a@x.io");
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn login_failures_share_a_generic_message() {
    let _guard = test_support::env_lock();
    let ctx = test_support::setup_test_context().await;

    test_support::insert_user(ctx.state.db(), "bob", "bob@x.io", "right-pass", UserRole::Student)
        .await;

    for payload in [
        json!({"email": "bob@x.io", "password": "wrong-pass"}),
        json!({"email": "nobody@x.io", "password": "right-pass"}),
    ] {
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(payload),
            ))
            .await
            .expect("login");

        let status = response.status();
        let body = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid email or password");
    }
}

#[tokio::test]
#[ignore = "requires a local Postgres"]
async fn student_cannot_reach_admin_routes() {
    let _guard = test_support::env_lock();
    let ctx = test_support::setup_test_context().await;

    let student = test_support::insert_user(
        ctx.state.db(),
        "student1",
        "student1@x.io",
        "student-pass",
        UserRole::Student,
    )
    .await;
    let token = test_support::bearer_token(&student, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/admin/subjects",
            Some(&token),
            None,
        ))
        .await
        .expect("admin subjects");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A teacher passes the same gate.
    let teacher = test_support::insert_user(
        ctx.state.db(),
        "teacher1",
        "teacher1@x.io",
        "teacher-pass",
        UserRole::Teacher,
    )
    .await;
    let token = test_support::bearer_token(&teacher, ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/admin/subjects",
            Some(&token),
            None,
        ))
        .await
        .expect("admin subjects");

    assert_eq!(response.status(), StatusCode::OK);
}

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

#[tokio::test]
async fn unconfigured_api_key_yields_unavailable_reply() {
    let _guard = test_support::env_lock();
    test_support::set_test_env();

    let (_, app) = test_support::build_lazy_app();

    let response = app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/chatbot/message",
            None,
            Some(json!({"message": "explain photosynthesis"})),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert!(body["reply"].as_str().unwrap().contains("currently unavailable"));
}

#[tokio::test]
async fn placeholder_api_key_counts_as_unconfigured() {
    let _guard = test_support::env_lock();
    test_support::set_test_env();
    std::env::set_var("GROQ_API_KEY", "YOUR_GROQ_API_KEY_HERE");

    let (_, app) = test_support::build_lazy_app();

    let response = app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/chatbot/message",
            None,
            Some(json!({"message": "explain photosynthesis"})),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert!(body["reply"].as_str().unwrap().contains("currently unavailable"));
}

#[tokio::test]
async fn blacklisted_message_is_redirected_without_upstream_call() {
    let _guard = test_support::env_lock();
    test_support::set_test_env();
    std::env::set_var("GROQ_API_KEY", "gsk-test-key");

    let (_, app) = test_support::build_lazy_app();

    let response = app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/chatbot/message",
            None,
            Some(json!({"message": "recommend a movie"})),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    let reply = body["reply"].as_str().unwrap();
    assert!(reply.contains("educational AI tutor"));
    assert!(reply.contains("Math, Science, or Programming"));
}

#[tokio::test]
async fn empty_message_asks_for_a_question() {
    let _guard = test_support::env_lock();
    test_support::set_test_env();
    std::env::set_var("GROQ_API_KEY", "gsk-test-key");

    let (_, app) = test_support::build_lazy_app();

    let response = app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/chatbot/message",
            None,
            Some(json!({"message": "   "})),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["reply"], "Please ask me a question about your studies!");
}

#[tokio::test]
async fn missing_message_field_is_treated_as_empty() {
    let _guard = test_support::env_lock();
    test_support::set_test_env();
    std::env::set_var("GROQ_API_KEY", "gsk-test-key");

    let (_, app) = test_support::build_lazy_app();

    let response = app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/chatbot/message",
            None,
            Some(json!({})),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["reply"], "Please ask me a question about your studies!");
}

//! HTTP-level integration tests for student / teacher registration and login.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use serde_json::json;

fn student_registration(email: &str) -> serde_json::Value {
    json!({
        "role": "student",
        "email": email,
        "password": "secret123",
        "firstName": "Elif",
        "lastName": "Demir",
        "schoolName": "Ankara Fen Lisesi",
        "city": "Ankara",
    })
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn student_registration_returns_user_and_role() {
    let t = common::build_test_app();
    let response = post_json(
        t.app,
        "/api/auth/register",
        student_registration("elif@example.com"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "student");
    assert_eq!(json["data"]["user"]["schoolName"], "Ankara Fen Lisesi");
    assert_eq!(json["data"]["user"]["targetHours"], 40);
    assert!(
        json["data"]["user"].get("passwordHash").is_none(),
        "password hash must never be serialized"
    );
}

#[tokio::test]
async fn student_registration_requires_school() {
    let t = common::build_test_app();
    let mut body = student_registration("elif@example.com");
    body.as_object_mut().unwrap().remove("schoolName");

    let response = post_json(t.app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("schoolName"));
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let t = common::build_test_app();
    let first = post_json(
        t.app.clone(),
        "/api/auth/register",
        student_registration("elif@example.com"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(
        t.app,
        "/api/auth/register",
        student_registration("ELIF@example.com"),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn headoffice_role_cannot_register_here() {
    let t = common::build_test_app();
    let mut body = student_registration("merkez@example.com");
    body["role"] = json!("headoffice");

    let response = post_json(t.app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn teacher_can_register_and_log_in() {
    let t = common::build_test_app();
    let response = post_json(
        t.app.clone(),
        "/api/auth/register",
        json!({
            "role": "teacher",
            "email": "ayse@example.com",
            "password": "secret123",
            "firstName": "Ayşe",
            "lastName": "Yılmaz",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        t.app,
        "/api/auth/login",
        json!({ "role": "teacher", "email": "ayse@example.com", "password": "secret123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "teacher");
    assert_eq!(json["data"]["user"]["email"], "ayse@example.com");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let t = common::build_test_app();
    post_json(
        t.app.clone(),
        "/api/auth/register",
        student_registration("elif@example.com"),
    )
    .await;

    let wrong_password = post_json(
        t.app.clone(),
        "/api/auth/login",
        json!({ "role": "student", "email": "elif@example.com", "password": "nope-nope" }),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = body_json(wrong_password).await;

    let unknown = post_json(
        t.app,
        "/api/auth/login",
        json!({ "role": "student", "email": "ghost@example.com", "password": "secret123" }),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong_password["error"], unknown["error"]);
}

#[tokio::test]
async fn login_without_role_is_rejected() {
    let t = common::build_test_app();
    let response = post_json(
        t.app,
        "/api/auth/login",
        json!({ "email": "elif@example.com", "password": "secret123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn registration_enforces_password_length() {
    let t = common::build_test_app();
    let mut body = student_registration("elif@example.com");
    body["password"] = json!("abc");

    let response = post_json(t.app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("Password"));
}

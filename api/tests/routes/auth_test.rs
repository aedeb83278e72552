use axum::http::StatusCode;
use serde_json::{Value, json};
use serial_test::serial;

use crate::helpers::{TestApp, make_test_app};
use crate::helpers::app::PASSWORD;

fn student_body(email: &str, rfid: &str, courses: &[&str]) -> Value {
    json!({
        "email": email,
        "password": PASSWORD,
        "password2": PASSWORD,
        "student_name": "Ada Lovelace",
        "roll_number": "R-17",
        "rfid": rfid,
        "year": 2,
        "dept": "CSE",
        "section": "A",
        "courses": courses,
    })
}

async fn login(app: &TestApp, kind: &str, email: &str, password: &str) -> (StatusCode, Value) {
    app.send(
        "POST",
        &format!("/api/auth/login/{kind}"),
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

#[tokio::test]
#[serial]
async fn register_student_returns_created_profile() {
    let app = make_test_app().await;

    let (status, json) = app
        .send(
            "POST",
            "/api/auth/register/student",
            None,
            Some(student_body("ada@example.com", "RF-ADA", &[])),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Student registered successfully");
    assert_eq!(json["data"]["email"], "ada@example.com");
    assert_eq!(json["data"]["name"], "Ada Lovelace");
    assert!(json["data"]["id"].as_i64().is_some());
}

#[tokio::test]
#[serial]
async fn register_student_duplicate_email_conflicts() {
    let app = make_test_app().await;
    let body = student_body("ada@example.com", "RF-ADA", &[]);

    let (first, _) = app
        .send("POST", "/api/auth/register/student", None, Some(body))
        .await;
    let (second, json) = app
        .send(
            "POST",
            "/api/auth/register/student",
            None,
            Some(student_body("ada@example.com", "RF-OTHER", &[])),
        )
        .await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "A user with this email already exists");
}

#[tokio::test]
#[serial]
async fn register_student_password_mismatch_is_bad_request() {
    let app = make_test_app().await;
    let mut body = student_body("ada@example.com", "RF-ADA", &[]);
    body["password2"] = json!("Different1OK");

    let (status, json) = app
        .send("POST", "/api/auth/register/student", None, Some(body))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
#[serial]
async fn register_student_lists_unknown_course_codes() {
    let app = make_test_app().await;

    let (status, json) = app
        .send(
            "POST",
            "/api/auth/register/student",
            None,
            Some(student_body("ada@example.com", "RF-ADA", &["XX1", "YY2"])),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Unknown course codes: XX1, YY2");
}

#[tokio::test]
#[serial]
async fn login_issues_access_and_refresh_tokens() {
    let app = make_test_app().await;
    let teacher = app.teacher("grace", "T-RF-1").await;

    let (status, json) = login(&app, "teacher", &teacher.profile.email, PASSWORD).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Login successful");
    assert_eq!(json["data"]["user_type"], "teacher");
    assert_eq!(json["data"]["id"], teacher.profile.profile_id);
    assert!(!json["data"]["access"].as_str().unwrap().is_empty());
    assert!(!json["data"]["refresh"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn login_with_wrong_password_is_unauthorized() {
    let app = make_test_app().await;
    let teacher = app.teacher("grace", "T-RF-1").await;

    let (status, json) = login(&app, "teacher", &teacher.profile.email, "WrongPass99").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid email or password");
}

#[tokio::test]
#[serial]
async fn login_as_other_kind_is_not_found() {
    let app = make_test_app().await;
    let teacher = app.teacher("grace", "T-RF-1").await;

    let (as_student, _) = login(&app, "student", &teacher.profile.email, PASSWORD).await;
    let (unknown, json) = login(&app, "janitor", &teacher.profile.email, PASSWORD).await;

    assert_eq!(as_student, StatusCode::NOT_FOUND);
    assert_eq!(unknown, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Unknown login kind 'janitor'");
}

#[tokio::test]
#[serial]
async fn refresh_token_buys_a_new_access_token() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let (_, json) = login(&app, "management", &boss.profile.email, PASSWORD).await;
    let refresh = json["data"]["refresh"].as_str().unwrap().to_owned();
    let access = json["data"]["access"].as_str().unwrap().to_owned();

    let (status, refreshed) = app
        .send(
            "POST",
            "/api/auth/refresh",
            None,
            Some(json!({ "refresh": refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refreshed["message"], "Token refreshed");
    let new_access = refreshed["data"]["access"].as_str().unwrap().to_owned();

    let (me_status, me) = app
        .send("GET", "/api/auth/me", Some(&new_access), None)
        .await;
    assert_eq!(me_status, StatusCode::OK);
    assert_eq!(me["data"]["role"], "management");
    assert_eq!(me["data"]["name"], "boss");

    let (rejected, _) = app
        .send(
            "POST",
            "/api/auth/refresh",
            None,
            Some(json!({ "refresh": access })),
        )
        .await;
    assert_eq!(rejected, StatusCode::UNAUTHORIZED);

    let (me_with_refresh, _) = app
        .send("GET", "/api/auth/me", Some(&refresh), None)
        .await;
    assert_eq!(me_with_refresh, StatusCode::UNAUTHORIZED);
}

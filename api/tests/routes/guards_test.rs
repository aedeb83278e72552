use axum::http::StatusCode;
use serial_test::serial;

use crate::helpers::make_test_app;

#[tokio::test]
#[serial]
async fn missing_token_is_unauthorized() {
    let app = make_test_app().await;

    let (status, json) = app
        .send("GET", "/api/attendance/sessions", None, None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Authentication required");
}

#[tokio::test]
#[serial]
async fn garbage_token_is_unauthorized() {
    let app = make_test_app().await;

    let (status, _) = app
        .send("GET", "/api/courses", Some("not-a-jwt"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn student_cannot_list_sessions() {
    let app = make_test_app().await;
    let student = app.student("ana", "RF-1", "A", 2, &[]).await;

    let (status, json) = app
        .send("GET", "/api/attendance/sessions", Some(&student.token), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Staff access required");
}

#[tokio::test]
#[serial]
async fn teacher_cannot_open_me_routes() {
    let app = make_test_app().await;
    let teacher = app.teacher("tom", "T-RF-1").await;

    let (status, json) = app
        .send("GET", "/api/me/attendance", Some(&teacher.token), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Student access required");
}

#[tokio::test]
#[serial]
async fn management_cannot_open_sessions() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;

    let (status, _) = app
        .send(
            "POST",
            "/api/attendance/sessions",
            Some(&boss.token),
            Some(serde_json::json!({ "course_id": 1, "section": "A", "year": 2 })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

use axum::http::StatusCode;
use serde_json::{Value, json};
use serial_test::serial;

use crate::helpers::app::Actor;
use crate::helpers::{TestApp, make_test_app};

struct Setup {
    app: TestApp,
    teacher: Actor,
    student: Actor,
    boss: Actor,
    course_id: i64,
}

async fn setup() -> Setup {
    let app = make_test_app().await;
    let teacher = app.teacher("grace", "T-RF-1").await;
    let (course, _) = app.assign("CS101", &teacher, "A", 2).await;
    let student = app.student("ada", "RF-ADA", "A", 2, &["CS101"]).await;
    let boss = app.manager("boss").await;
    Setup {
        app,
        teacher,
        student,
        boss,
        course_id: course.course_id,
    }
}

async fn file_request(s: &Setup, student_id: i64) -> (StatusCode, Value) {
    s.app
        .send(
            "POST",
            "/api/attendance/requests",
            Some(&s.teacher.token),
            Some(json!({
                "student_id": student_id,
                "course_id": s.course_id,
                "classes_to_add": "2025-09-01, 2025-09-03",
                "reason": "Badge reader was offline",
            })),
        )
        .await
}

#[tokio::test]
#[serial]
async fn approved_request_credits_ledger_once() {
    let s = setup().await;

    let (status, created) = file_request(&s, s.student.profile.profile_id).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["status"], "pending");
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, pending) = s
        .app
        .send(
            "GET",
            "/api/attendance/requests?status=pending",
            Some(&s.teacher.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending["data"].as_array().unwrap().len(), 1);

    let approve = format!("/api/attendance/requests/{id}/approve");
    let (status, approved) = s.app.send("POST", &approve, Some(&s.boss.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["data"]["status"], "approved");
    assert_eq!(approved["data"]["processed_by"], s.boss.profile.profile_id);

    let (again, _) = s.app.send("POST", &approve, Some(&s.boss.token), None).await;
    assert_eq!(again, StatusCode::BAD_REQUEST);

    let (_, mine) = s
        .app
        .send("GET", "/api/me/attendance", Some(&s.student.token), None)
        .await;
    let course = &mine["data"]["courses"][0];
    assert_eq!(course["attended"], 2);
    assert_eq!(
        course["classes_attended"],
        json!(["2025-09-01", "2025-09-03"])
    );
}

#[tokio::test]
#[serial]
async fn rejected_request_cannot_be_approved() {
    let s = setup().await;
    let (_, created) = file_request(&s, s.student.profile.profile_id).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, rejected) = s
        .app
        .send(
            "POST",
            &format!("/api/attendance/requests/{id}/reject"),
            Some(&s.boss.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["data"]["status"], "rejected");

    let (approve, _) = s
        .app
        .send(
            "POST",
            &format!("/api/attendance/requests/{id}/approve"),
            Some(&s.boss.token),
            None,
        )
        .await;
    assert_eq!(approve, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn request_for_unenrolled_student_is_not_found() {
    let s = setup().await;
    let stranger = s.app.student("eve", "RF-EVE", "B", 2, &[]).await;

    let (status, json) = file_request(&s, stranger.profile.profile_id).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["message"],
        "Student is not enrolled in this course with this teacher"
    );
}

#[tokio::test]
#[serial]
async fn teacher_cannot_approve_requests() {
    let s = setup().await;
    let (_, created) = file_request(&s, s.student.profile.profile_id).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, _) = s
        .app
        .send(
            "POST",
            &format!("/api/attendance/requests/{id}/approve"),
            Some(&s.teacher.token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

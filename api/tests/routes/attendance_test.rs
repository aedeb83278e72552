use axum::http::StatusCode;
use serde_json::{Value, json};
use serial_test::serial;

use crate::helpers::app::Actor;
use crate::helpers::{TestApp, make_test_app};

/// Teacher of CS101 for section A, year 2, with one enrolled student.
struct Classroom {
    app: TestApp,
    teacher: Actor,
    student: Actor,
    course_id: i64,
}

async fn classroom() -> Classroom {
    let app = make_test_app().await;
    let teacher = app.teacher("grace", "T-RF-1").await;
    let (course, _) = app.assign("CS101", &teacher, "A", 2).await;
    let student = app.student("ada", "RF-ADA", "A", 2, &["CS101"]).await;
    Classroom {
        app,
        teacher,
        student,
        course_id: course.course_id,
    }
}

async fn open_session(c: &Classroom) -> i64 {
    let (status, json) = c
        .app
        .send(
            "POST",
            "/api/attendance/sessions",
            Some(&c.teacher.token),
            Some(json!({ "course_id": c.course_id, "section": "A", "year": 2 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    json["data"]["id"].as_i64().unwrap()
}

async fn qr_token(c: &Classroom, session_id: i64) -> String {
    let (status, json) = c
        .app
        .send(
            "GET",
            &format!("/api/attendance/sessions/{session_id}/qr"),
            Some(&c.teacher.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    json["data"]["qr_token"].as_str().unwrap().to_owned()
}

async fn badge(app: &TestApp, session_id: i64, rfid: &str) -> (StatusCode, Value) {
    app.send(
        "POST",
        "/api/attendance/scan/rfid",
        None,
        Some(json!({ "rfid": rfid, "session_id": session_id })),
    )
    .await
}

async fn code(app: &TestApp, student: &Actor, token: &str) -> (StatusCode, Value) {
    app.send(
        "POST",
        "/api/attendance/scan/qr",
        Some(&student.token),
        Some(json!({ "qr_token": token, "student_id": student.profile.profile_id })),
    )
    .await
}

#[tokio::test]
#[serial]
async fn both_factors_mark_student_present() {
    let c = classroom().await;
    let session_id = open_session(&c).await;
    let token = qr_token(&c, session_id).await;

    let (status, first) = badge(&c.app, session_id, "RF-ADA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["message"], "RFID scan recorded, waiting for QR scan");
    assert_eq!(first["data"]["rfid_scanned"], true);
    assert_eq!(first["data"]["is_present"], false);
    assert_eq!(first["data"]["outstanding"], "code");

    let (status, second) = code(&c.app, &c.student, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["message"], "Attendance marked present");
    assert_eq!(second["data"]["newly_present"], true);
    assert_eq!(second["data"]["is_present"], true);
    assert!(second["data"]["outstanding"].is_null());

    let (status, again) = badge(&c.app, session_id, "RF-ADA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["message"], "Attendance already marked present");
    assert_eq!(again["data"]["newly_present"], false);

    let (_, stats) = c
        .app
        .send(
            "GET",
            &format!("/api/attendance/sessions/{session_id}/statistics"),
            Some(&c.teacher.token),
            None,
        )
        .await;
    assert_eq!(stats["data"]["total"], 1);
    assert_eq!(stats["data"]["present"], 1);
    assert_eq!(stats["data"]["absent"], 0);

    let (_, records) = c
        .app
        .send(
            "GET",
            &format!("/api/attendance/sessions/{session_id}/records"),
            Some(&c.teacher.token),
            None,
        )
        .await;
    assert_eq!(records["data"].as_array().unwrap().len(), 1);
    assert_eq!(records["data"][0]["student_name"], "ada");

    let (status, mine) = c
        .app
        .send("GET", "/api/me/attendance", Some(&c.student.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["data"]["courses"][0]["attended"], 1);
    assert_eq!(mine["data"]["courses"][0]["classes_taken"], 1);
    assert_eq!(mine["data"]["courses"][0]["percentage"], 100.0);
    assert_eq!(mine["data"]["overall_attendance"], 100.0);
}

#[tokio::test]
#[serial]
async fn code_first_waits_for_badge() {
    let c = classroom().await;
    let session_id = open_session(&c).await;
    let token = qr_token(&c, session_id).await;

    let (status, json) = code(&c.app, &c.student, &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "QR scan recorded, waiting for RFID scan");
    assert_eq!(json["data"]["outstanding"], "badge");
}

#[tokio::test]
#[serial]
async fn code_scan_for_another_student_is_forbidden() {
    let c = classroom().await;
    let other = c.app.student("bob", "RF-BOB", "A", 2, &["CS101"]).await;
    let session_id = open_session(&c).await;
    let token = qr_token(&c, session_id).await;

    let (status, json) = c
        .app
        .send(
            "POST",
            "/api/attendance/scan/qr",
            Some(&c.student.token),
            Some(json!({ "qr_token": token, "student_id": other.profile.profile_id })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "You can only mark your own attendance");
}

#[tokio::test]
#[serial]
async fn stopped_session_rejects_scans_and_second_stop() {
    let c = classroom().await;
    let session_id = open_session(&c).await;
    let token = qr_token(&c, session_id).await;
    let stop = format!("/api/attendance/sessions/{session_id}/stop");

    let (status, json) = c.app.send("POST", &stop, Some(&c.teacher.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "stopped");
    assert!(json["data"]["stopped_at"].is_string());

    let (again, _) = c.app.send("POST", &stop, Some(&c.teacher.token), None).await;
    assert_eq!(again, StatusCode::BAD_REQUEST);

    let (badge_status, _) = badge(&c.app, session_id, "RF-ADA").await;
    assert_eq!(badge_status, StatusCode::BAD_REQUEST);

    let (code_status, _) = code(&c.app, &c.student, &token).await;
    assert_eq!(code_status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn scan_from_wrong_cohort_is_forbidden() {
    let c = classroom().await;
    c.app.student("eve", "RF-EVE", "B", 2, &[]).await;
    let session_id = open_session(&c).await;

    let (status, json) = badge(&c.app, session_id, "RF-EVE").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["success"], false);
}

#[tokio::test]
#[serial]
async fn unknown_badge_or_session_is_not_found() {
    let c = classroom().await;
    let session_id = open_session(&c).await;

    let (unknown_badge, _) = badge(&c.app, session_id, "RF-NOBODY").await;
    let (unknown_session, _) = badge(&c.app, session_id + 100, "RF-ADA").await;

    assert_eq!(unknown_badge, StatusCode::NOT_FOUND);
    assert_eq!(unknown_session, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn only_owner_or_management_control_a_session() {
    let c = classroom().await;
    let outsider = c.app.teacher("linus", "T-RF-2").await;
    let boss = c.app.manager("boss").await;
    let session_id = open_session(&c).await;

    let (qr_status, json) = c
        .app
        .send(
            "GET",
            &format!("/api/attendance/sessions/{session_id}/qr"),
            Some(&outsider.token),
            None,
        )
        .await;
    assert_eq!(qr_status, StatusCode::FORBIDDEN);
    assert_eq!(
        json["message"],
        "Only the teacher who opened this session can display its QR code"
    );

    let stop = format!("/api/attendance/sessions/{session_id}/stop");
    let (outsider_stop, _) = c.app.send("POST", &stop, Some(&outsider.token), None).await;
    assert_eq!(outsider_stop, StatusCode::FORBIDDEN);

    let (boss_stop, _) = c.app.send("POST", &stop, Some(&boss.token), None).await;
    assert_eq!(boss_stop, StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn teacher_lists_own_sessions_newest_first() {
    let c = classroom().await;
    let first = open_session(&c).await;
    let second = open_session(&c).await;

    let (status, json) = c
        .app
        .send(
            "GET",
            "/api/attendance/sessions?status=active",
            Some(&c.teacher.token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(json["data"]["sessions"][0]["id"], second);
    assert_eq!(json["data"]["sessions"][1]["id"], first);

    let (bad, _) = c
        .app
        .send(
            "GET",
            "/api/attendance/sessions?status=paused",
            Some(&c.teacher.token),
            None,
        )
        .await;
    assert_eq!(bad, StatusCode::BAD_REQUEST);
}

use axum::http::StatusCode;
use serde_json::{Value, json};
use serial_test::serial;

use crate::helpers::{Actor, TestApp, make_test_app};

async fn enrollment_of(app: &TestApp, boss: &Actor, student_id: i64) -> Value {
    let (status, json) = app
        .send(
            "GET",
            &format!("/api/student-courses?student_id={student_id}"),
            Some(&boss.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total"], 1);
    json["data"]["items"][0].clone()
}

async fn overall_of(app: &TestApp, boss: &Actor, student_id: i64) -> f64 {
    let (status, json) = app
        .send(
            "GET",
            &format!("/api/students/{student_id}"),
            Some(&boss.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    json["data"]["overall_attendance"].as_f64().unwrap()
}

#[tokio::test]
#[serial]
async fn editing_an_enrollment_normalises_log_and_recomputes_overall() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let teacher = app.teacher("grace", "T-RF-1").await;
    let (_, taught) = app.assign("CS101", &teacher, "A", 2).await;
    let ada = app.student("ada", "RF-ADA", "A", 2, &["CS101"]).await;
    let ada_id = ada.profile.profile_id;

    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/taught-courses/{}", taught.id),
            Some(&boss.token),
            Some(json!({ "classes_taken": 4 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let entry = enrollment_of(&app, &boss, ada_id).await;
    let (status, json) = app
        .send(
            "PUT",
            &format!("/api/student-courses/{}", entry["id"]),
            Some(&boss.token),
            Some(json!({ "classes_attended": " 2025-04-01 ,,2025-04-02, " })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Enrollment updated successfully");
    assert_eq!(json["data"]["classes_attended"], "2025-04-01, 2025-04-02");
    assert_eq!(json["data"]["attended_count"], 2);
    assert_eq!(json["data"]["course_name"], "Course CS101");
    assert!((overall_of(&app, &boss, ada_id).await - 50.0).abs() < f64::EPSILON);
}

#[tokio::test]
#[serial]
async fn enrollment_edit_with_unknown_teacher_leaves_log_untouched() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let teacher = app.teacher("grace", "T-RF-1").await;
    app.assign("CS101", &teacher, "A", 2).await;
    let ada = app.student("ada", "RF-ADA", "A", 2, &["CS101"]).await;
    let entry = enrollment_of(&app, &boss, ada.profile.profile_id).await;

    let (status, json) = app
        .send(
            "PUT",
            &format!("/api/student-courses/{}", entry["id"]),
            Some(&boss.token),
            Some(json!({ "teacher_id": 9999, "classes_attended": "2025-04-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let after = enrollment_of(&app, &boss, ada.profile.profile_id).await;
    assert_eq!(after["classes_attended"], "");
    assert_eq!(after["teacher_id"], teacher.profile.profile_id);
}

#[tokio::test]
#[serial]
async fn enrollment_edit_requires_a_field_and_management() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let teacher = app.teacher("grace", "T-RF-1").await;
    app.assign("CS101", &teacher, "A", 2).await;
    let ada = app.student("ada", "RF-ADA", "A", 2, &["CS101"]).await;
    let entry = enrollment_of(&app, &boss, ada.profile.profile_id).await;
    let uri = format!("/api/student-courses/{}", entry["id"]);

    let (status, json) = app.send("PUT", &uri, Some(&boss.token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "At least one field must be provided");

    let (status, _) = app
        .send(
            "PUT",
            &uri,
            Some(&teacher.token),
            Some(json!({ "classes_attended": "2025-04-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = app
        .send(
            "PUT",
            "/api/student-courses/9999",
            Some(&boss.token),
            Some(json!({ "classes_attended": "2025-04-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Enrollment not found");
}

#[tokio::test]
#[serial]
async fn deleting_an_enrollment_recomputes_overall() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let teacher = app.teacher("grace", "T-RF-1").await;
    let (_, taught) = app.assign("CS101", &teacher, "A", 2).await;
    let ada = app.student("ada", "RF-ADA", "A", 2, &["CS101"]).await;
    let ada_id = ada.profile.profile_id;

    app.send(
        "PUT",
        &format!("/api/taught-courses/{}", taught.id),
        Some(&boss.token),
        Some(json!({ "classes_taken": 1 })),
    )
    .await;
    let entry = enrollment_of(&app, &boss, ada_id).await;
    let uri = format!("/api/student-courses/{}", entry["id"]);
    app.send(
        "PUT",
        &uri,
        Some(&boss.token),
        Some(json!({ "classes_attended": "2025-04-01" })),
    )
    .await;
    assert!((overall_of(&app, &boss, ada_id).await - 100.0).abs() < f64::EPSILON);

    let (status, json) = app.send("DELETE", &uri, Some(&boss.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Enrollment deleted successfully");
    assert_eq!(overall_of(&app, &boss, ada_id).await, 0.0);

    let (status, _) = app.send("DELETE", &uri, Some(&boss.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn enrolling_a_single_student_reports_outcome() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let teacher = app.teacher("grace", "T-RF-1").await;
    let (course, _) = app.assign("CS101", &teacher, "A", 2).await;
    let ada = app.student("ada", "RF-ADA", "A", 2, &[]).await;
    let eve = app.student("eve", "RF-EVE", "B", 2, &[]).await;
    let body = json!({ "course_id": course.course_id });
    let ada_uri = format!("/api/students/{}/enroll", ada.profile.profile_id);

    let (status, json) = app
        .send("POST", &ada_uri, Some(&boss.token), Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Student enrolled");
    assert_eq!(json["data"]["enrolled_count"], 1);

    let (_, json) = app
        .send("POST", &ada_uri, Some(&boss.token), Some(body.clone()))
        .await;
    assert_eq!(json["message"], "Student is already enrolled");
    assert_eq!(json["data"]["already_enrolled_count"], 1);

    let (_, json) = app
        .send(
            "POST",
            &format!("/api/students/{}/enroll", eve.profile.profile_id),
            Some(&boss.token),
            Some(body.clone()),
        )
        .await;
    assert_eq!(
        json["message"],
        "No teacher is assigned to this course for the student's section"
    );
    assert_eq!(json["data"]["skipped_count"], 1);

    let (status, _) = app
        .send("POST", &ada_uri, Some(&teacher.token), Some(body))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn bulk_update_moves_students_between_cohorts() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let ada = app.student("ada", "RF-ADA", "A", 2, &[]).await;
    let bob = app.student("bob", "RF-BOB", "A", 2, &[]).await;
    let eve = app.student("eve", "RF-EVE", "A", 2, &[]).await;

    let (status, json) = app
        .send(
            "PUT",
            "/api/students/bulk-update",
            Some(&boss.token),
            Some(json!({
                "student_ids": [ada.profile.profile_id, bob.profile.profile_id],
                "year": 3,
                "section": " B ",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Updated 2 students");
    assert_eq!(json["data"]["updated"], 2);

    let (_, moved) = app
        .send(
            "GET",
            &format!("/api/students/{}", ada.profile.profile_id),
            Some(&boss.token),
            None,
        )
        .await;
    assert_eq!(moved["data"]["year"], 3);
    assert_eq!(moved["data"]["section"], "B");

    let (_, untouched) = app
        .send(
            "GET",
            &format!("/api/students/{}", eve.profile.profile_id),
            Some(&boss.token),
            None,
        )
        .await;
    assert_eq!(untouched["data"]["year"], 2);
    assert_eq!(untouched["data"]["section"], "A");
}

#[tokio::test]
#[serial]
async fn bulk_update_without_changes_is_rejected() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let ada = app.student("ada", "RF-ADA", "A", 2, &[]).await;

    let (status, json) = app
        .send(
            "PUT",
            "/api/students/bulk-update",
            Some(&boss.token),
            Some(json!({ "student_ids": [ada.profile.profile_id], "section": "  " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let (status, _) = app
        .send(
            "PUT",
            "/api/students/bulk-update",
            Some(&boss.token),
            Some(json!({ "student_ids": [], "year": 3 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

use crate::helpers::make_test_app;

#[tokio::test]
#[serial]
async fn management_creates_courses_and_codes_are_unique() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let body = json!({ "course_name": "Data Structures", "course_code": "CS201" });

    let (status, created) = app
        .send("POST", "/api/courses", Some(&boss.token), Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Course created successfully");
    assert_eq!(created["data"]["course_code"], "CS201");

    let (dup, json) = app
        .send("POST", "/api/courses", Some(&boss.token), Some(body))
        .await;
    assert_eq!(dup, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);
}

#[tokio::test]
#[serial]
async fn teacher_cannot_create_courses() {
    let app = make_test_app().await;
    let teacher = app.teacher("grace", "T-RF-1").await;

    let (status, _) = app
        .send(
            "POST",
            "/api/courses",
            Some(&teacher.token),
            Some(json!({ "course_name": "Algebra", "course_code": "MA101" })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn students_may_browse_courses_but_not_students() {
    let app = make_test_app().await;
    let teacher = app.teacher("grace", "T-RF-1").await;
    app.assign("CS101", &teacher, "A", 2).await;
    app.assign("CS102", &teacher, "A", 2).await;
    let student = app.student("ada", "RF-ADA", "A", 2, &[]).await;

    let (status, courses) = app
        .send("GET", "/api/courses?q=CS10&per_page=1", Some(&student.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(courses["data"]["total"], 2);
    assert_eq!(courses["data"]["per_page"], 1);
    assert_eq!(courses["data"]["items"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .send("GET", "/api/students", Some(&student.token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn oversized_page_is_rejected() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;

    let (status, json) = app
        .send("GET", "/api/students?per_page=500", Some(&boss.token), None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
#[serial]
async fn bulk_enroll_reports_each_student() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let teacher = app.teacher("grace", "T-RF-1").await;
    let (course, _) = app.assign("CS101", &teacher, "A", 2).await;
    let enrolled = app.student("ada", "RF-ADA", "A", 2, &["CS101"]).await;
    let fresh = app.student("bob", "RF-BOB", "A", 2, &[]).await;
    let uncovered = app.student("eve", "RF-EVE", "B", 2, &[]).await;

    let (status, json) = app
        .send(
            "POST",
            "/api/students/bulk-enroll",
            Some(&boss.token),
            Some(json!({
                "course_id": course.course_id,
                "student_ids": [
                    enrolled.profile.profile_id,
                    fresh.profile.profile_id,
                    uncovered.profile.profile_id,
                    9999
                ],
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Enrolled 1 students");
    assert_eq!(json["data"]["enrolled"], json!([fresh.profile.profile_id]));
    assert_eq!(
        json["data"]["already_enrolled"],
        json!([enrolled.profile.profile_id])
    );
    assert_eq!(json["data"]["skipped_count"], 2);
}

#[tokio::test]
#[serial]
async fn missing_student_is_not_found() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;

    let (status, json) = app
        .send("GET", "/api/students/4242", Some(&boss.token), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Student not found");
}

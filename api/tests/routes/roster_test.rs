use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

use crate::helpers::app::PASSWORD;
use crate::helpers::make_test_app;

#[tokio::test]
#[serial]
async fn register_teacher_then_login() {
    let app = make_test_app().await;

    let (status, json) = app
        .send(
            "POST",
            "/api/auth/register/teacher",
            None,
            Some(json!({
                "email": "grace@staff.example.com",
                "password": PASSWORD,
                "password2": PASSWORD,
                "teacher_name": "Grace Hopper",
                "teacher_code": "GH",
                "rfid": "T-RF-9",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Teacher registered successfully");
    assert_eq!(json["data"]["name"], "Grace Hopper");

    let (status, login) = app
        .send(
            "POST",
            "/api/auth/login/teacher",
            None,
            Some(json!({ "email": "grace@staff.example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["data"]["id"], json["data"]["id"]);
}

#[tokio::test]
#[serial]
async fn register_management_rejects_duplicates_and_weak_passwords() {
    let app = make_test_app().await;
    let body = json!({
        "email": "boss@office.example.com",
        "password": PASSWORD,
        "password2": PASSWORD,
        "management_name": "The Boss",
    });

    let (status, json) = app
        .send("POST", "/api/auth/register/management", None, Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Management registered successfully");

    let (status, login) = app
        .send(
            "POST",
            "/api/auth/login/management",
            None,
            Some(json!({ "email": "boss@office.example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["data"]["user_type"], "management");

    let (status, _) = app
        .send("POST", "/api/auth/register/management", None, Some(body))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(
            "POST",
            "/api/auth/register/management",
            None,
            Some(json!({
                "email": "other@office.example.com",
                "password": "short",
                "password2": "short",
                "management_name": "Other",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn management_maintains_teachers() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let grace = app.teacher("grace", "T-RF-1").await;

    let (status, created) = app
        .send(
            "POST",
            "/api/teachers",
            Some(&boss.token),
            Some(json!({
                "teacher_name": "Alan Turing",
                "email": "alan@staff.example.com",
                "rfid": "T-RF-2",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Teacher created successfully");
    assert!(created["data"]["user_id"].is_null());
    let uri = format!("/api/teachers/{}", created["data"]["teacher_id"]);

    let (status, _) = app
        .send(
            "POST",
            "/api/teachers",
            Some(&boss.token),
            Some(json!({
                "teacher_name": "Copycat",
                "email": "copy@staff.example.com",
                "rfid": "T-RF-2",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, list) = app
        .send("GET", "/api/teachers", Some(&grace.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"]["total"], 2);

    let (status, updated) = app
        .send(
            "PUT",
            &uri,
            Some(&boss.token),
            Some(json!({ "teacher_code": "AT" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["teacher_code"], "AT");
    assert_eq!(updated["data"]["teacher_name"], "Alan Turing");

    let (status, _) = app
        .send("DELETE", &uri, Some(&grace.token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send("DELETE", &uri, Some(&boss.token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, json) = app.send("GET", &uri, Some(&boss.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Teacher not found");
}

#[tokio::test]
#[serial]
async fn teacher_update_without_fields_is_rejected() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let grace = app.teacher("grace", "T-RF-1").await;

    let (status, json) = app
        .send(
            "PUT",
            &format!("/api/teachers/{}", grace.profile.profile_id),
            Some(&boss.token),
            Some(json!({})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "At least one field must be provided");
}

#[tokio::test]
#[serial]
async fn management_maintains_classrooms() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let grace = app.teacher("grace", "T-RF-1").await;
    let ada = app.student("ada", "RF-ADA", "A", 2, &[]).await;

    let (status, created) = app
        .send(
            "POST",
            "/api/classes",
            Some(&boss.token),
            Some(json!({ "scanner_id": "SC-101" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Classroom created successfully");
    let uri = format!("/api/classes/{}", created["data"]["classroom_id"]);

    let (status, _) = app
        .send(
            "POST",
            "/api/classes",
            Some(&boss.token),
            Some(json!({ "scanner_id": "SC-101" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(
            "POST",
            "/api/classes",
            Some(&grace.token),
            Some(json!({ "scanner_id": "SC-102" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send("GET", "/api/classes", Some(&ada.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, fetched) = app.send("GET", &uri, Some(&grace.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["scanner_id"], "SC-101");

    let (status, updated) = app
        .send(
            "PUT",
            &uri,
            Some(&boss.token),
            Some(json!({ "scanner_id": "SC-201" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["scanner_id"], "SC-201");

    let (status, _) = app
        .send("PUT", &uri, Some(&boss.token), Some(json!({ "scanner_id": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = app.send("DELETE", &uri, Some(&boss.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Classroom deleted successfully");
    let (status, _) = app.send("GET", &uri, Some(&boss.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn management_assigns_teachers_to_cohorts() {
    let app = make_test_app().await;
    let boss = app.manager("boss").await;
    let grace = app.teacher("grace", "T-RF-1").await;
    let grace_id = grace.profile.profile_id;

    let (_, course) = app
        .send(
            "POST",
            "/api/courses",
            Some(&boss.token),
            Some(json!({ "course_name": "Compilers", "course_code": "CS301" })),
        )
        .await;
    let course_id = course["data"]["course_id"].clone();

    let (status, created) = app
        .send(
            "POST",
            "/api/taught-courses",
            Some(&boss.token),
            Some(json!({
                "course_id": course_id,
                "teacher_id": grace_id,
                "section": " A ",
                "year": 3,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["course_name"], "Compilers");
    assert_eq!(created["data"]["teacher_name"], "grace");
    assert_eq!(created["data"]["section"], "A");
    assert_eq!(created["data"]["classes_taken"], 0);
    let uri = format!("/api/taught-courses/{}", created["data"]["id"]);

    let (status, _) = app
        .send(
            "POST",
            "/api/taught-courses",
            Some(&boss.token),
            Some(json!({ "course_id": 9999, "teacher_id": grace_id, "section": "A", "year": 3 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, list) = app
        .send(
            "GET",
            &format!("/api/taught-courses?teacher_id={grace_id}"),
            Some(&grace.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"]["total"], 1);

    let (status, _) = app
        .send("PUT", &uri, Some(&boss.token), Some(json!({ "classes_taken": -1 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = app
        .send(
            "PUT",
            &uri,
            Some(&boss.token),
            Some(json!({ "classes_taken": 12, "section": "B" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["classes_taken"], 12);
    assert_eq!(updated["data"]["section"], "B");

    let (status, _) = app
        .send("PUT", &uri, Some(&grace.token), Some(json!({ "year": 4 })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = app.send("DELETE", &uri, Some(&boss.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Taught course deleted successfully");
    let (status, json) = app.send("GET", &uri, Some(&boss.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Taught course not found");
}

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::student_course;
use util::state::AppState;

use super::common::{CreateStudentCourseRequest, StudentCourseResponse, with_names};
use crate::routes::common::{db_error, fail, ok};

/// POST /api/student-courses
///
/// Creates an enrollment with an empty log.
///
/// - `201 Created`
/// - `400 Bad Request` unknown student, course or teacher
/// - `409 Conflict` the student already has this (course, teacher) entry
pub async fn create_student_course(
    State(state): State<AppState>,
    Json(req): Json<CreateStudentCourseRequest>,
) -> impl IntoResponse {
    let db = state.db();
    let created =
        match student_course::Model::create(db, req.student_id, req.course_id, req.teacher_id)
            .await
        {
            Ok(r) => r,
            Err(e) => return db_error::<StudentCourseResponse>(e),
        };

    match with_names(db, vec![created]).await {
        Ok(mut items) => match items.pop() {
            Some(item) => ok(StatusCode::CREATED, item, "Enrollment created successfully"),
            None => fail(StatusCode::INTERNAL_SERVER_ERROR, "Enrollment vanished"),
        },
        Err(e) => db_error(e),
    }
}

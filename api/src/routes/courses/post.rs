use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::course;
use util::state::AppState;
use validator::Validate;

use super::common::{CourseResponse, CreateCourseRequest};
use crate::routes::common::{db_error, ok, validation_error};

/// POST /api/courses
///
/// ```json
/// { "course_name": "Data Structures", "course_code": "CS201" }
/// ```
///
/// - `201 Created`
/// - `409 Conflict` course code already exists
pub async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<CreateCourseRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return validation_error::<CourseResponse>(&e);
    }

    match course::Model::create(state.db(), &req.course_name, &req.course_code).await {
        Ok(c) => ok(
            StatusCode::CREATED,
            CourseResponse::from(c),
            "Course created successfully",
        ),
        Err(e) => db_error(e),
    }
}

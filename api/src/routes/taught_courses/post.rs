use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::taught_course;
use util::state::AppState;
use validator::Validate;

use super::common::{CreateTaughtCourseRequest, TaughtCourseResponse, with_names};
use crate::routes::common::{db_error, fail, ok, validation_error};

/// POST /api/taught-courses
///
/// Assigns a teacher to a course for one (year, section) cohort.
///
/// ```json
/// { "course_id": 1, "teacher_id": 2, "section": "A", "year": 2 }
/// ```
///
/// - `201 Created`
/// - `400 Bad Request` unknown course or teacher
pub async fn create_taught_course(
    State(state): State<AppState>,
    Json(req): Json<CreateTaughtCourseRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return validation_error::<TaughtCourseResponse>(&e);
    }

    let db = state.db();
    let created = match taught_course::Model::create(
        db,
        req.course_id,
        req.teacher_id,
        req.section.trim(),
        req.year,
    )
    .await
    {
        Ok(r) => r,
        Err(e) => return db_error(e),
    };

    match with_names(db, vec![created]).await {
        Ok(mut items) => match items.pop() {
            Some(item) => ok(StatusCode::CREATED, item, "Taught course created successfully"),
            None => fail(StatusCode::INTERNAL_SERVER_ERROR, "Taught course vanished"),
        },
        Err(e) => db_error(e),
    }
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::course;
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::response::Empty;
use crate::routes::common::{db_error, fail, ok};

/// DELETE /api/courses/{course_id}
///
/// Taught-course assignments and enrollments for the course go with it.
pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    match course::Entity::delete_by_id(course_id).exec(state.db()).await {
        Ok(res) if res.rows_affected == 0 => {
            fail::<Empty>(StatusCode::NOT_FOUND, "Course not found")
        }
        Ok(_) => ok(StatusCode::OK, Empty, "Course deleted successfully"),
        Err(e) => db_error(e),
    }
}

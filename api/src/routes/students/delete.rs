use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::student;
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::response::Empty;
use crate::routes::common::{db_error, fail, ok};

/// DELETE /api/students/{student_id}
///
/// Removes the profile together with its enrollments and scan records.
pub async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> impl IntoResponse {
    match student::Entity::delete_by_id(student_id).exec(state.db()).await {
        Ok(res) if res.rows_affected == 0 => {
            fail::<Empty>(StatusCode::NOT_FOUND, "Student not found")
        }
        Ok(_) => ok(StatusCode::OK, Empty, "Student deleted successfully"),
        Err(e) => db_error(e),
    }
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::teacher;
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::response::Empty;
use crate::routes::common::{db_error, fail, ok};

/// DELETE /api/teachers/{teacher_id}
pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<i64>,
) -> impl IntoResponse {
    match teacher::Entity::delete_by_id(teacher_id).exec(state.db()).await {
        Ok(res) if res.rows_affected == 0 => {
            fail::<Empty>(StatusCode::NOT_FOUND, "Teacher not found")
        }
        Ok(_) => ok(StatusCode::OK, Empty, "Teacher deleted successfully"),
        Err(e) => db_error(e),
    }
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::taught_course;
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::response::Empty;
use crate::routes::common::{db_error, fail, ok};

/// DELETE /api/taught-courses/{id}
pub async fn delete_taught_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match taught_course::Entity::delete_by_id(id).exec(state.db()).await {
        Ok(res) if res.rows_affected == 0 => {
            fail::<Empty>(StatusCode::NOT_FOUND, "Taught course not found")
        }
        Ok(_) => ok(StatusCode::OK, Empty, "Taught course deleted successfully"),
        Err(e) => db_error(e),
    }
}

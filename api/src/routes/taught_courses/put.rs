use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::taught_course;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use util::state::AppState;
use validator::Validate;

use super::common::{TaughtCourseResponse, UpdateTaughtCourseRequest, with_names};
use crate::routes::common::{db_error, fail, ok, validation_error};

/// PUT /api/taught-courses/{id}
///
/// Partial update of teacher, cohort or `classes_taken`.
pub async fn update_taught_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaughtCourseRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return validation_error::<TaughtCourseResponse>(&e);
    }
    if req.teacher_id.is_none()
        && req.classes_taken.is_none()
        && req.section.is_none()
        && req.year.is_none()
    {
        return fail(StatusCode::BAD_REQUEST, "At least one field must be provided");
    }

    let db = state.db();
    let current = match taught_course::Entity::find_by_id(id).one(db).await {
        Ok(Some(r)) => r,
        Ok(None) => return fail(StatusCode::NOT_FOUND, "Taught course not found"),
        Err(e) => return db_error(e),
    };

    let mut active = current.into_active_model();
    if let Some(teacher_id) = req.teacher_id {
        active.teacher_id = Set(teacher_id);
    }
    if let Some(taken) = req.classes_taken {
        active.classes_taken = Set(taken);
    }
    if let Some(section) = req.section {
        active.section = Set(section.trim().to_owned());
    }
    if let Some(year) = req.year {
        active.year = Set(year);
    }

    let updated = match active.update(db).await {
        Ok(r) => r,
        Err(e) => return db_error(e),
    };

    match with_names(db, vec![updated]).await {
        Ok(mut items) => match items.pop() {
            Some(item) => ok(StatusCode::OK, item, "Taught course updated successfully"),
            None => fail(StatusCode::NOT_FOUND, "Taught course not found"),
        },
        Err(e) => db_error(e),
    }
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::course;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use util::state::AppState;
use validator::Validate;

use super::common::{CourseResponse, UpdateCourseRequest};
use crate::routes::common::{db_error, fail, ok, validation_error};

/// PUT /api/courses/{course_id}
pub async fn update_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(req): Json<UpdateCourseRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return validation_error::<CourseResponse>(&e);
    }
    if req.course_name.is_none() && req.course_code.is_none() {
        return fail(StatusCode::BAD_REQUEST, "At least one field must be provided");
    }

    let db = state.db();
    let current = match course::Entity::find_by_id(course_id).one(db).await {
        Ok(Some(c)) => c,
        Ok(None) => return fail(StatusCode::NOT_FOUND, "Course not found"),
        Err(e) => return db_error(e),
    };

    let mut active = current.into_active_model();
    if let Some(name) = req.course_name {
        active.course_name = Set(name.trim().to_owned());
    }
    if let Some(code) = req.course_code {
        active.course_code = Set(code.trim().to_owned());
    }

    match active.update(db).await {
        Ok(c) => ok(
            StatusCode::OK,
            CourseResponse::from(c),
            "Course updated successfully",
        ),
        Err(e) => db_error(e),
    }
}

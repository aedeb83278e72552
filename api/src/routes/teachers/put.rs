use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::teacher;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use util::state::AppState;
use validator::Validate;

use super::common::{TeacherResponse, UpdateTeacherRequest};
use crate::routes::common::{db_error, fail, ok, validation_error};

/// PUT /api/teachers/{teacher_id}
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<i64>,
    Json(req): Json<UpdateTeacherRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return validation_error::<TeacherResponse>(&e);
    }
    if req.teacher_name.is_none()
        && req.teacher_code.is_none()
        && req.email.is_none()
        && req.rfid.is_none()
    {
        return fail(StatusCode::BAD_REQUEST, "At least one field must be provided");
    }

    let db = state.db();
    let current = match teacher::Entity::find_by_id(teacher_id).one(db).await {
        Ok(Some(t)) => t,
        Ok(None) => return fail(StatusCode::NOT_FOUND, "Teacher not found"),
        Err(e) => return db_error(e),
    };

    let mut active = current.into_active_model();
    if let Some(name) = req.teacher_name {
        active.teacher_name = Set(name.trim().to_owned());
    }
    if let Some(code) = req.teacher_code {
        let code = code.trim().to_owned();
        active.teacher_code = Set((!code.is_empty()).then_some(code));
    }
    if let Some(email) = req.email {
        active.email = Set(email.trim().to_owned());
    }
    if let Some(rfid) = req.rfid {
        active.rfid = Set(rfid.trim().to_owned());
    }

    match active.update(db).await {
        Ok(t) => ok(
            StatusCode::OK,
            TeacherResponse::from(t),
            "Teacher updated successfully",
        ),
        Err(e) => db_error(e),
    }
}

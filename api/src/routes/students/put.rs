use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::student;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use services::enrollment::{self, BulkUpdate};
use util::state::AppState;
use validator::Validate;

use super::common::{BulkUpdateResponse, StudentResponse, UpdateStudentRequest};
use crate::routes::common::{db_error, fail, ok, service_error, validation_error};

/// PUT /api/students/{student_id}
///
/// Partial update; at least one field must be present.
pub async fn update_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    Json(req): Json<UpdateStudentRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return validation_error::<StudentResponse>(&e);
    }
    if req.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "At least one field must be provided");
    }

    let db = state.db();
    let current = match student::Entity::find_by_id(student_id).one(db).await {
        Ok(Some(s)) => s,
        Ok(None) => return fail(StatusCode::NOT_FOUND, "Student not found"),
        Err(e) => return db_error(e),
    };

    let mut active = current.into_active_model();
    if let Some(name) = req.student_name {
        active.student_name = Set(name.trim().to_owned());
    }
    if let Some(roll) = req.roll_number {
        let roll = roll.trim().to_owned();
        active.roll_number = Set((!roll.is_empty()).then_some(roll));
    }
    if let Some(email) = req.email {
        active.email = Set(email.trim().to_owned());
    }
    if let Some(rfid) = req.rfid {
        active.rfid = Set(rfid.trim().to_owned());
    }
    if let Some(year) = req.year {
        active.year = Set(year);
    }
    if let Some(dept) = req.dept {
        active.dept = Set(dept.trim().to_owned());
    }
    if let Some(section) = req.section {
        active.section = Set(section.trim().to_owned());
    }

    match active.update(db).await {
        Ok(s) => ok(
            StatusCode::OK,
            StudentResponse::from(s),
            "Student updated successfully",
        ),
        Err(e) => db_error(e),
    }
}

/// PUT /api/students/bulk-update
///
/// ```json
/// { "student_ids": [4, 5], "year": 3, "section": "B" }
/// ```
pub async fn bulk_update(
    State(state): State<AppState>,
    Json(req): Json<BulkUpdate>,
) -> impl IntoResponse {
    match enrollment::bulk_update(state.db(), req).await {
        Ok(updated) => ok(
            StatusCode::OK,
            BulkUpdateResponse { updated },
            format!("Updated {updated} students"),
        ),
        Err(e) => service_error::<BulkUpdateResponse>(e),
    }
}

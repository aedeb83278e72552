use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::teacher;
use util::state::AppState;
use validator::Validate;

use super::common::{CreateTeacherRequest, TeacherResponse};
use crate::routes::common::{db_error, ok, validation_error};

/// POST /api/teachers
///
/// Creates a teacher profile without a login account.
pub async fn create_teacher(
    State(state): State<AppState>,
    Json(req): Json<CreateTeacherRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return validation_error::<TeacherResponse>(&e);
    }

    let code = req
        .teacher_code
        .map(|c| c.trim().to_owned())
        .filter(|c| !c.is_empty());

    match teacher::Model::create(
        state.db(),
        None,
        req.teacher_name.trim(),
        code,
        req.email.trim(),
        req.rfid.trim(),
    )
    .await
    {
        Ok(t) => ok(
            StatusCode::CREATED,
            TeacherResponse::from(t),
            "Teacher created successfully",
        ),
        Err(e) => db_error(e),
    }
}

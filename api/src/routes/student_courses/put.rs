use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::attendance::ledger;
use util::state::AppState;

use super::common::{StudentCourseResponse, UpdateStudentCourseRequest, with_names};
use crate::routes::common::{db_error, fail, ok, service_error};

/// PUT /api/student-courses/{id}
///
/// Moves the entry to another teacher or replaces its log. The log is
/// normalised to `date, date, ...` and the student's overall attendance is
/// recomputed.
pub async fn update_student_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStudentCourseRequest>,
) -> impl IntoResponse {
    if req.teacher_id.is_none() && req.classes_attended.is_none() {
        return fail::<StudentCourseResponse>(
            StatusCode::BAD_REQUEST,
            "At least one field must be provided",
        );
    }

    let db = state.db();
    let updated = match ledger::edit_enrollment(
        db,
        id,
        req.teacher_id,
        req.classes_attended.as_deref(),
    )
    .await
    {
        Ok(r) => r,
        Err(e) => return service_error(e),
    };

    match with_names(db, vec![updated]).await {
        Ok(mut items) => match items.pop() {
            Some(item) => ok(StatusCode::OK, item, "Enrollment updated successfully"),
            None => fail(StatusCode::NOT_FOUND, "Enrollment not found"),
        },
        Err(e) => db_error(e),
    }
}

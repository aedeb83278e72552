use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::attendance::ledger;
use util::state::AppState;

use crate::response::Empty;
use crate::routes::common::{ok, service_error};

/// DELETE /api/student-courses/{id}
///
/// The student's overall attendance is recomputed without this entry.
pub async fn delete_student_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match ledger::remove_enrollment(state.db(), id).await {
        Ok(()) => ok(StatusCode::OK, Empty, "Enrollment deleted successfully"),
        Err(e) => service_error::<Empty>(e),
    }
}

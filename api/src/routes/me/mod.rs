//! `/api/me`: self-service endpoints for the authenticated student.

pub mod attendance;

use axum::{Router, routing::get};
use util::state::AppState;

use attendance::get_my_attendance;

/// - `GET /me/attendance` → `get_my_attendance`
///
/// Mounted behind `allow_student`.
pub fn me_routes() -> Router<AppState> {
    Router::new().route("/attendance", get(get_my_attendance))
}

//! `/api/attendance` routes: session lifecycle, the two scan paths and manual
//! update requests.

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

mod common;
mod get;
mod post;

pub use get::{
    get_scan_payload, get_session, get_statistics, list_records, list_requests, list_sessions,
};
pub use post::{
    approve_request, create_request, create_session, reject_request, scan_qr, scan_rfid,
    stop_session,
};

use crate::auth::guards::{allow_management, allow_staff, allow_student, allow_teacher};

/// - `POST /sessions` → `create_session` (teacher)
/// - `GET /sessions` → `list_sessions` (staff)
/// - `GET /sessions/{session_id}` → `get_session` (staff)
/// - `POST /sessions/{session_id}/stop` → `stop_session` (owner or management)
/// - `GET /sessions/{session_id}/qr` → `get_scan_payload` (owning teacher)
/// - `GET /sessions/{session_id}/statistics` → `get_statistics` (staff)
/// - `GET /sessions/{session_id}/records` → `list_records` (staff)
/// - `POST /scan/rfid` → `scan_rfid` (public)
/// - `POST /scan/qr` → `scan_qr` (student)
/// - `POST /requests` → `create_request` (teacher)
/// - `GET /requests` → `list_requests` (staff)
/// - `POST /requests/{request_id}/approve` → `approve_request` (management)
/// - `POST /requests/{request_id}/reject` → `reject_request` (management)
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/sessions",
            post(create_session).route_layer(from_fn(allow_teacher)),
        )
        .route(
            "/sessions",
            get(list_sessions).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/sessions/{session_id}",
            get(get_session).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/sessions/{session_id}/stop",
            post(stop_session).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/sessions/{session_id}/qr",
            get(get_scan_payload).route_layer(from_fn(allow_teacher)),
        )
        .route(
            "/sessions/{session_id}/statistics",
            get(get_statistics).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/sessions/{session_id}/records",
            get(list_records).route_layer(from_fn(allow_staff)),
        )
        .route("/scan/rfid", post(scan_rfid))
        .route(
            "/scan/qr",
            post(scan_qr).route_layer(from_fn(allow_student)),
        )
        .route(
            "/requests",
            post(create_request).route_layer(from_fn(allow_teacher)),
        )
        .route(
            "/requests",
            get(list_requests).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/requests/{request_id}/approve",
            post(approve_request).route_layer(from_fn(allow_management)),
        )
        .route(
            "/requests/{request_id}/reject",
            post(reject_request).route_layer(from_fn(allow_management)),
        )
}

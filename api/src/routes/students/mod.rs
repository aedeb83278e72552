//! # Students Routes Module
//!
//! Staff may read student profiles; only management may change them or
//! manage enrollments.

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use crate::auth::guards::{allow_management, allow_staff};
use delete::delete_student;
use get::{get_student, list_students};
use post::{bulk_enroll, create_student, enroll_student};
use put::{bulk_update, update_student};

/// - `GET /students` → `list_students` (staff)
/// - `POST /students` → `create_student` (management)
/// - `POST /students/bulk-enroll` → `bulk_enroll` (management)
/// - `PUT /students/bulk-update` → `bulk_update` (management)
/// - `GET /students/{student_id}` → `get_student` (staff)
/// - `PUT /students/{student_id}` → `update_student` (management)
/// - `DELETE /students/{student_id}` → `delete_student` (management)
/// - `POST /students/{student_id}/enroll` → `enroll_student` (management)
pub fn students_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).route_layer(from_fn(allow_staff)))
        .route(
            "/",
            post(create_student).route_layer(from_fn(allow_management)),
        )
        .route(
            "/bulk-enroll",
            post(bulk_enroll).route_layer(from_fn(allow_management)),
        )
        .route(
            "/bulk-update",
            put(bulk_update).route_layer(from_fn(allow_management)),
        )
        .route(
            "/{student_id}",
            get(get_student).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/{student_id}",
            put(update_student).route_layer(from_fn(allow_management)),
        )
        .route(
            "/{student_id}",
            delete(delete_student).route_layer(from_fn(allow_management)),
        )
        .route(
            "/{student_id}/enroll",
            post(enroll_student).route_layer(from_fn(allow_management)),
        )
}

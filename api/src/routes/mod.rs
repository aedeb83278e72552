//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness check (public)
//! - `/auth` → registration, login, token refresh (public) and `/auth/me`
//! - `/students`, `/teachers`, `/courses`, `/classes`, `/taught-courses`,
//!   `/student-courses` → catalogue CRUD (staff read, management write)
//! - `/attendance` → sessions, scans and update requests
//! - `/me` → student self-service

use crate::auth::guards::allow_student;
use crate::routes::{
    attendance::attendance_routes, auth::auth_routes, classes::classes_routes,
    courses::courses_routes, health::health_routes, me::me_routes,
    student_courses::student_courses_routes, students::students_routes,
    taught_courses::taught_courses_routes, teachers::teachers_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod courses;
pub mod health;
pub mod me;
pub mod student_courses;
pub mod students;
pub mod taught_courses;
pub mod teachers;

/// Builds the complete application router with its state applied.
///
/// Guards are attached per method inside each group, because most groups mix
/// staff reads with management writes and the scanner endpoint is public.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/students", students_routes())
        .nest("/teachers", teachers_routes())
        .nest("/courses", courses_routes())
        .nest("/classes", classes_routes())
        .nest("/taught-courses", taught_courses_routes())
        .nest("/student-courses", student_courses_routes())
        .nest("/attendance", attendance_routes())
        .nest("/me", me_routes().route_layer(from_fn(allow_student)))
        .with_state(app_state)
}

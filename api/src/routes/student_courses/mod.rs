//! # Student Courses Routes Module
//!
//! Enrollment rows, each carrying the attendance log for one
//! (student, course, teacher).

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
use delete::delete_student_course;
use get::{get_student_course, list_student_courses};
use post::create_student_course;
use put::update_student_course;

pub fn student_courses_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_student_courses).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/",
            post(create_student_course).route_layer(from_fn(allow_management)),
        )
        .route(
            "/{id}",
            get(get_student_course).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/{id}",
            put(update_student_course).route_layer(from_fn(allow_management)),
        )
        .route(
            "/{id}",
            delete(delete_student_course).route_layer(from_fn(allow_management)),
        )
}

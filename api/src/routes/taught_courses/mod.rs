//! # Taught Courses Routes Module
//!
//! Teacher-to-cohort assignments. `classes_taken` is normally advanced by
//! opening attendance sessions; management can correct it here.

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
use delete::delete_taught_course;
use get::{get_taught_course, list_taught_courses};
use post::create_taught_course;
use put::update_taught_course;

pub fn taught_courses_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_taught_courses).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/",
            post(create_taught_course).route_layer(from_fn(allow_management)),
        )
        .route(
            "/{id}",
            get(get_taught_course).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/{id}",
            put(update_taught_course).route_layer(from_fn(allow_management)),
        )
        .route(
            "/{id}",
            delete(delete_taught_course).route_layer(from_fn(allow_management)),
        )
}

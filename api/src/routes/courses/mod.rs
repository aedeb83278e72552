//! # Courses Routes Module
//!
//! Every authenticated user can browse the catalogue (students pick course
//! codes at registration); management maintains it.

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

use crate::auth::guards::{allow_authenticated, allow_management};
use delete::delete_course;
use get::{get_course, list_courses};
use post::create_course;
use put::update_course;

pub fn courses_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_courses).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/",
            post(create_course).route_layer(from_fn(allow_management)),
        )
        .route(
            "/{course_id}",
            get(get_course).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/{course_id}",
            put(update_course).route_layer(from_fn(allow_management)),
        )
        .route(
            "/{course_id}",
            delete(delete_course).route_layer(from_fn(allow_management)),
        )
}

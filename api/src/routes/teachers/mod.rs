//! # Teachers Routes Module

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
use delete::delete_teacher;
use get::{get_teacher, list_teachers};
use post::create_teacher;
use put::update_teacher;

/// - `GET /teachers`, `GET /teachers/{teacher_id}` (staff)
/// - `POST /teachers`, `PUT|DELETE /teachers/{teacher_id}` (management)
pub fn teachers_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teachers).route_layer(from_fn(allow_staff)))
        .route(
            "/",
            post(create_teacher).route_layer(from_fn(allow_management)),
        )
        .route(
            "/{teacher_id}",
            get(get_teacher).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/{teacher_id}",
            put(update_teacher).route_layer(from_fn(allow_management)),
        )
        .route(
            "/{teacher_id}",
            delete(delete_teacher).route_layer(from_fn(allow_management)),
        )
}

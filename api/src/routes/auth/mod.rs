//! # auth Routes Module
//!
//! - `post.rs` — registration, login and token refresh (public)
//! - `get.rs` — the caller's own profile

pub mod get;
pub mod post;

use crate::auth::guards::allow_authenticated;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use get::get_me;
use post::{login, refresh, register_management, register_student, register_teacher};
use util::state::AppState;

/// Builds the `/auth` route group.
///
/// - `POST /auth/register/student` → `register_student`
/// - `POST /auth/register/teacher` → `register_teacher`
/// - `POST /auth/register/management` → `register_management`
/// - `POST /auth/login/{kind}` → `login`
/// - `POST /auth/refresh` → `refresh`
/// - `GET /auth/me` → `get_me` (authenticated)
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register/student", post(register_student))
        .route("/register/teacher", post(register_teacher))
        .route("/register/management", post(register_management))
        .route("/login/{kind}", post(login))
        .route("/refresh", post(refresh))
        .route(
            "/me",
            get(get_me).route_layer(from_fn(allow_authenticated)),
        )
}

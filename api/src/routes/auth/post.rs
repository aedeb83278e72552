use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::user::UserRole;
use serde::{Deserialize, Serialize};
use services::ServiceResult;
use services::auth::{self, Profile, RegisterManagement, RegisterStudent, RegisterTeacher};
use tracing::{error, info};
use util::state::AppState;

use crate::auth::{TokenKind, decode_claims, generate_jwt, generate_refresh_jwt};
use crate::routes::common::{ApiResult, fail, ok, service_error};

#[derive(Debug, Serialize, Default)]
pub struct RegisteredResponse {
    pub id: i64,
    pub user_id: i64,
    pub email: String,
    pub name: String,
}

impl From<Profile> for RegisteredResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.profile_id,
            user_id: p.user_id,
            email: p.email,
            name: p.name,
        }
    }
}

fn registered(result: ServiceResult<Profile>, what: &str) -> ApiResult<RegisteredResponse> {
    match result {
        Ok(profile) => ok(
            StatusCode::CREATED,
            RegisteredResponse::from(profile),
            format!("{what} registered successfully"),
        ),
        Err(e) => service_error(e),
    }
}

/// POST /auth/register/student
///
/// ### Request Body
/// ```json
/// {
///   "email": "ada@example.com",
///   "password": "s3cretpass",
///   "password2": "s3cretpass",
///   "student_name": "Ada",
///   "roll_number": "R-17",
///   "rfid": "04A1B2C3",
///   "year": 2,
///   "dept": "CSE",
///   "section": "A",
///   "courses": ["CS101", "MA201"]
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with `{ id, user_id, email, name }`
/// - `400 Bad Request` validation failure, or `"Unknown course codes: XX1, YY2"`
/// - `409 Conflict` email or RFID already registered
pub async fn register_student(
    State(state): State<AppState>,
    Json(req): Json<RegisterStudent>,
) -> impl IntoResponse {
    registered(auth::register_student(state.db(), req).await, "Student")
}

/// POST /auth/register/teacher
pub async fn register_teacher(
    State(state): State<AppState>,
    Json(req): Json<RegisterTeacher>,
) -> impl IntoResponse {
    registered(auth::register_teacher(state.db(), req).await, "Teacher")
}

/// POST /auth/register/management
pub async fn register_management(
    State(state): State<AppState>,
    Json(req): Json<RegisterManagement>,
) -> impl IntoResponse {
    registered(auth::register_management(state.db(), req).await, "Management")
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub expires_at: String,
    pub user_type: String,
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: String,
}

/// POST /auth/login/{kind}
///
/// `kind` is `student`, `teacher` or `management`.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "access": "<jwt>",
///     "refresh": "<jwt>",
///     "expires_at": "2025-10-01T10:00:00+00:00",
///     "user_type": "student",
///     "id": 3,
///     "user_id": 9,
///     "name": "Ada",
///     "email": "ada@example.com"
///   },
///   "message": "Login successful"
/// }
/// ```
/// - `401 Unauthorized` `"Invalid email or password"`
/// - `404 Not Found` `"Teacher profile not found for this user"`
pub async fn login(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let Ok(role) = UserRole::from_str(&kind) else {
        return fail::<LoginResponse>(StatusCode::NOT_FOUND, format!("Unknown login kind '{kind}'"));
    };

    let profile = match auth::login(state.db(), &req.email, &req.password, role).await {
        Ok(p) => p,
        Err(e) => return service_error(e),
    };

    let tokens = generate_jwt(profile.user_id, role)
        .and_then(|access| generate_refresh_jwt(profile.user_id, role).map(|r| (access, r)));
    let ((access, expires_at), (refresh, _)) = match tokens {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to sign tokens");
            return fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue tokens");
        }
    };

    info!(user_id = profile.user_id, role = %role, "Login successful");

    ok(
        StatusCode::OK,
        LoginResponse {
            access,
            refresh,
            expires_at,
            user_type: role.to_string(),
            id: profile.profile_id,
            user_id: profile.user_id,
            name: profile.name,
            email: profile.email,
        },
        "Login successful",
    )
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize, Default)]
pub struct RefreshResponse {
    pub access: String,
    pub expires_at: String,
}

/// POST /auth/refresh
///
/// Exchanges a refresh token for a new access token. Access tokens are
/// rejected here with `401`.
pub async fn refresh(Json(req): Json<RefreshRequest>) -> impl IntoResponse {
    let claims = match decode_claims(&req.refresh) {
        Ok(c) if c.kind == TokenKind::Refresh => c,
        _ => {
            return fail::<RefreshResponse>(
                StatusCode::UNAUTHORIZED,
                "Invalid or expired refresh token",
            );
        }
    };

    match generate_jwt(claims.sub, claims.role) {
        Ok((access, expires_at)) => ok(
            StatusCode::OK,
            RefreshResponse { access, expires_at },
            "Token refreshed",
        ),
        Err(e) => {
            error!(error = %e, "Failed to sign access token");
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue tokens")
        }
    }
}

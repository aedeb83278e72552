use axum::{Extension, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use services::auth;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::routes::common::{ok, service_error};

#[derive(Debug, Serialize, Default)]
pub struct MeResponse {
    pub user_id: i64,
    pub role: String,
    pub profile_id: i64,
    pub name: String,
    pub email: String,
}

/// GET /auth/me
///
/// Returns the caller's role and the profile linked to their account.
///
/// ```json
/// {
///   "success": true,
///   "data": { "user_id": 9, "role": "teacher", "profile_id": 2, "name": "Grace", "email": "grace@example.com" },
///   "message": "User data retrieved successfully"
/// }
/// ```
pub async fn get_me(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    match auth::profile_for(state.db(), claims.sub).await {
        Ok(p) => ok(
            StatusCode::OK,
            MeResponse {
                user_id: p.user_id,
                role: p.role.to_string(),
                profile_id: p.profile_id,
                name: p.name,
                email: p.email,
            },
            "User data retrieved successfully",
        ),
        Err(e) => service_error::<MeResponse>(e),
    }
}


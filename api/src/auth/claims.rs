use db::models::user::UserRole;
use serde::{Deserialize, Serialize};

/// Distinguishes short-lived access tokens from refresh tokens.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    pub role: UserRole,
    pub kind: TokenKind,
    pub exp: usize,
}

/// Claims of an authenticated access token, inserted into request
/// extensions by the guards.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

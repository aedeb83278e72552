pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims, TokenKind};

use chrono::{Duration, Utc};
use db::models::user::UserRole;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use util::config;

fn issue(
    user_id: i64,
    role: UserRole,
    kind: TokenKind,
    minutes: u64,
) -> Result<(String, String), jsonwebtoken::errors::Error> {
    let expiry = Utc::now() + Duration::minutes(minutes as i64);

    let claims = Claims {
        sub: user_id,
        role,
        kind,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )?;

    Ok((token, expiry.to_rfc3339()))
}

/// Generates an access token and its RFC 3339 expiry for a user.
pub fn generate_jwt(
    user_id: i64,
    role: UserRole,
) -> Result<(String, String), jsonwebtoken::errors::Error> {
    issue(user_id, role, TokenKind::Access, config::jwt_duration_minutes())
}

/// Generates a refresh token, accepted only by `/auth/refresh`.
pub fn generate_refresh_jwt(
    user_id: i64,
    role: UserRole,
) -> Result<(String, String), jsonwebtoken::errors::Error> {
    issue(
        user_id,
        role,
        TokenKind::Refresh,
        config::jwt_refresh_duration_minutes(),
    )
}

/// Verifies signature and expiry and returns the claims.
pub fn decode_claims(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config::jwt_secret().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

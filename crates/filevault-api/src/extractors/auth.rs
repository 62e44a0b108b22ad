//! `AuthUser` extractor: pulls the JWT from the Authorization header and
//! validates it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use filevault_core::error::AppError;
use crate::error::ApiError;

use crate::state::AppState;

/// The authenticated requester, as proven by a valid access token.
///
/// Handlers take this by value and pass `user_id` down to the service
/// layer; services never see tokens or headers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The requester's user id.
    pub user_id: Uuid,
    /// The requester's username, as recorded in the token.
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        // Refresh tokens are rejected here; only access tokens authenticate
        // API calls.
        let claims = state.jwt_decoder.decode_access_token(token)?;

        Ok(AuthUser {
            user_id: claims.user_id(),
            username: claims.username,
        })
    }
}

//! User self-service handlers.

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use filevault_service::user::UpdateProfileRequest as SvcUpdateProfile;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// PUT /api/v1/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .user_service
        .update_profile(
            auth.user_id,
            SvcUpdateProfile {
                username: req.username,
                email: req.email,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

//! User self-service operations: profile viewing and updates.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use filevault_core::error::AppError;
use filevault_database::repositories::UserRepository;
use filevault_entity::user::{UpdateUser, User};

/// Handles user self-service operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
}

/// Data for updating a user's own profile.
///
/// `None` keeps the stored value.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name.
    pub username: Option<String>,
    /// New email.
    pub email: Option<String>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Gets the requester's full profile.
    pub async fn me(&self, requester_id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(requester_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the requester's profile fields.
    pub async fn update_profile(
        &self,
        requester_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<User, AppError> {
        let username = match req.username {
            Some(username) => {
                let username = username.trim().to_string();
                if username.is_empty() {
                    return Err(AppError::validation("Username cannot be empty"));
                }
                Some(username)
            }
            None => None,
        };

        let email = match req.email {
            Some(email) => {
                let email = email.trim().to_lowercase();
                if !email.contains('@') || !email.contains('.') {
                    return Err(AppError::validation("Invalid email format"));
                }
                if let Some(existing) = self.user_repo.find_by_email(&email).await? {
                    if existing.id != requester_id {
                        return Err(AppError::conflict("Email is already in use"));
                    }
                }
                Some(email)
            }
            None => None,
        };

        let user = self
            .user_repo
            .update(&UpdateUser {
                id: requester_id,
                username,
                email,
            })
            .await?;

        info!(user_id = %requester_id, "Profile updated");

        Ok(user)
    }
}

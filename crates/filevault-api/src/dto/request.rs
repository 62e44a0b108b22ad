//! Request DTOs with validation.
//!
//! Role strings arrive as plain text and are parsed into the closed
//! [`WorkspaceRole`] set in the handlers; unknown roles never reach the
//! service layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,
    /// Login email.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name.
    pub username: Option<String>,
    /// New email.
    pub email: Option<String>,
}

/// Create workspace request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateWorkspaceRequest {
    /// Workspace name.
    #[validate(length(min = 1, max = 255, message = "Workspace name is required"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Update workspace request. Absent fields keep their stored values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWorkspaceRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Add member request. The new member always starts as a viewer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddMemberRequest {
    /// Email of the user to add.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Change member role request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMemberRoleRequest {
    /// The new role as a string; validated against the closed role set.
    pub role: String,
}

/// Create category request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Category name.
    #[validate(length(min = 1, max = 100, message = "Category name is required"))]
    pub name: String,
    /// Display color.
    pub color: Option<String>,
}

/// Update category request. Absent fields keep their stored values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    /// New name.
    pub name: Option<String>,
    /// New display color.
    pub color: Option<String>,
}

/// Category ids for file assignment operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryIdsRequest {
    /// Categories to assign, remove, or replace with.
    pub category_ids: Vec<Uuid>,
}

/// Query parameters for list endpoints with a name filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring match.
    pub search: Option<String>,
}

/// Query parameters for the file list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileListQuery {
    /// Restrict to files carrying this category.
    pub category_id: Option<Uuid>,
}

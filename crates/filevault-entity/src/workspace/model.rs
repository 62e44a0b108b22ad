//! Workspace and membership entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::WorkspaceRole;

/// A shared container owned by one user, with zero or more additional members.
///
/// Invariant: every workspace has exactly one membership row with
/// [`WorkspaceRole::Owner`], and its `user_id` equals `owner_id`. The two
/// rows are created in the same transaction and only torn down together by
/// the cascade on workspace deletion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Workspace {
    /// Unique workspace identifier.
    pub id: Uuid,
    /// Workspace name.
    pub name: String,
    /// Free-form description (may be empty).
    pub description: String,
    /// The owning user.
    pub owner_id: Uuid,
    /// When the workspace was created.
    pub created_at: DateTime<Utc>,
    /// When the workspace was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The (workspace, user, role) relation granting access.
///
/// Unique per (workspace_id, user_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkspaceMember {
    /// Unique membership identifier.
    pub id: Uuid,
    /// The workspace this membership belongs to.
    pub workspace_id: Uuid,
    /// The member user.
    pub user_id: Uuid,
    /// The member's role within the workspace.
    pub role: WorkspaceRole,
    /// When the user joined the workspace.
    pub joined_at: DateTime<Utc>,
}

/// A membership row joined with its member's user record.
///
/// Query projection used by the workspace detail view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MemberWithUser {
    /// The member user's id.
    pub user_id: Uuid,
    /// The member's username.
    pub username: String,
    /// The member's email.
    pub email: String,
    /// The member's role within the workspace.
    pub role: WorkspaceRole,
    /// When the user joined the workspace.
    pub joined_at: DateTime<Utc>,
}

/// A membership row joined with its workspace and the owner's username.
///
/// Query projection used by the "my workspaces" listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MembershipWithWorkspace {
    /// The workspace id.
    pub workspace_id: Uuid,
    /// The workspace name.
    pub name: String,
    /// The workspace description.
    pub description: String,
    /// The workspace owner's id.
    pub owner_id: Uuid,
    /// The workspace owner's username.
    pub owner_name: String,
    /// The requesting user's role in this workspace.
    pub role: WorkspaceRole,
    /// When the workspace was created.
    pub created_at: DateTime<Utc>,
}

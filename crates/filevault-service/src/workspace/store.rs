//! Persistence seams consumed by the workspace service.
//!
//! The service depends on these narrow traits rather than on the concrete
//! sqlx repositories so the membership and authorization flow can be
//! exercised against in-memory stores in tests. The repository
//! implementations simply delegate.

use async_trait::async_trait;
use uuid::Uuid;

use filevault_core::result::AppResult;
use filevault_database::repositories::{UserRepository, WorkspaceRepository};
use filevault_entity::user::User;
use filevault_entity::workspace::{
    MemberWithUser, MembershipWithWorkspace, Workspace, WorkspaceMember, WorkspaceRole,
};

/// User lookup as needed for member resolution.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    /// Find a user by email, case-insensitively.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Workspace and membership persistence.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Create a workspace and its owner membership atomically.
    async fn create_with_owner(
        &self,
        name: &str,
        description: &str,
        owner_id: Uuid,
    ) -> AppResult<Workspace>;

    /// Find a workspace by primary key.
    async fn find_workspace(&self, id: Uuid) -> AppResult<Option<Workspace>>;

    /// Find a single membership row by (workspace, user).
    async fn find_membership(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<WorkspaceMember>>;

    /// List the workspaces a user belongs to, with an optional name filter.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> AppResult<Vec<MembershipWithWorkspace>>;

    /// List the member roster of a workspace.
    async fn list_members(&self, workspace_id: Uuid) -> AppResult<Vec<MemberWithUser>>;

    /// Persist new workspace name and description.
    async fn update_workspace(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
    ) -> AppResult<Workspace>;

    /// Delete a workspace; memberships go with it.
    async fn delete_workspace(&self, id: Uuid) -> AppResult<bool>;

    /// Insert a membership row.
    async fn add_member(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
        role: WorkspaceRole,
    ) -> AppResult<WorkspaceMember>;

    /// Change an existing member's role.
    async fn update_member_role(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
        role: WorkspaceRole,
    ) -> AppResult<()>;

    /// Delete a membership row.
    async fn remove_member(&self, workspace_id: Uuid, user_id: Uuid) -> AppResult<bool>;
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(self, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_email(self, email).await
    }
}

#[async_trait]
impl WorkspaceStore for WorkspaceRepository {
    async fn create_with_owner(
        &self,
        name: &str,
        description: &str,
        owner_id: Uuid,
    ) -> AppResult<Workspace> {
        WorkspaceRepository::create_with_owner(self, name, description, owner_id).await
    }

    async fn find_workspace(&self, id: Uuid) -> AppResult<Option<Workspace>> {
        WorkspaceRepository::find_by_id(self, id).await
    }

    async fn find_membership(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<WorkspaceMember>> {
        WorkspaceRepository::find_membership(self, workspace_id, user_id).await
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> AppResult<Vec<MembershipWithWorkspace>> {
        WorkspaceRepository::list_for_user(self, user_id, search).await
    }

    async fn list_members(&self, workspace_id: Uuid) -> AppResult<Vec<MemberWithUser>> {
        WorkspaceRepository::list_members(self, workspace_id).await
    }

    async fn update_workspace(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
    ) -> AppResult<Workspace> {
        WorkspaceRepository::update(self, id, name, description).await
    }

    async fn delete_workspace(&self, id: Uuid) -> AppResult<bool> {
        WorkspaceRepository::delete(self, id).await
    }

    async fn add_member(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
        role: WorkspaceRole,
    ) -> AppResult<WorkspaceMember> {
        WorkspaceRepository::add_member(self, workspace_id, user_id, role).await
    }

    async fn update_member_role(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
        role: WorkspaceRole,
    ) -> AppResult<()> {
        WorkspaceRepository::update_member_role(self, workspace_id, user_id, role).await
    }

    async fn remove_member(&self, workspace_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        WorkspaceRepository::remove_member(self, workspace_id, user_id).await
    }
}

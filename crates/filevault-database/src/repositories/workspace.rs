//! Workspace and membership repository implementation.
//!
//! The only multi-row write in the application lives here:
//! [`WorkspaceRepository::create_with_owner`] inserts the workspace row and
//! its owner membership inside one transaction so a workspace without an
//! owner membership (or vice versa) is never observable.

use sqlx::PgPool;
use uuid::Uuid;

use filevault_core::error::{AppError, ErrorKind};
use filevault_core::result::AppResult;
use filevault_entity::workspace::{
    MemberWithUser, MembershipWithWorkspace, Workspace, WorkspaceMember, WorkspaceRole,
};

/// Repository for workspaces and their membership rows.
#[derive(Debug, Clone)]
pub struct WorkspaceRepository {
    pool: PgPool,
}

impl WorkspaceRepository {
    /// Create a new workspace repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a workspace together with its owner membership, atomically.
    pub async fn create_with_owner(
        &self,
        name: &str,
        description: &str,
        owner_id: Uuid,
    ) -> AppResult<Workspace> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let workspace = sqlx::query_as::<_, Workspace>(
            "INSERT INTO workspaces (name, description, owner_id) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(name)
        .bind(description)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create workspace", e))?;

        sqlx::query(
            "INSERT INTO workspace_members (workspace_id, user_id, role) \
             VALUES ($1, $2, $3)",
        )
        .bind(workspace.id)
        .bind(owner_id)
        .bind(WorkspaceRole::Owner)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create owner membership", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit workspace creation", e)
        })?;

        Ok(workspace)
    }

    /// Find a workspace by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Workspace>> {
        sqlx::query_as::<_, Workspace>("SELECT * FROM workspaces WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find workspace", e))
    }

    /// Find a single membership row by (workspace, user).
    pub async fn find_membership(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<WorkspaceMember>> {
        sqlx::query_as::<_, WorkspaceMember>(
            "SELECT * FROM workspace_members WHERE workspace_id = $1 AND user_id = $2",
        )
        .bind(workspace_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    /// List all workspaces a user is a member of, with the owner's username
    /// and the user's own role, optionally filtered by a case-insensitive
    /// substring match on the workspace name.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> AppResult<Vec<MembershipWithWorkspace>> {
        let pattern = search.map(|s| format!("%{}%", super::escape_like(s)));

        sqlx::query_as::<_, MembershipWithWorkspace>(
            "SELECT w.id AS workspace_id, w.name, w.description, w.owner_id, \
                    o.username AS owner_name, m.role, w.created_at \
             FROM workspace_members m \
             JOIN workspaces w ON w.id = m.workspace_id \
             JOIN users o ON o.id = w.owner_id \
             WHERE m.user_id = $1 AND ($2::text IS NULL OR w.name ILIKE $2) \
             ORDER BY w.created_at DESC",
        )
        .bind(user_id)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list workspaces", e))
    }

    /// List the full member roster of a workspace, joined with user records.
    pub async fn list_members(&self, workspace_id: Uuid) -> AppResult<Vec<MemberWithUser>> {
        sqlx::query_as::<_, MemberWithUser>(
            "SELECT m.user_id, u.username, u.email, m.role, m.joined_at \
             FROM workspace_members m \
             JOIN users u ON u.id = m.user_id \
             WHERE m.workspace_id = $1 \
             ORDER BY m.joined_at ASC",
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))
    }

    /// Update a workspace's name and description.
    pub async fn update(&self, id: Uuid, name: &str, description: &str) -> AppResult<Workspace> {
        sqlx::query_as::<_, Workspace>(
            "UPDATE workspaces SET name = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update workspace", e))?
        .ok_or_else(|| AppError::not_found(format!("Workspace {id} not found")))
    }

    /// Delete a workspace. Membership rows are removed by the foreign-key
    /// cascade; file rows are detached by nulling their workspace_id.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workspaces WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete workspace", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert a membership row.
    pub async fn add_member(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
        role: WorkspaceRole,
    ) -> AppResult<WorkspaceMember> {
        sqlx::query_as::<_, WorkspaceMember>(
            "INSERT INTO workspace_members (workspace_id, user_id, role) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(workspace_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("workspace_members_workspace_id_user_id_key") =>
            {
                AppError::conflict("User is already a member of this workspace".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to add member", e),
        })
    }

    /// Update a member's role.
    pub async fn update_member_role(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
        role: WorkspaceRole,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE workspace_members SET role = $3 WHERE workspace_id = $1 AND user_id = $2",
        )
        .bind(workspace_id)
        .bind(user_id)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update member role", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Member not found"));
        }
        Ok(())
    }

    /// Delete a membership row.
    pub async fn remove_member(&self, workspace_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM workspace_members WHERE workspace_id = $1 AND user_id = $2")
                .bind(workspace_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to remove member", e)
                })?;

        Ok(result.rows_affected() > 0)
    }
}

//! Workspace lifecycle service.
//!
//! Owns the full workspace story: creation (with the atomic owner
//! membership), listing, detail, updates, deletion, and member
//! management. Every authorization decision is delegated to
//! [`WorkspacePolicy`]; this service only resolves the requester's
//! membership and feeds roles into the policy.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use filevault_auth::WorkspacePolicy;
use filevault_core::error::AppError;
use filevault_entity::workspace::{
    MemberWithUser, MembershipWithWorkspace, Workspace, WorkspaceMember, WorkspaceRole,
};

use super::store::{UserDirectory, WorkspaceStore};

/// Manages workspaces and their memberships.
#[derive(Clone)]
pub struct WorkspaceService {
    /// Workspace and membership persistence.
    store: Arc<dyn WorkspaceStore>,
    /// User lookup for member resolution.
    users: Arc<dyn UserDirectory>,
}

/// Request to create a workspace.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateWorkspaceRequest {
    /// Workspace name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
}

/// Request to update a workspace.
///
/// `None` keeps the stored value; `Some` overwrites it. The description
/// may be overwritten with an empty string, the name may not.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateWorkspaceRequest {
    /// New name, if changing.
    pub name: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
}

/// Request to add a member, resolved by email.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AddMemberRequest {
    /// Email of the user to add.
    pub email: String,
}

/// Request to change a member's role.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateMemberRoleRequest {
    /// The new role. Unknown role strings are rejected during
    /// deserialization.
    pub role: WorkspaceRole,
}

/// A workspace together with its member roster and the requester's role.
#[derive(Debug, Clone, serde::Serialize)]
pub struct WorkspaceDetail {
    /// The workspace record.
    pub workspace: Workspace,
    /// The requester's own role in it.
    pub role: WorkspaceRole,
    /// Full member roster, oldest membership first.
    pub members: Vec<MemberWithUser>,
}

impl WorkspaceService {
    /// Creates a new workspace service.
    pub fn new(store: Arc<dyn WorkspaceStore>, users: Arc<dyn UserDirectory>) -> Self {
        Self { store, users }
    }

    /// Creates a workspace owned by the requester.
    ///
    /// The owner membership row is written in the same transaction as the
    /// workspace itself; a workspace without an owner member is never
    /// observable.
    pub async fn create(
        &self,
        requester_id: Uuid,
        req: CreateWorkspaceRequest,
    ) -> Result<Workspace, AppError> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Workspace name cannot be empty"));
        }

        let description = req.description.unwrap_or_default();
        let workspace = self
            .store
            .create_with_owner(name, &description, requester_id)
            .await?;

        info!(
            workspace_id = %workspace.id,
            owner_id = %requester_id,
            "Workspace created"
        );

        Ok(workspace)
    }

    /// Lists the workspaces the requester belongs to, optionally filtered
    /// by a case-insensitive substring match on the name.
    pub async fn list(
        &self,
        requester_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<MembershipWithWorkspace>, AppError> {
        self.store.list_for_user(requester_id, search).await
    }

    /// Returns a workspace with its full member roster.
    ///
    /// Non-members get the same "not found" answer as for a workspace that
    /// does not exist; membership is what grants visibility.
    pub async fn detail(
        &self,
        requester_id: Uuid,
        workspace_id: Uuid,
    ) -> Result<WorkspaceDetail, AppError> {
        let workspace = self.find_workspace(workspace_id).await?;
        let membership = self.require_membership(workspace_id, requester_id).await?;
        let members = self.store.list_members(workspace_id).await?;

        Ok(WorkspaceDetail {
            workspace,
            role: membership.role,
            members,
        })
    }

    /// Updates a workspace's name and/or description.
    pub async fn update(
        &self,
        requester_id: Uuid,
        workspace_id: Uuid,
        req: UpdateWorkspaceRequest,
    ) -> Result<Workspace, AppError> {
        let workspace = self.find_workspace(workspace_id).await?;
        let membership = self.require_membership(workspace_id, requester_id).await?;
        WorkspacePolicy::require_update_workspace(membership.role)?;

        let name = match req.name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(AppError::validation("Workspace name cannot be empty"));
                }
                name
            }
            None => workspace.name,
        };
        let description = req.description.unwrap_or(workspace.description);

        let updated = self
            .store
            .update_workspace(workspace_id, &name, &description)
            .await?;

        info!(workspace_id = %workspace_id, user_id = %requester_id, "Workspace updated");

        Ok(updated)
    }

    /// Deletes a workspace. Owner only; memberships are removed with it.
    pub async fn delete(&self, requester_id: Uuid, workspace_id: Uuid) -> Result<(), AppError> {
        let workspace = self.find_workspace(workspace_id).await?;
        self.require_membership(workspace_id, requester_id).await?;
        WorkspacePolicy::require_delete_workspace(requester_id, &workspace)?;

        self.store.delete_workspace(workspace_id).await?;

        info!(workspace_id = %workspace_id, owner_id = %requester_id, "Workspace deleted");

        Ok(())
    }

    /// Adds a user (resolved by email) as a member with the default
    /// viewer role.
    pub async fn add_member(
        &self,
        requester_id: Uuid,
        workspace_id: Uuid,
        req: AddMemberRequest,
    ) -> Result<WorkspaceMember, AppError> {
        self.find_workspace(workspace_id).await?;
        let membership = self.require_membership(workspace_id, requester_id).await?;
        WorkspacePolicy::require_manage_members(membership.role)?;

        let user = self
            .users
            .find_by_email(req.email.trim())
            .await?
            .ok_or_else(|| AppError::not_found("No user with that email address"))?;

        // New members always start as viewers; the role is raised
        // explicitly afterwards if needed.
        let member = self
            .store
            .add_member(workspace_id, user.id, WorkspaceRole::Viewer)
            .await?;

        info!(
            workspace_id = %workspace_id,
            user_id = %user.id,
            added_by = %requester_id,
            "Member added"
        );

        Ok(member)
    }

    /// Changes an existing member's role. The owner's role is immutable.
    pub async fn update_member_role(
        &self,
        requester_id: Uuid,
        workspace_id: Uuid,
        target_user_id: Uuid,
        req: UpdateMemberRoleRequest,
    ) -> Result<(), AppError> {
        self.find_workspace(workspace_id).await?;
        let membership = self.require_membership(workspace_id, requester_id).await?;
        WorkspacePolicy::require_manage_members(membership.role)?;
        // A second owner membership must never come into existence.
        WorkspacePolicy::require_assign_role(req.role)?;

        let target = self
            .store
            .find_membership(workspace_id, target_user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found"))?;
        WorkspacePolicy::require_change_role_of(target.role)?;

        self.store
            .update_member_role(workspace_id, target_user_id, req.role)
            .await?;

        info!(
            workspace_id = %workspace_id,
            user_id = %target_user_id,
            role = %req.role,
            changed_by = %requester_id,
            "Member role updated"
        );

        Ok(())
    }

    /// Removes a member from a workspace.
    ///
    /// Self-removal is refused with a hint at [`Self::leave`]; the owner
    /// cannot be removed by anyone.
    pub async fn remove_member(
        &self,
        requester_id: Uuid,
        workspace_id: Uuid,
        target_user_id: Uuid,
    ) -> Result<(), AppError> {
        self.find_workspace(workspace_id).await?;
        let membership = self.require_membership(workspace_id, requester_id).await?;
        WorkspacePolicy::require_manage_members(membership.role)?;

        let target = self
            .store
            .find_membership(workspace_id, target_user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found"))?;
        WorkspacePolicy::require_remove_member(
            requester_id,
            membership.role,
            target_user_id,
            target.role,
        )?;

        self.store.remove_member(workspace_id, target_user_id).await?;

        info!(
            workspace_id = %workspace_id,
            user_id = %target_user_id,
            removed_by = %requester_id,
            "Member removed"
        );

        Ok(())
    }

    /// Removes the requester's own membership. The owner cannot leave.
    pub async fn leave(&self, requester_id: Uuid, workspace_id: Uuid) -> Result<(), AppError> {
        self.find_workspace(workspace_id).await?;
        let membership = self.require_membership(workspace_id, requester_id).await?;
        WorkspacePolicy::require_leave(membership.role)?;

        self.store.remove_member(workspace_id, requester_id).await?;

        info!(workspace_id = %workspace_id, user_id = %requester_id, "Member left workspace");

        Ok(())
    }

    async fn find_workspace(&self, workspace_id: Uuid) -> Result<Workspace, AppError> {
        self.store
            .find_workspace(workspace_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workspace not found"))
    }

    async fn require_membership(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
    ) -> Result<WorkspaceMember, AppError> {
        self.store
            .find_membership(workspace_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("You are not a member of this workspace"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use filevault_core::error::ErrorKind;
    use filevault_core::result::AppResult;
    use filevault_entity::user::User;

    use super::*;

    /// In-memory store backing the membership scenarios below.
    #[derive(Default)]
    struct FakeStore {
        users: Mutex<Vec<User>>,
        workspaces: Mutex<Vec<Workspace>>,
        members: Mutex<Vec<WorkspaceMember>>,
    }

    impl FakeStore {
        fn add_user(&self, username: &str, email: &str) -> Uuid {
            let id = Uuid::new_v4();
            self.users.lock().unwrap().push(User {
                id,
                username: username.to_string(),
                email: email.to_string(),
                password_hash: String::new(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            });
            id
        }

        fn role_of(&self, workspace_id: Uuid, user_id: Uuid) -> Option<WorkspaceRole> {
            self.members
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.workspace_id == workspace_id && m.user_id == user_id)
                .map(|m| m.role)
        }
    }

    #[async_trait]
    impl UserDirectory for FakeStore {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .cloned())
        }
    }

    #[async_trait]
    impl WorkspaceStore for FakeStore {
        async fn create_with_owner(
            &self,
            name: &str,
            description: &str,
            owner_id: Uuid,
        ) -> AppResult<Workspace> {
            let now = Utc::now();
            let workspace = Workspace {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: description.to_string(),
                owner_id,
                created_at: now,
                updated_at: now,
            };
            self.workspaces.lock().unwrap().push(workspace.clone());
            self.members.lock().unwrap().push(WorkspaceMember {
                id: Uuid::new_v4(),
                workspace_id: workspace.id,
                user_id: owner_id,
                role: WorkspaceRole::Owner,
                joined_at: now,
            });
            Ok(workspace)
        }

        async fn find_workspace(&self, id: Uuid) -> AppResult<Option<Workspace>> {
            Ok(self
                .workspaces
                .lock()
                .unwrap()
                .iter()
                .find(|w| w.id == id)
                .cloned())
        }

        async fn find_membership(
            &self,
            workspace_id: Uuid,
            user_id: Uuid,
        ) -> AppResult<Option<WorkspaceMember>> {
            Ok(self
                .members
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.workspace_id == workspace_id && m.user_id == user_id)
                .cloned())
        }

        async fn list_for_user(
            &self,
            user_id: Uuid,
            search: Option<&str>,
        ) -> AppResult<Vec<MembershipWithWorkspace>> {
            let workspaces = self.workspaces.lock().unwrap();
            let users = self.users.lock().unwrap();
            Ok(self
                .members
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.user_id == user_id)
                .filter_map(|m| {
                    let w = workspaces.iter().find(|w| w.id == m.workspace_id)?;
                    if let Some(s) = search {
                        if !w.name.to_lowercase().contains(&s.to_lowercase()) {
                            return None;
                        }
                    }
                    let owner = users.iter().find(|u| u.id == w.owner_id)?;
                    Some(MembershipWithWorkspace {
                        workspace_id: w.id,
                        name: w.name.clone(),
                        description: w.description.clone(),
                        owner_id: w.owner_id,
                        owner_name: owner.username.clone(),
                        role: m.role,
                        created_at: w.created_at,
                    })
                })
                .collect())
        }

        async fn list_members(&self, workspace_id: Uuid) -> AppResult<Vec<MemberWithUser>> {
            let users = self.users.lock().unwrap();
            let mut members: Vec<MemberWithUser> = self
                .members
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.workspace_id == workspace_id)
                .filter_map(|m| {
                    let u = users.iter().find(|u| u.id == m.user_id)?;
                    Some(MemberWithUser {
                        user_id: m.user_id,
                        username: u.username.clone(),
                        email: u.email.clone(),
                        role: m.role,
                        joined_at: m.joined_at,
                    })
                })
                .collect();
            members.sort_by_key(|m| m.joined_at);
            Ok(members)
        }

        async fn update_workspace(
            &self,
            id: Uuid,
            name: &str,
            description: &str,
        ) -> AppResult<Workspace> {
            let mut workspaces = self.workspaces.lock().unwrap();
            let workspace = workspaces
                .iter_mut()
                .find(|w| w.id == id)
                .ok_or_else(|| AppError::not_found("Workspace not found"))?;
            workspace.name = name.to_string();
            workspace.description = description.to_string();
            workspace.updated_at = Utc::now();
            Ok(workspace.clone())
        }

        async fn delete_workspace(&self, id: Uuid) -> AppResult<bool> {
            self.members.lock().unwrap().retain(|m| m.workspace_id != id);
            let mut workspaces = self.workspaces.lock().unwrap();
            let before = workspaces.len();
            workspaces.retain(|w| w.id != id);
            Ok(workspaces.len() < before)
        }

        async fn add_member(
            &self,
            workspace_id: Uuid,
            user_id: Uuid,
            role: WorkspaceRole,
        ) -> AppResult<WorkspaceMember> {
            let mut members = self.members.lock().unwrap();
            if members
                .iter()
                .any(|m| m.workspace_id == workspace_id && m.user_id == user_id)
            {
                return Err(AppError::conflict(
                    "User is already a member of this workspace",
                ));
            }
            let member = WorkspaceMember {
                id: Uuid::new_v4(),
                workspace_id,
                user_id,
                role,
                joined_at: Utc::now(),
            };
            members.push(member.clone());
            Ok(member)
        }

        async fn update_member_role(
            &self,
            workspace_id: Uuid,
            user_id: Uuid,
            role: WorkspaceRole,
        ) -> AppResult<()> {
            let mut members = self.members.lock().unwrap();
            let member = members
                .iter_mut()
                .find(|m| m.workspace_id == workspace_id && m.user_id == user_id)
                .ok_or_else(|| AppError::not_found("Member not found"))?;
            member.role = role;
            Ok(())
        }

        async fn remove_member(&self, workspace_id: Uuid, user_id: Uuid) -> AppResult<bool> {
            let mut members = self.members.lock().unwrap();
            let before = members.len();
            members.retain(|m| !(m.workspace_id == workspace_id && m.user_id == user_id));
            Ok(members.len() < before)
        }
    }

    fn service() -> (Arc<FakeStore>, WorkspaceService) {
        let store = Arc::new(FakeStore::default());
        let service = WorkspaceService::new(store.clone(), store.clone());
        (store, service)
    }

    fn create_request(name: &str) -> CreateWorkspaceRequest {
        CreateWorkspaceRequest {
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_grants_owner_membership() {
        let (store, service) = service();
        let alice = store.add_user("alice", "alice@example.com");

        let workspace = service.create(alice, create_request("Team1")).await.unwrap();

        assert_eq!(workspace.owner_id, alice);
        assert_eq!(store.role_of(workspace.id, alice), Some(WorkspaceRole::Owner));

        let detail = service.detail(alice, workspace.id).await.unwrap();
        assert_eq!(detail.role, WorkspaceRole::Owner);
        assert_eq!(detail.members.len(), 1);
        assert_eq!(detail.members[0].user_id, alice);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let (store, service) = service();
        let alice = store.add_user("alice", "alice@example.com");

        let err = service.create(alice, create_request("   ")).await.err().unwrap();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_membership_lifecycle_scenario() {
        let (store, service) = service();
        let alice = store.add_user("alice", "alice@example.com");
        let bob = store.add_user("bob", "bob@example.com");
        let carol = store.add_user("carol", "carol@example.com");

        let workspace = service.create(alice, create_request("Team1")).await.unwrap();
        let ws = workspace.id;

        // A adds B; new members always start as viewer.
        service
            .add_member(
                alice,
                ws,
                AddMemberRequest {
                    email: "bob@example.com".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(store.role_of(ws, bob), Some(WorkspaceRole::Viewer));

        // A promotes B to admin.
        service
            .update_member_role(
                alice,
                ws,
                bob,
                UpdateMemberRoleRequest {
                    role: WorkspaceRole::Admin,
                },
            )
            .await
            .unwrap();
        assert_eq!(store.role_of(ws, bob), Some(WorkspaceRole::Admin));

        // B cannot remove A: the owner is removal-proof.
        let err = service.remove_member(bob, ws, alice).await.err().unwrap();
        assert_eq!(err.kind, ErrorKind::Authorization);

        // B, now an admin, can add C.
        service
            .add_member(
                bob,
                ws,
                AddMemberRequest {
                    email: "carol@example.com".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(store.role_of(ws, carol), Some(WorkspaceRole::Viewer));

        // A removes B.
        service.remove_member(alice, ws, bob).await.unwrap();
        assert_eq!(store.role_of(ws, bob), None);

        // A cannot remove A; the error points at leave.
        let err = service.remove_member(alice, ws, alice).await.err().unwrap();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("leave"));
    }

    #[tokio::test]
    async fn test_owner_role_is_immutable() {
        let (store, service) = service();
        let alice = store.add_user("alice", "alice@example.com");
        let workspace = service.create(alice, create_request("Team1")).await.unwrap();

        let err = service
            .update_member_role(
                alice,
                workspace.id,
                alice,
                UpdateMemberRoleRequest {
                    role: WorkspaceRole::Viewer,
                },
            )
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(store.role_of(workspace.id, alice), Some(WorkspaceRole::Owner));
    }

    #[tokio::test]
    async fn test_member_cannot_be_promoted_to_owner() {
        let (store, service) = service();
        let alice = store.add_user("alice", "alice@example.com");
        let bob = store.add_user("bob", "bob@example.com");
        let workspace = service.create(alice, create_request("Team1")).await.unwrap();
        service
            .add_member(
                alice,
                workspace.id,
                AddMemberRequest {
                    email: "bob@example.com".to_string(),
                },
            )
            .await
            .unwrap();

        let err = service
            .update_member_role(
                alice,
                workspace.id,
                bob,
                UpdateMemberRoleRequest {
                    role: WorkspaceRole::Owner,
                },
            )
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(store.role_of(workspace.id, bob), Some(WorkspaceRole::Viewer));

        // Exactly one owner membership, and it belongs to owner_id.
        let detail = service.detail(alice, workspace.id).await.unwrap();
        let owners: Vec<_> = detail
            .members
            .iter()
            .filter(|m| m.role.is_owner())
            .collect();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].user_id, detail.workspace.owner_id);
    }

    #[tokio::test]
    async fn test_non_member_cannot_update() {
        let (store, service) = service();
        let alice = store.add_user("alice", "alice@example.com");
        let mallory = store.add_user("mallory", "mallory@example.com");
        let workspace = service.create(alice, create_request("Team1")).await.unwrap();

        let err = service
            .update(
                mallory,
                workspace.id,
                UpdateWorkspaceRequest {
                    name: Some("Hijacked".to_string()),
                    description: None,
                },
            )
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let detail = service.detail(alice, workspace.id).await.unwrap();
        assert_eq!(detail.workspace.name, "Team1");
    }

    #[tokio::test]
    async fn test_viewer_cannot_manage_members() {
        let (store, service) = service();
        let alice = store.add_user("alice", "alice@example.com");
        let bob = store.add_user("bob", "bob@example.com");
        let carol = store.add_user("carol", "carol@example.com");
        let workspace = service.create(alice, create_request("Team1")).await.unwrap();

        service
            .add_member(
                alice,
                workspace.id,
                AddMemberRequest {
                    email: "bob@example.com".to_string(),
                },
            )
            .await
            .unwrap();

        let err = service
            .add_member(
                bob,
                workspace.id,
                AddMemberRequest {
                    email: "carol@example.com".to_string(),
                },
            )
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(store.role_of(workspace.id, carol), None);
    }

    #[tokio::test]
    async fn test_add_member_twice_is_conflict() {
        let (store, service) = service();
        let alice = store.add_user("alice", "alice@example.com");
        let bob = store.add_user("bob", "bob@example.com");
        let workspace = service.create(alice, create_request("Team1")).await.unwrap();

        let req = AddMemberRequest {
            email: "bob@example.com".to_string(),
        };
        service.add_member(alice, workspace.id, req.clone()).await.unwrap();
        let err = service.add_member(alice, workspace.id, req).await.err().unwrap();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(store.role_of(workspace.id, bob), Some(WorkspaceRole::Viewer));
    }

    #[tokio::test]
    async fn test_detail_is_idempotent() {
        let (store, service) = service();
        let alice = store.add_user("alice", "alice@example.com");
        let bob = store.add_user("bob", "bob@example.com");
        let workspace = service.create(alice, create_request("Team1")).await.unwrap();
        service
            .add_member(
                alice,
                workspace.id,
                AddMemberRequest {
                    email: "bob@example.com".to_string(),
                },
            )
            .await
            .unwrap();

        let first = service.detail(alice, workspace.id).await.unwrap();
        let second = service.detail(alice, workspace.id).await.unwrap();

        let ids = |d: &WorkspaceDetail| {
            d.members
                .iter()
                .map(|m| (m.user_id, m.role))
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
        assert!(first.members.iter().any(|m| m.user_id == bob));
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let (store, service) = service();
        let alice = store.add_user("alice", "alice@example.com");
        let workspace = service
            .create(
                alice,
                CreateWorkspaceRequest {
                    name: "Team1".to_string(),
                    description: Some("First team".to_string()),
                },
            )
            .await
            .unwrap();

        // Name only: description survives.
        let updated = service
            .update(
                alice,
                workspace.id,
                UpdateWorkspaceRequest {
                    name: Some("Team One".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Team One");
        assert_eq!(updated.description, "First team");

        // Description may be cleared with an explicit empty string.
        let updated = service
            .update(
                alice,
                workspace.id,
                UpdateWorkspaceRequest {
                    name: None,
                    description: Some(String::new()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Team One");
        assert_eq!(updated.description, "");

        // A blank name is rejected outright.
        let err = service
            .update(
                alice,
                workspace.id,
                UpdateWorkspaceRequest {
                    name: Some("  ".to_string()),
                    description: None,
                },
            )
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_delete_is_owner_exclusive() {
        let (store, service) = service();
        let alice = store.add_user("alice", "alice@example.com");
        let bob = store.add_user("bob", "bob@example.com");
        let workspace = service.create(alice, create_request("Team1")).await.unwrap();
        service
            .add_member(
                alice,
                workspace.id,
                AddMemberRequest {
                    email: "bob@example.com".to_string(),
                },
            )
            .await
            .unwrap();
        service
            .update_member_role(
                alice,
                workspace.id,
                bob,
                UpdateMemberRoleRequest {
                    role: WorkspaceRole::Admin,
                },
            )
            .await
            .unwrap();

        // Even an admin cannot delete.
        let err = service.delete(bob, workspace.id).await.err().unwrap();
        assert_eq!(err.kind, ErrorKind::Authorization);

        service.delete(alice, workspace.id).await.unwrap();
        let err = service.detail(alice, workspace.id).await.err().unwrap();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_leave_refused_for_owner_allowed_for_member() {
        let (store, service) = service();
        let alice = store.add_user("alice", "alice@example.com");
        let bob = store.add_user("bob", "bob@example.com");
        let workspace = service.create(alice, create_request("Team1")).await.unwrap();
        service
            .add_member(
                alice,
                workspace.id,
                AddMemberRequest {
                    email: "bob@example.com".to_string(),
                },
            )
            .await
            .unwrap();

        let err = service.leave(alice, workspace.id).await.err().unwrap();
        assert_eq!(err.kind, ErrorKind::Authorization);

        service.leave(bob, workspace.id).await.unwrap();
        assert_eq!(store.role_of(workspace.id, bob), None);
    }

    #[tokio::test]
    async fn test_list_filters_by_name() {
        let (store, service) = service();
        let alice = store.add_user("alice", "alice@example.com");
        service.create(alice, create_request("Design Team")).await.unwrap();
        service.create(alice, create_request("Backend")).await.unwrap();

        let all = service.list(alice, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let filtered = service.list(alice, Some("design")).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Design Team");
        assert_eq!(filtered[0].owner_name, "alice");
        assert_eq!(filtered[0].role, WorkspaceRole::Owner);
    }
}

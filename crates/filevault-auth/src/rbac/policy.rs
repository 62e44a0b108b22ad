//! Workspace authorization policy: pure decision logic, no I/O.
//!
//! Given a requester's already-resolved role (and, where relevant, a target
//! member's role), these functions decide allow/deny for workspace and
//! membership mutations. Denials are returned as typed [`AppError`] values
//! so callers can surface them directly; nothing here panics or touches
//! the database.
//!
//! The `can_*` variants return plain booleans; the `require_*` variants
//! wrap the same decision in an error carrying the user-facing message.

use uuid::Uuid;

use filevault_core::error::AppError;
use filevault_entity::workspace::{Workspace, WorkspaceRole};

/// Pure authorization decisions for workspace operations.
///
/// Role privilege is a partial order: Owner > Admin > {Editor, Viewer}.
/// Admins can manage other admins, editors, and viewers, but can never
/// touch the owner; the owner role itself is immutable and removal-proof.
#[derive(Debug, Clone, Copy)]
pub struct WorkspacePolicy;

impl WorkspacePolicy {
    /// Whether a member with `role` may update the workspace's name or
    /// description.
    pub fn can_update_workspace(role: WorkspaceRole) -> bool {
        matches!(role, WorkspaceRole::Owner | WorkspaceRole::Admin)
    }

    /// Require update permission, or fail with an authorization error.
    pub fn require_update_workspace(role: WorkspaceRole) -> Result<(), AppError> {
        if Self::can_update_workspace(role) {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Only the owner or an admin can update a workspace",
            ))
        }
    }

    /// Whether `requester_id` may delete the workspace.
    ///
    /// Deletion is owner-exclusive, stricter than update: an admin may
    /// rename a workspace but never destroy it.
    pub fn can_delete_workspace(requester_id: Uuid, workspace: &Workspace) -> bool {
        requester_id == workspace.owner_id
    }

    /// Require delete permission, or fail with an authorization error.
    pub fn require_delete_workspace(
        requester_id: Uuid,
        workspace: &Workspace,
    ) -> Result<(), AppError> {
        if Self::can_delete_workspace(requester_id, workspace) {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Only the owner can delete a workspace",
            ))
        }
    }

    /// Whether a member with `role` may add members, change member roles,
    /// or remove members.
    pub fn can_manage_members(role: WorkspaceRole) -> bool {
        matches!(role, WorkspaceRole::Owner | WorkspaceRole::Admin)
    }

    /// Require member-management permission, or fail with an authorization
    /// error.
    pub fn require_manage_members(role: WorkspaceRole) -> Result<(), AppError> {
        if Self::can_manage_members(role) {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Only the owner or an admin can manage members",
            ))
        }
    }

    /// Whether a member whose current role is `target_role` may have their
    /// role changed. The owner role is immutable via this path; ownership
    /// transfer is unsupported.
    pub fn can_change_role_of(target_role: WorkspaceRole) -> bool {
        !target_role.is_owner()
    }

    /// Require that the target member's role is changeable.
    pub fn require_change_role_of(target_role: WorkspaceRole) -> Result<(), AppError> {
        if Self::can_change_role_of(target_role) {
            Ok(())
        } else {
            Err(AppError::authorization(
                "The role of the workspace owner cannot be changed",
            ))
        }
    }

    /// Whether `new_role` may be granted to a member. The owner role can
    /// never be granted: a workspace has exactly one owner, fixed at
    /// creation, and ownership transfer is unsupported.
    pub fn can_assign_role(new_role: WorkspaceRole) -> bool {
        !new_role.is_owner()
    }

    /// Require that the requested role is grantable.
    pub fn require_assign_role(new_role: WorkspaceRole) -> Result<(), AppError> {
        if Self::can_assign_role(new_role) {
            Ok(())
        } else {
            Err(AppError::validation(
                "The owner role cannot be granted; ownership transfer is not supported",
            ))
        }
    }

    /// Whether `requester_id` (with `requester_role`) may remove the member
    /// `target_user_id` whose current role is `target_role`.
    ///
    /// Self-removal is refused regardless of role; leaving a workspace is a
    /// separate operation with its own rules.
    pub fn can_remove_member(
        requester_id: Uuid,
        requester_role: WorkspaceRole,
        target_user_id: Uuid,
        target_role: WorkspaceRole,
    ) -> bool {
        requester_id != target_user_id
            && !target_role.is_owner()
            && Self::can_manage_members(requester_role)
    }

    /// Require removal permission, distinguishing the three denial causes:
    /// self-removal (validation error pointing at "leave"), owner target
    /// (authorization error), and insufficient requester role
    /// (authorization error).
    pub fn require_remove_member(
        requester_id: Uuid,
        requester_role: WorkspaceRole,
        target_user_id: Uuid,
        target_role: WorkspaceRole,
    ) -> Result<(), AppError> {
        Self::require_manage_members(requester_role)?;
        if requester_id == target_user_id {
            return Err(AppError::validation(
                "You cannot remove yourself from a workspace; leave it instead",
            ));
        }
        if target_role.is_owner() {
            return Err(AppError::authorization(
                "The workspace owner cannot be removed",
            ));
        }
        Ok(())
    }

    /// Whether a member with `role` may leave the workspace voluntarily.
    /// The owner cannot leave; a workspace must always have its owner.
    pub fn can_leave(role: WorkspaceRole) -> bool {
        !role.is_owner()
    }

    /// Require leave permission, or fail with an authorization error.
    pub fn require_leave(role: WorkspaceRole) -> Result<(), AppError> {
        if Self::can_leave(role) {
            Ok(())
        } else {
            Err(AppError::authorization(
                "The owner cannot leave their own workspace",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use filevault_core::error::ErrorKind;

    const ALL_ROLES: [WorkspaceRole; 4] = [
        WorkspaceRole::Owner,
        WorkspaceRole::Admin,
        WorkspaceRole::Editor,
        WorkspaceRole::Viewer,
    ];

    fn workspace_owned_by(owner_id: Uuid) -> Workspace {
        Workspace {
            id: Uuid::new_v4(),
            name: "team".to_string(),
            description: String::new(),
            owner_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_update_workspace_requires_owner_or_admin() {
        assert!(WorkspacePolicy::can_update_workspace(WorkspaceRole::Owner));
        assert!(WorkspacePolicy::can_update_workspace(WorkspaceRole::Admin));
        assert!(!WorkspacePolicy::can_update_workspace(WorkspaceRole::Editor));
        assert!(!WorkspacePolicy::can_update_workspace(WorkspaceRole::Viewer));
    }

    #[test]
    fn test_manage_members_matrix() {
        for role in ALL_ROLES {
            let expected = matches!(role, WorkspaceRole::Owner | WorkspaceRole::Admin);
            assert_eq!(WorkspacePolicy::can_manage_members(role), expected);
        }
    }

    #[test]
    fn test_delete_is_owner_exclusive() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let ws = workspace_owned_by(owner);

        assert!(WorkspacePolicy::can_delete_workspace(owner, &ws));
        // Even an admin may update but never delete.
        assert!(!WorkspacePolicy::can_delete_workspace(other, &ws));
    }

    #[test]
    fn test_owner_role_is_immutable() {
        assert!(!WorkspacePolicy::can_change_role_of(WorkspaceRole::Owner));
        assert!(WorkspacePolicy::can_change_role_of(WorkspaceRole::Admin));
        assert!(WorkspacePolicy::can_change_role_of(WorkspaceRole::Editor));
        assert!(WorkspacePolicy::can_change_role_of(WorkspaceRole::Viewer));
    }

    #[test]
    fn test_owner_role_cannot_be_granted() {
        assert!(!WorkspacePolicy::can_assign_role(WorkspaceRole::Owner));
        assert!(WorkspacePolicy::can_assign_role(WorkspaceRole::Admin));
        assert!(WorkspacePolicy::can_assign_role(WorkspaceRole::Editor));
        assert!(WorkspacePolicy::can_assign_role(WorkspaceRole::Viewer));

        let err = WorkspacePolicy::require_assign_role(WorkspaceRole::Owner)
            .err()
            .unwrap();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_self_removal_always_denied() {
        let user = Uuid::new_v4();
        for role in ALL_ROLES {
            assert!(!WorkspacePolicy::can_remove_member(
                user,
                role,
                user,
                WorkspaceRole::Viewer
            ));
        }
    }

    #[test]
    fn test_self_removal_error_points_at_leave() {
        let user = Uuid::new_v4();
        let err = WorkspacePolicy::require_remove_member(
            user,
            WorkspaceRole::Owner,
            user,
            WorkspaceRole::Owner,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("leave"));
    }

    #[test]
    fn test_owner_target_always_protected() {
        let requester = Uuid::new_v4();
        let target = Uuid::new_v4();
        // Even the owner of another workspace acting as admin here, and even
        // a requester holding the owner role, cannot remove the owner target.
        for role in ALL_ROLES {
            assert!(!WorkspacePolicy::can_remove_member(
                requester,
                role,
                target,
                WorkspaceRole::Owner
            ));
        }
        let err = WorkspacePolicy::require_remove_member(
            requester,
            WorkspaceRole::Owner,
            target,
            WorkspaceRole::Owner,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[test]
    fn test_admin_can_remove_other_admin() {
        let requester = Uuid::new_v4();
        let target = Uuid::new_v4();
        assert!(WorkspacePolicy::can_remove_member(
            requester,
            WorkspaceRole::Admin,
            target,
            WorkspaceRole::Admin
        ));
        assert!(WorkspacePolicy::can_remove_member(
            requester,
            WorkspaceRole::Admin,
            target,
            WorkspaceRole::Editor
        ));
    }

    #[test]
    fn test_editor_and_viewer_cannot_remove_anyone() {
        let requester = Uuid::new_v4();
        let target = Uuid::new_v4();
        for role in [WorkspaceRole::Editor, WorkspaceRole::Viewer] {
            assert!(!WorkspacePolicy::can_remove_member(
                requester,
                role,
                target,
                WorkspaceRole::Viewer
            ));
            let err = WorkspacePolicy::require_remove_member(
                requester,
                role,
                target,
                WorkspaceRole::Viewer,
            )
            .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authorization);
        }
    }

    #[test]
    fn test_only_non_owners_can_leave() {
        assert!(!WorkspacePolicy::can_leave(WorkspaceRole::Owner));
        assert!(WorkspacePolicy::can_leave(WorkspaceRole::Admin));
        assert!(WorkspacePolicy::can_leave(WorkspaceRole::Editor));
        assert!(WorkspacePolicy::can_leave(WorkspaceRole::Viewer));
    }
}

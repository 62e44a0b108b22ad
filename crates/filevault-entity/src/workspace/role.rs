//! Workspace role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user can hold inside a workspace.
///
/// Privilege is a partial order: Owner > Admin > {Editor, Viewer}.
/// Editor and Viewer are incomparable to each other; the role decides what
/// a member may do with content, not with other members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "workspace_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceRole {
    /// The single user a workspace belongs to. Immutable and removal-proof.
    Owner,
    /// Can update the workspace and manage non-owner members.
    Admin,
    /// Can add and modify workspace content.
    Editor,
    /// Read-only access. Default role for newly added members.
    Viewer,
}

impl WorkspaceRole {
    /// Check if this role is the owner role.
    pub fn is_owner(&self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for WorkspaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkspaceRole {
    type Err = filevault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            _ => Err(filevault_core::AppError::validation(format!(
                "Invalid workspace role: '{s}'. Expected one of: owner, admin, editor, viewer"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("owner".parse::<WorkspaceRole>().unwrap(), WorkspaceRole::Owner);
        assert_eq!("ADMIN".parse::<WorkspaceRole>().unwrap(), WorkspaceRole::Admin);
        assert_eq!("viewer".parse::<WorkspaceRole>().unwrap(), WorkspaceRole::Viewer);
        assert!("superuser".parse::<WorkspaceRole>().is_err());
        assert!("".parse::<WorkspaceRole>().is_err());
    }

    #[test]
    fn test_round_trip() {
        for role in [
            WorkspaceRole::Owner,
            WorkspaceRole::Admin,
            WorkspaceRole::Editor,
            WorkspaceRole::Viewer,
        ] {
            assert_eq!(role.as_str().parse::<WorkspaceRole>().unwrap(), role);
        }
    }
}

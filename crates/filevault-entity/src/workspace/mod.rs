//! Workspace and membership entities.

pub mod model;
pub mod role;

pub use model::{MemberWithUser, MembershipWithWorkspace, Workspace, WorkspaceMember};
pub use role::WorkspaceRole;

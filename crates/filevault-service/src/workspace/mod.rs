//! Workspace lifecycle management: creation, membership, and roles.

pub mod service;
pub mod store;

pub use service::{
    AddMemberRequest, CreateWorkspaceRequest, UpdateMemberRoleRequest, UpdateWorkspaceRequest,
    WorkspaceDetail, WorkspaceService,
};
pub use store::{UserDirectory, WorkspaceStore};

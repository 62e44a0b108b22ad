//! Workspace role-based authorization.

pub mod policy;

pub use policy::WorkspacePolicy;

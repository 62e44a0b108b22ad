//! # filevault-service
//!
//! Business logic service layer for FileVault. Each service orchestrates
//! repositories, the storage provider, and authentication to implement
//! application-level use cases.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references. Every operation takes the
//! requester's user id as an explicit parameter; there is no ambient
//! request identity.

pub mod auth;
pub mod category;
pub mod file;
pub mod user;
pub mod workspace;

pub use auth::AuthService;
pub use category::{CategoryService, CategoryStore};
pub use file::FileService;
pub use user::UserService;
pub use workspace::{UserDirectory, WorkspaceService, WorkspaceStore};

//! Application state shared across all handlers.

use std::sync::Arc;

use filevault_auth::JwtDecoder;
use filevault_core::config::AppConfig;
use filevault_database::DatabasePool;
use filevault_service::{AuthService, CategoryService, FileService, UserService, WorkspaceService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db: DatabasePool,
    /// JWT token decoder, used by the auth extractor.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Registration, login, and refresh.
    pub auth_service: Arc<AuthService>,
    /// Profile self-service.
    pub user_service: Arc<UserService>,
    /// Workspace lifecycle and membership.
    pub workspace_service: Arc<WorkspaceService>,
    /// Per-user categories.
    pub category_service: Arc<CategoryService>,
    /// File content and metadata.
    pub file_service: Arc<FileService>,
}

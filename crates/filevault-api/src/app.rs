//! Application builder: wires repositories, services, and router into a
//! running Axum server.

use std::sync::Arc;

use filevault_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use filevault_core::config::AppConfig;
use filevault_core::error::AppError;
use filevault_core::traits::storage::StorageProvider;
use filevault_database::DatabasePool;
use filevault_database::repositories::{
    CategoryRepository, FileRepository, UserRepository, WorkspaceRepository,
};
use filevault_service::category::CategoryStore;
use filevault_service::workspace::{UserDirectory, WorkspaceStore};
use filevault_service::{AuthService, CategoryService, FileService, UserService, WorkspaceService};
use filevault_storage::LocalStorageProvider;

use crate::router::build_router;
use crate::state::AppState;

/// Runs the FileVault server with the given configuration and database
/// pool. Blocks until shutdown.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting FileVault server...");

    let storage = Arc::new(LocalStorageProvider::new(&config.storage.upload_root).await?);

    let pool = db.pool().clone();
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let workspace_repo = Arc::new(WorkspaceRepository::new(pool.clone()));
    let category_repo = Arc::new(CategoryRepository::new(pool.clone()));
    let file_repo = Arc::new(FileRepository::new(pool));

    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
    ));
    let user_service = Arc::new(UserService::new(Arc::clone(&user_repo)));
    let workspace_service = Arc::new(WorkspaceService::new(
        Arc::clone(&workspace_repo) as Arc<dyn WorkspaceStore>,
        Arc::clone(&user_repo) as Arc<dyn UserDirectory>,
    ));
    let category_service = Arc::new(CategoryService::new(
        Arc::clone(&category_repo) as Arc<dyn CategoryStore>
    ));
    let file_service = Arc::new(FileService::new(
        Arc::clone(&file_repo),
        Arc::clone(&category_repo),
        Arc::clone(&workspace_repo),
        Arc::clone(&storage) as Arc<dyn StorageProvider>,
    ));

    let state = AppState {
        config: Arc::new(config.clone()),
        db,
        jwt_decoder,
        auth_service,
        user_service,
        workspace_service,
        category_service,
        file_service,
    };

    let app = build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("FileVault server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("FileVault server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
    }
}

//! Route definitions for the FileVault HTTP API.
//!
//! All routes are organized by domain and mounted under `/api/v1`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use filevault_core::config::app::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(workspace_routes())
        .merge(category_routes())
        .merge(file_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(max_upload)),
        )
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, me.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// User self-service endpoints.
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/me", put(handlers::user::update_profile))
}

/// Workspace lifecycle and membership endpoints.
fn workspace_routes() -> Router<AppState> {
    Router::new()
        .route("/workspaces", post(handlers::workspace::create_workspace))
        .route("/workspaces", get(handlers::workspace::list_workspaces))
        .route("/workspaces/{id}", get(handlers::workspace::get_workspace))
        .route(
            "/workspaces/{id}",
            put(handlers::workspace::update_workspace),
        )
        .route(
            "/workspaces/{id}",
            delete(handlers::workspace::delete_workspace),
        )
        .route(
            "/workspaces/{id}/members",
            post(handlers::workspace::add_member),
        )
        .route(
            "/workspaces/{id}/members/{user_id}",
            put(handlers::workspace::update_member_role),
        )
        .route(
            "/workspaces/{id}/members/{user_id}",
            delete(handlers::workspace::remove_member),
        )
        .route(
            "/workspaces/{id}/leave",
            post(handlers::workspace::leave_workspace),
        )
        .route(
            "/workspaces/{id}/files",
            get(handlers::workspace::list_workspace_files),
        )
}

/// Category CRUD endpoints.
fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(handlers::category::list_categories))
        .route("/categories", post(handlers::category::create_category))
        .route("/categories/{id}", get(handlers::category::get_category))
        .route("/categories/{id}", put(handlers::category::update_category))
        .route(
            "/categories/{id}",
            delete(handlers::category::delete_category),
        )
}

/// File upload, download, and category assignment endpoints.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files/upload", post(handlers::file::upload_file))
        .route("/files", get(handlers::file::list_files))
        .route("/files/summary", get(handlers::file::storage_summary))
        .route("/files/{id}", get(handlers::file::get_file))
        .route("/files/{id}", delete(handlers::file::delete_file))
        .route("/files/{id}/download", get(handlers::file::download_file))
        .route(
            "/files/{id}/categories",
            get(handlers::file::list_file_categories),
        )
        .route(
            "/files/{id}/categories",
            post(handlers::file::assign_categories),
        )
        .route(
            "/files/{id}/categories",
            put(handlers::file::replace_categories),
        )
        .route(
            "/files/{id}/categories",
            delete(handlers::file::remove_categories),
        )
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let mut cors = CorsLayer::new();

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if config.allowed_headers.iter().any(|h| h == "*") {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<axum::http::HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

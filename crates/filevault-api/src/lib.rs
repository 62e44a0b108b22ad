//! # filevault-api
//!
//! HTTP API layer for FileVault built on Axum: route definitions,
//! request/response DTOs, the authenticated-user extractor, and the
//! mapping from domain errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::run_server;
pub use state::AppState;

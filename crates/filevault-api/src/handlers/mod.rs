//! HTTP request handlers, one module per domain.

pub mod auth;
pub mod category;
pub mod file;
pub mod health;
pub mod user;
pub mod workspace;

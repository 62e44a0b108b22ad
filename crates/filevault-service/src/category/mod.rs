//! Per-user category management.

pub mod service;
pub mod store;

pub use service::{CategoryService, CreateCategoryRequest, UpdateCategoryRequest};
pub use store::CategoryStore;

//! File upload, download, and category assignment.

pub mod service;

pub use service::{FileService, UploadRequest};

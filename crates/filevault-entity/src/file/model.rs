//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata for an uploaded file.
///
/// The bytes themselves live on disk under the storage provider's root;
/// `path` is the provider-relative location.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// Stored filename (uuid + original extension).
    pub filename: String,
    /// Provider-relative storage path.
    pub path: String,
    /// MIME type as reported at upload time.
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    /// The uploading user, who owns the file.
    pub user_id: Uuid,
    /// Workspace the file is shared into; `None` for personal files.
    pub workspace_id: Option<Uuid>,
    /// When the file was uploaded.
    pub uploaded_at: DateTime<Utc>,
}

/// Data required to persist a newly uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Stored filename.
    pub filename: String,
    /// Provider-relative storage path.
    pub path: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    /// The uploading user.
    pub user_id: Uuid,
    /// Optional workspace.
    pub workspace_id: Option<Uuid>,
}

/// Aggregate storage usage for one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StorageSummary {
    /// Number of files the user owns.
    pub file_count: i64,
    /// Total size of those files in bytes.
    pub total_size: i64,
}

//! Category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Default hex color assigned when a category is created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#3B82F6";

/// A per-user label for organizing files.
///
/// Category names are unique per user. Only the owning user may mutate a
/// category, and a category still attached to files cannot be deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique category identifier.
    pub id: Uuid,
    /// Category name (unique per user).
    pub name: String,
    /// Hex display color.
    pub color: String,
    /// The owning user.
    pub user_id: Uuid,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

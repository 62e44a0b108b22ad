//! Category repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use filevault_core::error::{AppError, ErrorKind};
use filevault_core::result::AppResult;
use filevault_entity::category::Category;

/// Repository for per-user file categories.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a user's categories, optionally filtered by a case-insensitive
    /// substring match on the name.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> AppResult<Vec<Category>> {
        let pattern = search.map(|s| format!("%{}%", super::escape_like(s)));

        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories \
             WHERE user_id = $1 AND ($2::text IS NULL OR name ILIKE $2) \
             ORDER BY name ASC",
        )
        .bind(user_id)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))
    }

    /// Find a category by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    /// Find a category by primary key, scoped to its owning user.
    pub async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    /// Check whether the user already has a category with this name,
    /// excluding the given id (used by rename).
    pub async fn name_exists(
        &self,
        user_id: Uuid,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM categories \
             WHERE user_id = $1 AND LOWER(name) = LOWER($2) \
               AND ($3::uuid IS NULL OR id <> $3)",
        )
        .bind(user_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check category name", e)
        })?;

        Ok(count > 0)
    }

    /// Create a new category.
    pub async fn create(&self, user_id: Uuid, name: &str, color: &str) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, color, user_id) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(name)
        .bind(color)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("categories_user_id_name_key") =>
            {
                AppError::conflict(format!("Category '{name}' already exists"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create category", e),
        })
    }

    /// Update a category's name and color.
    pub async fn update(&self, id: Uuid, name: &str, color: &str) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, color = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(color)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update category", e))?
        .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))
    }

    /// Delete a category by primary key.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete category", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Count the files still associated with a category.
    pub async fn file_count(&self, category_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM file_categories WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count category files", e)
            })
    }
}

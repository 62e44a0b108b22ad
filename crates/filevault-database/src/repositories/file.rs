//! File metadata repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use filevault_core::error::{AppError, ErrorKind};
use filevault_core::result::AppResult;
use filevault_entity::category::Category;
use filevault_entity::file::{CreateFile, File, StorageSummary};

/// Repository for file metadata rows and their category associations.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist metadata for a newly uploaded file.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (filename, path, mime_type, size, user_id, workspace_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.filename)
        .bind(&data.path)
        .bind(&data.mime_type)
        .bind(data.size)
        .bind(data.user_id)
        .bind(data.workspace_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    /// Find a file by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// List a user's files, optionally restricted to one category.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        category_id: Option<Uuid>,
    ) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT f.* FROM files f \
             WHERE f.user_id = $1 \
               AND ($2::uuid IS NULL OR EXISTS ( \
                    SELECT 1 FROM file_categories fc \
                    WHERE fc.file_id = f.id AND fc.category_id = $2)) \
             ORDER BY f.uploaded_at DESC",
        )
        .bind(user_id)
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// List all files shared into a workspace.
    pub async fn list_for_workspace(&self, workspace_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE workspace_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list workspace files", e)
        })
    }

    /// Delete a file's metadata row.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Associate categories with a file, skipping pairs that already exist.
    pub async fn assign_categories(&self, file_id: Uuid, category_ids: &[Uuid]) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO file_categories (file_id, category_id) \
             SELECT $1, unnest($2::uuid[]) \
             ON CONFLICT DO NOTHING",
        )
        .bind(file_id)
        .bind(category_ids)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to assign categories", e)
        })?;
        Ok(())
    }

    /// Remove specific category associations from a file.
    pub async fn remove_categories(&self, file_id: Uuid, category_ids: &[Uuid]) -> AppResult<()> {
        sqlx::query(
            "DELETE FROM file_categories \
             WHERE file_id = $1 AND category_id = ANY($2::uuid[])",
        )
        .bind(file_id)
        .bind(category_ids)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to remove categories", e)
        })?;
        Ok(())
    }

    /// Replace all of a file's category associations in one transaction, so
    /// an abandoned request can never leave the file half-categorized.
    pub async fn replace_categories(&self, file_id: Uuid, category_ids: &[Uuid]) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM file_categories WHERE file_id = $1")
            .bind(file_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear categories", e)
            })?;

        if !category_ids.is_empty() {
            sqlx::query(
                "INSERT INTO file_categories (file_id, category_id) \
                 SELECT $1, unnest($2::uuid[])",
            )
            .bind(file_id)
            .bind(category_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to assign categories", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit category replacement", e)
        })?;
        Ok(())
    }

    /// Fetch the categories associated with a file.
    pub async fn categories_for_file(&self, file_id: Uuid) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT c.* FROM categories c \
             JOIN file_categories fc ON fc.category_id = c.id \
             WHERE fc.file_id = $1 \
             ORDER BY c.name ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch file categories", e)
        })
    }

    /// Aggregate a user's storage usage.
    pub async fn storage_summary(&self, user_id: Uuid) -> AppResult<StorageSummary> {
        sqlx::query_as::<_, StorageSummary>(
            "SELECT COUNT(*) AS file_count, COALESCE(SUM(size), 0) AS total_size \
             FROM files WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute storage summary", e)
        })
    }
}

//! Persistence seam consumed by the category service.
//!
//! Mirrors the workspace service's store trait: the service depends on
//! this narrow interface so the in-use delete guard and the uniqueness
//! rules can be exercised against an in-memory store in tests. The
//! repository implementation simply delegates.

use async_trait::async_trait;
use uuid::Uuid;

use filevault_core::result::AppResult;
use filevault_database::repositories::CategoryRepository;
use filevault_entity::category::Category;

/// Category persistence, including the file-association count used by the
/// delete guard.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// List a user's categories, optionally filtered by name.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> AppResult<Vec<Category>>;

    /// Find a category by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>>;

    /// Whether the user already has a category with this name, excluding
    /// the given id.
    async fn name_exists(
        &self,
        user_id: Uuid,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> AppResult<bool>;

    /// Insert a category row.
    async fn create(&self, user_id: Uuid, name: &str, color: &str) -> AppResult<Category>;

    /// Persist new name and color.
    async fn update(&self, id: Uuid, name: &str, color: &str) -> AppResult<Category>;

    /// Delete a category row.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Count the files still associated with a category.
    async fn file_count(&self, category_id: Uuid) -> AppResult<i64>;
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn list_for_user(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> AppResult<Vec<Category>> {
        CategoryRepository::list_for_user(self, user_id, search).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        CategoryRepository::find_by_id(self, id).await
    }

    async fn name_exists(
        &self,
        user_id: Uuid,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> AppResult<bool> {
        CategoryRepository::name_exists(self, user_id, name, exclude_id).await
    }

    async fn create(&self, user_id: Uuid, name: &str, color: &str) -> AppResult<Category> {
        CategoryRepository::create(self, user_id, name, color).await
    }

    async fn update(&self, id: Uuid, name: &str, color: &str) -> AppResult<Category> {
        CategoryRepository::update(self, id, name, color).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        CategoryRepository::delete(self, id).await
    }

    async fn file_count(&self, category_id: Uuid) -> AppResult<i64> {
        CategoryRepository::file_count(self, category_id).await
    }
}

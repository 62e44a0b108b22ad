//! Category management: per-user labels attached to files.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use filevault_core::error::AppError;
use filevault_entity::category::{Category, DEFAULT_CATEGORY_COLOR};

use super::store::CategoryStore;

/// Manages a user's file categories.
#[derive(Clone)]
pub struct CategoryService {
    /// Category persistence.
    store: Arc<dyn CategoryStore>,
}

/// Data for creating a category.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateCategoryRequest {
    /// Category name, unique per user.
    pub name: String,
    /// Display color; falls back to the default when absent or empty.
    pub color: Option<String>,
}

/// Data for updating a category. `None` keeps the stored value.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateCategoryRequest {
    /// New name.
    pub name: Option<String>,
    /// New display color.
    pub color: Option<String>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    /// Lists the requester's categories, optionally filtered by name.
    pub async fn list(
        &self,
        requester_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Category>, AppError> {
        self.store.list_for_user(requester_id, search).await
    }

    /// Gets one of the requester's categories.
    pub async fn detail(&self, requester_id: Uuid, id: Uuid) -> Result<Category, AppError> {
        self.find_owned(requester_id, id).await
    }

    /// Creates a category. Names are unique per user.
    pub async fn create(
        &self,
        requester_id: Uuid,
        req: CreateCategoryRequest,
    ) -> Result<Category, AppError> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Category name cannot be empty"));
        }

        if self.store.name_exists(requester_id, name, None).await? {
            return Err(AppError::conflict(
                "A category with this name already exists",
            ));
        }

        let color = match req.color.as_deref() {
            Some(color) if !color.trim().is_empty() => color.trim(),
            _ => DEFAULT_CATEGORY_COLOR,
        };

        let category = self.store.create(requester_id, name, color).await?;

        info!(category_id = %category.id, user_id = %requester_id, "Category created");

        Ok(category)
    }

    /// Updates a category's name and/or color.
    pub async fn update(
        &self,
        requester_id: Uuid,
        id: Uuid,
        req: UpdateCategoryRequest,
    ) -> Result<Category, AppError> {
        let category = self.find_owned(requester_id, id).await?;

        let name = match req.name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(AppError::validation("Category name cannot be empty"));
                }
                if self
                    .store
                    .name_exists(requester_id, &name, Some(id))
                    .await?
                {
                    return Err(AppError::conflict(
                        "A category with this name already exists",
                    ));
                }
                name
            }
            None => category.name,
        };

        let color = match req.color {
            Some(color) if !color.trim().is_empty() => color.trim().to_string(),
            _ => category.color,
        };

        let updated = self.store.update(id, &name, &color).await?;

        info!(category_id = %id, user_id = %requester_id, "Category updated");

        Ok(updated)
    }

    /// Deletes a category. Fails while any file still references it.
    pub async fn delete(&self, requester_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.find_owned(requester_id, id).await?;

        let in_use = self.store.file_count(id).await?;
        if in_use > 0 {
            return Err(AppError::conflict(format!(
                "Category is still assigned to {in_use} file(s)"
            )));
        }

        self.store.delete(id).await?;

        info!(category_id = %id, user_id = %requester_id, "Category deleted");

        Ok(())
    }

    /// Loads a category and verifies the requester owns it. A category
    /// belonging to someone else is a distinct authorization failure, not
    /// a silent miss.
    async fn find_owned(&self, requester_id: Uuid, id: Uuid) -> Result<Category, AppError> {
        let category = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))?;

        if category.user_id != requester_id {
            return Err(AppError::authorization("You do not own this category"));
        }

        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use filevault_core::error::ErrorKind;
    use filevault_core::result::AppResult;

    use super::*;

    /// In-memory store. File associations are simulated as bare
    /// (file, category) id pairs, enough to drive the delete guard.
    #[derive(Default)]
    struct FakeStore {
        categories: Mutex<Vec<Category>>,
        file_links: Mutex<Vec<(Uuid, Uuid)>>,
    }

    impl FakeStore {
        fn attach_file(&self, category_id: Uuid) -> Uuid {
            let file_id = Uuid::new_v4();
            self.file_links.lock().unwrap().push((file_id, category_id));
            file_id
        }

        fn detach_file(&self, file_id: Uuid) {
            self.file_links.lock().unwrap().retain(|(f, _)| *f != file_id);
        }
    }

    #[async_trait]
    impl CategoryStore for FakeStore {
        async fn list_for_user(
            &self,
            user_id: Uuid,
            search: Option<&str>,
        ) -> AppResult<Vec<Category>> {
            Ok(self
                .categories
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.user_id == user_id)
                .filter(|c| match search {
                    Some(s) => c.name.to_lowercase().contains(&s.to_lowercase()),
                    None => true,
                })
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
            Ok(self
                .categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == id)
                .cloned())
        }

        async fn name_exists(
            &self,
            user_id: Uuid,
            name: &str,
            exclude_id: Option<Uuid>,
        ) -> AppResult<bool> {
            Ok(self.categories.lock().unwrap().iter().any(|c| {
                c.user_id == user_id
                    && c.name.eq_ignore_ascii_case(name)
                    && Some(c.id) != exclude_id
            }))
        }

        async fn create(&self, user_id: Uuid, name: &str, color: &str) -> AppResult<Category> {
            let category = Category {
                id: Uuid::new_v4(),
                name: name.to_string(),
                color: color.to_string(),
                user_id,
                created_at: Utc::now(),
            };
            self.categories.lock().unwrap().push(category.clone());
            Ok(category)
        }

        async fn update(&self, id: Uuid, name: &str, color: &str) -> AppResult<Category> {
            let mut categories = self.categories.lock().unwrap();
            let category = categories
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| AppError::not_found("Category not found"))?;
            category.name = name.to_string();
            category.color = color.to_string();
            Ok(category.clone())
        }

        async fn delete(&self, id: Uuid) -> AppResult<bool> {
            let mut categories = self.categories.lock().unwrap();
            let before = categories.len();
            categories.retain(|c| c.id != id);
            Ok(categories.len() < before)
        }

        async fn file_count(&self, category_id: Uuid) -> AppResult<i64> {
            Ok(self
                .file_links
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, c)| *c == category_id)
                .count() as i64)
        }
    }

    fn service() -> (Arc<FakeStore>, CategoryService) {
        let store = Arc::new(FakeStore::default());
        let service = CategoryService::new(store.clone());
        (store, service)
    }

    fn create_request(name: &str) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: name.to_string(),
            color: None,
        }
    }

    #[tokio::test]
    async fn test_delete_refused_while_in_use() {
        let (store, service) = service();
        let alice = Uuid::new_v4();
        let category = service.create(alice, create_request("Reports")).await.unwrap();
        let file = store.attach_file(category.id);

        let err = service.delete(alice, category.id).await.err().unwrap();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(err.message.contains("1 file"));
        // Still there.
        assert_eq!(service.detail(alice, category.id).await.unwrap().id, category.id);

        // After the last file is unlinked, deletion goes through.
        store.detach_file(file);
        service.delete(alice, category.id).await.unwrap();
        let err = service.detail(alice, category.id).await.err().unwrap();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let (_store, service) = service();
        let alice = Uuid::new_v4();
        service.create(alice, create_request("Reports")).await.unwrap();

        let err = service
            .create(alice, create_request("reports"))
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_default_color_applied_when_absent() {
        let (_store, service) = service();
        let alice = Uuid::new_v4();

        let category = service.create(alice, create_request("Reports")).await.unwrap();
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);

        let explicit = service
            .create(
                alice,
                CreateCategoryRequest {
                    name: "Invoices".to_string(),
                    color: Some("#FF0000".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(explicit.color, "#FF0000");
    }

    #[tokio::test]
    async fn test_mutation_requires_ownership() {
        let (_store, service) = service();
        let alice = Uuid::new_v4();
        let mallory = Uuid::new_v4();
        let category = service.create(alice, create_request("Reports")).await.unwrap();

        let err = service.delete(mallory, category.id).await.err().unwrap();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err = service
            .update(
                mallory,
                category.id,
                UpdateCategoryRequest {
                    name: Some("Hijacked".to_string()),
                    color: None,
                },
            )
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}

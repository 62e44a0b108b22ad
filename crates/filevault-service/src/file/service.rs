//! File operations: upload, listing, download, deletion, and category
//! assignment.
//!
//! Files are owned by their uploader. A file optionally carries a
//! workspace id, which shares it read-wise with the workspace's members;
//! mutation stays with the owner.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use filevault_core::error::AppError;
use filevault_core::traits::storage::{ByteStream, StorageProvider};
use filevault_database::repositories::{CategoryRepository, FileRepository, WorkspaceRepository};
use filevault_entity::category::Category;
use filevault_entity::file::{CreateFile, File, StorageSummary};

/// Manages file content and metadata.
#[derive(Clone)]
pub struct FileService {
    /// File metadata repository.
    file_repo: Arc<FileRepository>,
    /// Category repository, for ownership checks on assignment.
    category_repo: Arc<CategoryRepository>,
    /// Workspace repository, for membership checks on shared files.
    workspace_repo: Arc<WorkspaceRepository>,
    /// Content storage backend.
    storage: Arc<dyn StorageProvider>,
}

/// Data for an upload. The multipart parsing happens at the HTTP layer;
/// the service sees the decoded parts.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Original client filename; kept for display and download naming.
    pub filename: String,
    /// Declared content type.
    pub mime_type: String,
    /// File content.
    pub data: Bytes,
    /// Workspace to share the file into, if any.
    pub workspace_id: Option<Uuid>,
    /// Categories to assign immediately.
    pub category_ids: Vec<Uuid>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        category_repo: Arc<CategoryRepository>,
        workspace_repo: Arc<WorkspaceRepository>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        Self {
            file_repo,
            category_repo,
            workspace_repo,
            storage,
        }
    }

    /// Stores an uploaded file and its metadata row.
    ///
    /// The content is written under a random name (original extension
    /// preserved) so client filenames never reach the filesystem.
    pub async fn upload(&self, requester_id: Uuid, req: UploadRequest) -> Result<File, AppError> {
        let filename = req.filename.trim();
        if filename.is_empty() {
            return Err(AppError::validation("Filename cannot be empty"));
        }

        if let Some(workspace_id) = req.workspace_id {
            self.require_membership(workspace_id, requester_id).await?;
        }
        for category_id in &req.category_ids {
            self.require_owned_category(requester_id, *category_id).await?;
        }

        let stored_name = match Path::new(filename).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };
        let path = format!("{requester_id}/{stored_name}");

        let size = self.storage.write(&path, req.data).await?;

        let file = self
            .file_repo
            .create(&CreateFile {
                filename: filename.to_string(),
                path,
                mime_type: req.mime_type,
                size: size as i64,
                user_id: requester_id,
                workspace_id: req.workspace_id,
            })
            .await?;

        if !req.category_ids.is_empty() {
            self.file_repo
                .assign_categories(file.id, &req.category_ids)
                .await?;
        }

        info!(
            file_id = %file.id,
            user_id = %requester_id,
            size = file.size,
            "File uploaded"
        );

        Ok(file)
    }

    /// Lists the requester's own files, optionally restricted to one of
    /// their categories.
    pub async fn list(
        &self,
        requester_id: Uuid,
        category_id: Option<Uuid>,
    ) -> Result<Vec<File>, AppError> {
        if let Some(category_id) = category_id {
            self.require_owned_category(requester_id, category_id).await?;
        }
        self.file_repo.list_for_user(requester_id, category_id).await
    }

    /// Lists the files shared into a workspace. Members only.
    pub async fn list_for_workspace(
        &self,
        requester_id: Uuid,
        workspace_id: Uuid,
    ) -> Result<Vec<File>, AppError> {
        self.require_membership(workspace_id, requester_id).await?;
        self.file_repo.list_for_workspace(workspace_id).await
    }

    /// Gets a file's metadata. Readable by the owner and, for workspace
    /// files, by any member of that workspace.
    pub async fn get(&self, requester_id: Uuid, id: Uuid) -> Result<File, AppError> {
        let file = self
            .file_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if file.user_id == requester_id {
            return Ok(file);
        }
        if let Some(workspace_id) = file.workspace_id {
            if self
                .workspace_repo
                .find_membership(workspace_id, requester_id)
                .await?
                .is_some()
            {
                return Ok(file);
            }
        }

        Err(AppError::not_found("File not found"))
    }

    /// Opens a file's content for streaming download.
    pub async fn download(
        &self,
        requester_id: Uuid,
        id: Uuid,
    ) -> Result<(File, ByteStream), AppError> {
        let file = self.get(requester_id, id).await?;
        let stream = self.storage.read(&file.path).await?;
        Ok((file, stream))
    }

    /// Deletes a file's content and metadata. Owner only.
    pub async fn delete(&self, requester_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let file = self.find_owned(requester_id, id).await?;

        // Content first. A missing blob is tolerated so a previously
        // half-deleted file can still be cleaned up.
        match self.storage.delete(&file.path).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                warn!(file_id = %id, path = %file.path, "File content already gone");
            }
            Err(e) => return Err(e),
        }

        self.file_repo.delete(id).await?;

        info!(file_id = %id, user_id = %requester_id, "File deleted");

        Ok(())
    }

    /// Adds categories to a file, keeping existing assignments.
    pub async fn assign_categories(
        &self,
        requester_id: Uuid,
        id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<Vec<Category>, AppError> {
        self.find_owned(requester_id, id).await?;
        for category_id in category_ids {
            self.require_owned_category(requester_id, *category_id).await?;
        }

        self.file_repo.assign_categories(id, category_ids).await?;
        self.file_repo.categories_for_file(id).await
    }

    /// Removes specific categories from a file.
    pub async fn remove_categories(
        &self,
        requester_id: Uuid,
        id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<Vec<Category>, AppError> {
        self.find_owned(requester_id, id).await?;

        self.file_repo.remove_categories(id, category_ids).await?;
        self.file_repo.categories_for_file(id).await
    }

    /// Replaces a file's category set atomically.
    pub async fn replace_categories(
        &self,
        requester_id: Uuid,
        id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<Vec<Category>, AppError> {
        self.find_owned(requester_id, id).await?;
        for category_id in category_ids {
            self.require_owned_category(requester_id, *category_id).await?;
        }

        self.file_repo.replace_categories(id, category_ids).await?;
        self.file_repo.categories_for_file(id).await
    }

    /// The categories currently assigned to a file.
    pub async fn categories(&self, requester_id: Uuid, id: Uuid) -> Result<Vec<Category>, AppError> {
        self.get(requester_id, id).await?;
        self.file_repo.categories_for_file(id).await
    }

    /// Aggregate storage usage for the requester.
    pub async fn summary(&self, requester_id: Uuid) -> Result<StorageSummary, AppError> {
        self.file_repo.storage_summary(requester_id).await
    }

    /// Loads a file and verifies the requester owns it. Workspace members
    /// can read shared files but never mutate them.
    async fn find_owned(&self, requester_id: Uuid, id: Uuid) -> Result<File, AppError> {
        let file = self
            .file_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if file.user_id != requester_id {
            return Err(AppError::authorization("You do not own this file"));
        }

        Ok(file)
    }

    async fn require_membership(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        self.workspace_repo
            .find_membership(workspace_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("You are not a member of this workspace"))?;
        Ok(())
    }

    async fn require_owned_category(
        &self,
        requester_id: Uuid,
        category_id: Uuid,
    ) -> Result<(), AppError> {
        self.category_repo
            .find_for_user(requester_id, category_id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))?;
        Ok(())
    }
}

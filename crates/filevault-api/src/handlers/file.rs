//! File upload, download, and category assignment handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use uuid::Uuid;

use filevault_core::error::AppError;
use crate::error::ApiError;
use filevault_entity::category::Category;
use filevault_entity::file::{File, StorageSummary};
use filevault_service::file::UploadRequest;

use crate::dto::request::{CategoryIdsRequest, FileListQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/v1/files/upload (multipart/form-data)
///
/// Expected parts: `file` (required), `workspace_id` (optional uuid),
/// `category_ids` (optional, comma-separated uuids).
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<File>>), ApiError> {
    let mut filename = None;
    let mut mime_type = None;
    let mut data = None;
    let mut workspace_id = None;
    let mut category_ids = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                filename = field.file_name().map(str::to_string);
                mime_type = field.content_type().map(str::to_string);
                data = Some(field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Failed to read file part: {e}"))
                })?);
            }
            "workspace_id" => {
                let text = field.text().await.map_err(|e| {
                    AppError::validation(format!("Failed to read workspace_id: {e}"))
                })?;
                workspace_id = Some(
                    text.parse::<Uuid>()
                        .map_err(|_| AppError::validation("Invalid workspace_id"))?,
                );
            }
            "category_ids" => {
                let text = field.text().await.map_err(|e| {
                    AppError::validation(format!("Failed to read category_ids: {e}"))
                })?;
                for part in text.split(',').filter(|s| !s.trim().is_empty()) {
                    category_ids.push(
                        part.trim()
                            .parse::<Uuid>()
                            .map_err(|_| AppError::validation("Invalid category id"))?,
                    );
                }
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::validation("Missing 'file' part"))?;
    let filename = filename.ok_or_else(|| AppError::validation("File part has no filename"))?;

    let file = state
        .file_service
        .upload(
            auth.user_id,
            UploadRequest {
                filename,
                mime_type: mime_type.unwrap_or_else(|| "application/octet-stream".to_string()),
                data,
                workspace_id,
                category_ids,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}

/// GET /api/v1/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FileListQuery>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let files = state
        .file_service
        .list(auth.user_id, query.category_id)
        .await?;

    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/v1/files/summary
pub async fn storage_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<StorageSummary>>, ApiError> {
    let summary = state.file_service.summary(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/v1/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state.file_service.get(auth.user_id, id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// GET /api/v1/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let (file, stream) = state.file_service.download(auth.user_id, id).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.mime_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        )
        .header(header::CONTENT_LENGTH, file.size)
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::from(AppError::internal(format!("Response build failed: {e}"))))
}

/// DELETE /api/v1/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.file_service.delete(auth.user_id, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("File deleted"))))
}

/// GET /api/v1/files/{id}/categories
pub async fn list_file_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = state.file_service.categories(auth.user_id, id).await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// POST /api/v1/files/{id}/categories: add to the existing set.
pub async fn assign_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CategoryIdsRequest>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = state
        .file_service
        .assign_categories(auth.user_id, id, &req.category_ids)
        .await?;

    Ok(Json(ApiResponse::ok(categories)))
}

/// PUT /api/v1/files/{id}/categories: replace the whole set.
pub async fn replace_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CategoryIdsRequest>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = state
        .file_service
        .replace_categories(auth.user_id, id, &req.category_ids)
        .await?;

    Ok(Json(ApiResponse::ok(categories)))
}

/// DELETE /api/v1/files/{id}/categories: remove specific entries.
pub async fn remove_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CategoryIdsRequest>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = state
        .file_service
        .remove_categories(auth.user_id, id, &req.category_ids)
        .await?;

    Ok(Json(ApiResponse::ok(categories)))
}

//! Category handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use filevault_core::error::AppError;
use crate::error::ApiError;
use filevault_entity::category::Category;
use filevault_service::category::{
    CreateCategoryRequest as SvcCreateCategory, UpdateCategoryRequest as SvcUpdateCategory,
};

use crate::dto::request::{CreateCategoryRequest, SearchQuery, UpdateCategoryRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = state
        .category_service
        .list(auth.user_id, query.search.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(categories)))
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let category = state
        .category_service
        .create(
            auth.user_id,
            SvcCreateCategory {
                name: req.name,
                color: req.color,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(category))))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    let category = state.category_service.detail(auth.user_id, id).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    let category = state
        .category_service
        .update(
            auth.user_id,
            id,
            SvcUpdateCategory {
                name: req.name,
                color: req.color,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(category)))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.category_service.delete(auth.user_id, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Category deleted",
    ))))
}

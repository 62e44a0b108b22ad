//! Workspace and membership handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use filevault_core::error::AppError;
use crate::error::ApiError;
use filevault_entity::file::File;
use filevault_entity::workspace::{
    MembershipWithWorkspace, Workspace, WorkspaceMember, WorkspaceRole,
};
use filevault_service::workspace::{
    AddMemberRequest as SvcAddMember, CreateWorkspaceRequest as SvcCreateWorkspace,
    UpdateMemberRoleRequest as SvcUpdateRole, UpdateWorkspaceRequest as SvcUpdateWorkspace,
    WorkspaceDetail,
};

use crate::dto::request::{
    AddMemberRequest, CreateWorkspaceRequest, SearchQuery, UpdateMemberRoleRequest,
    UpdateWorkspaceRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/v1/workspaces
pub async fn create_workspace(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateWorkspaceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Workspace>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let workspace = state
        .workspace_service
        .create(
            auth.user_id,
            SvcCreateWorkspace {
                name: req.name,
                description: req.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(workspace))))
}

/// GET /api/v1/workspaces
pub async fn list_workspaces(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<MembershipWithWorkspace>>>, ApiError> {
    let workspaces = state
        .workspace_service
        .list(auth.user_id, query.search.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(workspaces)))
}

/// GET /api/v1/workspaces/{id}
pub async fn get_workspace(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WorkspaceDetail>>, ApiError> {
    let detail = state.workspace_service.detail(auth.user_id, id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// PUT /api/v1/workspaces/{id}
pub async fn update_workspace(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateWorkspaceRequest>,
) -> Result<Json<ApiResponse<Workspace>>, ApiError> {
    let workspace = state
        .workspace_service
        .update(
            auth.user_id,
            id,
            SvcUpdateWorkspace {
                name: req.name,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(workspace)))
}

/// DELETE /api/v1/workspaces/{id}
pub async fn delete_workspace(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.workspace_service.delete(auth.user_id, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Workspace deleted",
    ))))
}

/// POST /api/v1/workspaces/{id}/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WorkspaceMember>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let member = state
        .workspace_service
        .add_member(auth.user_id, id, SvcAddMember { email: req.email })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(member))))
}

/// PUT /api/v1/workspaces/{id}/members/{user_id}
pub async fn update_member_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateMemberRoleRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    // Reject unknown role strings before anything touches the database.
    let role: WorkspaceRole = req.role.parse()?;

    state
        .workspace_service
        .update_member_role(auth.user_id, id, user_id, SvcUpdateRole { role })
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Member role updated",
    ))))
}

/// DELETE /api/v1/workspaces/{id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .workspace_service
        .remove_member(auth.user_id, id, user_id)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Member removed"))))
}

/// POST /api/v1/workspaces/{id}/leave
pub async fn leave_workspace(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.workspace_service.leave(auth.user_id, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Left the workspace",
    ))))
}

/// GET /api/v1/workspaces/{id}/files
pub async fn list_workspace_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let files = state
        .file_service
        .list_for_workspace(auth.user_id, id)
        .await?;

    Ok(Json(ApiResponse::ok(files)))
}

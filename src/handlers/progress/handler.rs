//! Progress handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::AppResult,
    handlers::{ListQuery, Pagination, check, field_enum, field_str, file_name, required_str},
    middleware::auth::AuthenticatedUser,
    models::Role,
    services::{ProgressService, progress_service::CreateProgress},
    state::AppState,
};

use super::{
    request::{create_progress_schema, review_progress_schema},
    response::{ProgressListResponse, ProgressResponse},
};

/// List progress reports visible to the caller (paginated)
pub async fn list_progress(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ProgressListResponse>> {
    let result = ProgressService::retrieve_all(
        state.store(),
        state.config(),
        &auth_user.subject(),
        query.search(),
        query.page_request(),
    )
    .await?;

    let pagination = Pagination::of(&result);
    Ok(Json(ProgressListResponse {
        progress: result.items,
        pagination,
    }))
}

/// Get one progress report the caller may see
pub async fn get_progress(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProgressResponse>> {
    let progress = ProgressService::retrieve_one(state.store(), &auth_user.subject(), id).await?;
    Ok(Json(ProgressResponse { progress }))
}

/// Submit a progress report for the caller's project (student)
pub async fn create_progress(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<ProgressResponse>)> {
    auth_user.require_role(&[Role::Student])?;
    check(&state, &payload, &create_progress_schema()).await?;

    let data = CreateProgress {
        summary: required_str(&payload, "summary")?.to_string(),
        fyp: field_enum(&payload, "fyp")?,
        resource: file_name(&payload, "resource").map(str::to_string),
    };

    let progress = ProgressService::create(state.store(), &auth_user.subject(), data).await?;
    Ok((StatusCode::CREATED, Json(ProgressResponse { progress })))
}

/// Record a review decision (supervisor or admin)
pub async fn review_progress(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> AppResult<Json<ProgressResponse>> {
    auth_user.require_role(&[Role::Supervisor, Role::Admin])?;
    check(&state, &payload, &review_progress_schema()).await?;

    let progress = ProgressService::review(
        state.store(),
        &auth_user.subject(),
        id,
        field_enum(&payload, "status")?,
        field_str(&payload, "remarks"),
    )
    .await?;
    Ok(Json(ProgressResponse { progress }))
}

/// Delete a progress report
pub async fn delete_progress(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProgressResponse>> {
    let progress = ProgressService::delete(state.store(), &auth_user.subject(), id).await?;
    Ok(Json(ProgressResponse { progress }))
}

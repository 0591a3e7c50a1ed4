//! Project handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::AppResult,
    handlers::{ListQuery, Pagination, check, field_enum, field_id, file_name, required_str},
    middleware::auth::AuthenticatedUser,
    models::Role,
    services::{ProjectService, project_service::CreateProject},
    state::AppState,
};

use super::{
    request::{create_project_schema, update_project_schema},
    response::{ProjectResponse, ProjectsListResponse},
};

/// List projects visible to the caller (paginated)
pub async fn list_projects(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ProjectsListResponse>> {
    let result = ProjectService::retrieve_all(
        state.store(),
        state.config(),
        &auth_user.subject(),
        query.search(),
        query.page_request(),
    )
    .await?;

    let pagination = Pagination::of(&result);
    Ok(Json(ProjectsListResponse {
        projects: result.items,
        pagination,
    }))
}

/// Get one project the caller may see
pub async fn get_project(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProjectResponse>> {
    let project = ProjectService::retrieve_one(state.store(), &auth_user.subject(), id).await?;
    Ok(Json(ProjectResponse { project }))
}

/// Register a project (student lead)
pub async fn create_project(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    auth_user.require_role(&[Role::Student])?;
    check(&state, &payload, &create_project_schema(auth_user.id, &payload)).await?;

    let data = CreateProject {
        lead: auth_user.id,
        member_one: field_id(&payload, "memberOne"),
        member_two: field_id(&payload, "memberTwo"),
        supervisor: field_id(&payload, "supervisor"),
        pid: required_str(&payload, "pid")?.to_string(),
        title: required_str(&payload, "title")?.to_string(),
        abstract_: required_str(&payload, "abstract")?.to_string(),
        kind: field_enum(&payload, "type")?,
        category: required_str(&payload, "category")?.to_string(),
    };

    let project = ProjectService::create(state.store(), data).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse { project })))
}

/// Update a project; each role may touch its own set of fields
pub async fn update_project(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<Value>,
) -> AppResult<Json<ProjectResponse>> {
    check(&state, &payload, &update_project_schema(id, &payload)).await?;

    // Persist the uploaded proposal by its stored name
    if let Some(name) = file_name(&payload, "proposal").map(str::to_string) {
        payload["proposal"] = Value::String(name);
    }

    let project =
        ProjectService::update(state.store(), &auth_user.subject(), id, &payload).await?;
    Ok(Json(ProjectResponse { project }))
}

/// Delete a project (lead or admin)
pub async fn delete_project(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProjectResponse>> {
    let project = ProjectService::delete(state.store(), &auth_user.subject(), id).await?;
    Ok(Json(ProjectResponse { project }))
}

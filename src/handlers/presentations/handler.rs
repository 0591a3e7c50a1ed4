//! Presentation handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    handlers::{ListQuery, Pagination, check, field_enum, field_str, file_name, required_str},
    middleware::auth::AuthenticatedUser,
    models::Role,
    services::{PresentationService, presentation_service::CreatePresentation},
    state::AppState,
};

use super::{
    request::{create_presentation_schema, review_presentation_schema},
    response::{PresentationResponse, PresentationsListResponse},
};

/// List presentations visible to the caller (paginated)
pub async fn list_presentations(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PresentationsListResponse>> {
    let result = PresentationService::retrieve_all(
        state.store(),
        state.config(),
        &auth_user.subject(),
        query.search(),
        query.page_request(),
    )
    .await?;

    let pagination = Pagination::of(&result);
    Ok(Json(PresentationsListResponse {
        presentations: result.items,
        pagination,
    }))
}

/// Get one presentation the caller may see
pub async fn get_presentation(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PresentationResponse>> {
    let presentation =
        PresentationService::retrieve_one(state.store(), &auth_user.subject(), id).await?;
    Ok(Json(PresentationResponse { presentation }))
}

/// Submit a presentation for the caller's project (student)
pub async fn create_presentation(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<PresentationResponse>)> {
    auth_user.require_role(&[Role::Student])?;
    check(&state, &payload, &create_presentation_schema()).await?;

    let resource = file_name(&payload, "resource")
        .ok_or_else(|| AppError::InvalidInput("Missing resource upload".to_string()))?
        .to_string();

    let data = CreatePresentation {
        summary: required_str(&payload, "summary")?.to_string(),
        fyp: field_enum(&payload, "fyp")?,
        resource,
    };

    let presentation =
        PresentationService::create(state.store(), &auth_user.subject(), data).await?;
    Ok((StatusCode::CREATED, Json(PresentationResponse { presentation })))
}

/// Record a review decision (supervisor or admin)
pub async fn review_presentation(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> AppResult<Json<PresentationResponse>> {
    auth_user.require_role(&[Role::Supervisor, Role::Admin])?;
    check(&state, &payload, &review_presentation_schema()).await?;

    let presentation = PresentationService::review(
        state.store(),
        &auth_user.subject(),
        id,
        field_enum(&payload, "status")?,
        field_str(&payload, "remarks"),
    )
    .await?;
    Ok(Json(PresentationResponse { presentation }))
}

/// Delete a presentation
pub async fn delete_presentation(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PresentationResponse>> {
    let presentation =
        PresentationService::delete(state.store(), &auth_user.subject(), id).await?;
    Ok(Json(PresentationResponse { presentation }))
}

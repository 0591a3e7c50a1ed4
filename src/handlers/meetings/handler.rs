//! Meeting handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    handlers::{ListQuery, Pagination, check, field_id, field_str, required_str},
    middleware::auth::AuthenticatedUser,
    models::Role,
    services::{MeetingService, meeting_service::CreateMeeting},
    state::AppState,
    utils::time::parse_datetime,
};

use super::{
    request::{create_meeting_schema, update_meeting_schema},
    response::{MeetingResponse, MeetingsListResponse},
};

/// List meetings visible to the caller (paginated)
pub async fn list_meetings(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<MeetingsListResponse>> {
    let result = MeetingService::retrieve_all(
        state.store(),
        state.config(),
        &auth_user.subject(),
        query.search(),
        query.page_request(),
    )
    .await?;

    let pagination = Pagination::of(&result);
    Ok(Json(MeetingsListResponse {
        meetings: result.items,
        pagination,
    }))
}

/// Get one meeting the caller may see
pub async fn get_meeting(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MeetingResponse>> {
    let meeting = MeetingService::retrieve_one(state.store(), &auth_user.subject(), id).await?;
    Ok(Json(MeetingResponse { meeting }))
}

/// Schedule a meeting (supervisor or admin)
pub async fn create_meeting(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<MeetingResponse>)> {
    auth_user.require_role(&[Role::Supervisor, Role::Admin])?;
    check(&state, &payload, &create_meeting_schema()).await?;

    let schedule = parse_datetime(required_str(&payload, "schedule")?)
        .ok_or_else(|| AppError::InvalidInput("Invalid schedule".to_string()))?;
    let project = field_id(&payload, "project")
        .ok_or_else(|| AppError::InvalidInput("Missing project".to_string()))?;

    let data = CreateMeeting {
        project,
        link: required_str(&payload, "link")?.to_string(),
        schedule,
        summary: required_str(&payload, "summary")?.to_string(),
        reference: field_str(&payload, "reference").map(str::to_string),
    };

    let meeting = MeetingService::create(state.store(), &auth_user.subject(), data).await?;
    Ok((StatusCode::CREATED, Json(MeetingResponse { meeting })))
}

/// Reschedule, revise or close out a meeting (supervisor or admin)
pub async fn update_meeting(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<Value>,
) -> AppResult<Json<MeetingResponse>> {
    auth_user.require_role(&[Role::Supervisor, Role::Admin])?;
    check(&state, &payload, &update_meeting_schema()).await?;

    // Store the schedule in canonical form whatever format it arrived in
    if let Some(schedule) = field_str(&payload, "schedule").and_then(parse_datetime) {
        payload["schedule"] = Value::String(schedule.to_rfc3339());
    }

    let meeting =
        MeetingService::update(state.store(), &auth_user.subject(), id, &payload).await?;
    Ok(Json(MeetingResponse { meeting }))
}

/// Cancel a meeting (supervisor or admin)
pub async fn delete_meeting(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MeetingResponse>> {
    auth_user.require_role(&[Role::Supervisor, Role::Admin])?;
    let meeting = MeetingService::delete(state.store(), &auth_user.subject(), id).await?;
    Ok(Json(MeetingResponse { meeting }))
}

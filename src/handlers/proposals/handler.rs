//! Proposal handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::AppResult,
    handlers::{ListQuery, Pagination, check, field_enum, field_id, field_str, required_str},
    middleware::auth::AuthenticatedUser,
    models::Role,
    services::{ProposalService, proposal_service::CreateProposal},
    state::AppState,
};

use super::{
    request::{create_proposal_schema, review_proposal_schema, update_proposal_schema},
    response::{ProposalResponse, ProposalsListResponse},
};

/// List proposals visible to the caller (paginated)
pub async fn list_proposals(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ProposalsListResponse>> {
    let result = ProposalService::retrieve_all(
        state.store(),
        state.config(),
        &auth_user.subject(),
        query.search(),
        query.page_request(),
    )
    .await?;

    let pagination = Pagination::of(&result);
    Ok(Json(ProposalsListResponse {
        proposals: result.items,
        pagination,
    }))
}

/// Get one proposal the caller may see
pub async fn get_proposal(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProposalResponse>> {
    let proposal = ProposalService::retrieve_one(state.store(), &auth_user.subject(), id).await?;
    Ok(Json(ProposalResponse { proposal }))
}

/// Submit a proposal (student lead)
pub async fn create_proposal(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<ProposalResponse>)> {
    auth_user.require_role(&[Role::Student])?;
    check(&state, &payload, &create_proposal_schema(auth_user.id, &payload)).await?;

    let data = CreateProposal {
        lead: auth_user.id,
        member_one: field_id(&payload, "memberOne"),
        member_two: field_id(&payload, "memberTwo"),
        supervisor: field_id(&payload, "supervisor"),
        title: required_str(&payload, "title")?.to_string(),
        abstract_: required_str(&payload, "abstract")?.to_string(),
        kind: field_enum(&payload, "type")?,
        category: required_str(&payload, "category")?.to_string(),
    };

    let proposal = ProposalService::create(state.store(), data).await?;
    Ok((StatusCode::CREATED, Json(ProposalResponse { proposal })))
}

/// Revise a pending proposal (lead)
pub async fn update_proposal(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> AppResult<Json<ProposalResponse>> {
    check(&state, &payload, &update_proposal_schema(id, &payload)).await?;

    let proposal =
        ProposalService::update(state.store(), &auth_user.subject(), id, &payload).await?;
    Ok(Json(ProposalResponse { proposal }))
}

/// Record a review decision (supervisor or admin)
pub async fn review_proposal(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> AppResult<Json<ProposalResponse>> {
    auth_user.require_role(&[Role::Supervisor, Role::Admin])?;
    check(&state, &payload, &review_proposal_schema()).await?;

    let proposal = ProposalService::review(
        state.store(),
        &auth_user.subject(),
        id,
        field_enum(&payload, "status")?,
        field_str(&payload, "remarks"),
    )
    .await?;
    Ok(Json(ProposalResponse { proposal }))
}

/// Withdraw or remove a proposal
pub async fn delete_proposal(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProposalResponse>> {
    let proposal = ProposalService::delete(state.store(), &auth_user.subject(), id).await?;
    Ok(Json(ProposalResponse { proposal }))
}

//! Proposal response DTOs

use serde::Serialize;

use crate::handlers::Pagination;
use crate::models::Proposal;

/// Single proposal response
#[derive(Debug, Serialize)]
pub struct ProposalResponse {
    pub proposal: Proposal,
}

/// Proposal list response
#[derive(Debug, Serialize)]
pub struct ProposalsListResponse {
    pub proposals: Vec<Proposal>,
    pub pagination: Pagination,
}

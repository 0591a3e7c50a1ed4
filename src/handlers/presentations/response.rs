//! Presentation response DTOs

use serde::Serialize;

use crate::handlers::Pagination;
use crate::models::Presentation;

/// Single presentation response
#[derive(Debug, Serialize)]
pub struct PresentationResponse {
    pub presentation: Presentation,
}

/// Presentation list response
#[derive(Debug, Serialize)]
pub struct PresentationsListResponse {
    pub presentations: Vec<Presentation>,
    pub pagination: Pagination,
}

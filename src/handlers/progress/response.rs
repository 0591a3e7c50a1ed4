//! Progress response DTOs

use serde::Serialize;

use crate::handlers::Pagination;
use crate::models::Progress;

/// Single progress response
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub progress: Progress,
}

/// Progress list response
#[derive(Debug, Serialize)]
pub struct ProgressListResponse {
    pub progress: Vec<Progress>,
    pub pagination: Pagination,
}

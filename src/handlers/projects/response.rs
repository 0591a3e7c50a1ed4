//! Project response DTOs

use serde::Serialize;

use crate::handlers::Pagination;
use crate::models::Project;

/// Single project response
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub project: Project,
}

/// Project list response
#[derive(Debug, Serialize)]
pub struct ProjectsListResponse {
    pub projects: Vec<Project>,
    pub pagination: Pagination,
}

//! Meeting response DTOs

use serde::Serialize;

use crate::handlers::Pagination;
use crate::models::Meeting;

/// Single meeting response
#[derive(Debug, Serialize)]
pub struct MeetingResponse {
    pub meeting: Meeting,
}

/// Meeting list response
#[derive(Debug, Serialize)]
pub struct MeetingsListResponse {
    pub meetings: Vec<Meeting>,
    pub pagination: Pagination,
}

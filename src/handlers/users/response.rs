//! User response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::handlers::Pagination;
use crate::models::{AccountStatus, Role, User};

/// User public profile response. The password hash never appears here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cnic: Option<String>,
    pub roll_no: Option<String>,
    pub role: Role,
    pub status: AccountStatus,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            cnic: user.cnic,
            roll_no: user.roll_no,
            role: user.role,
            status: user.status,
            image: user.image,
            created_at: user.created_at,
        }
    }
}

/// User list response
#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub users: Vec<UserResponse>,
    pub pagination: Pagination,
}

//! User handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::AppResult,
    handlers::{ListQuery, Pagination, check, field_str, file_name, required_str},
    middleware::auth::AuthenticatedUser,
    models::{AccountStatus, Role},
    services::{UserService, auth_service::Signup},
    state::AppState,
};

use super::{
    request::{
        create_user_schema, update_password_schema, update_status_schema, update_user_schema,
    },
    response::{UserResponse, UsersListResponse},
};

/// List all users (admin, paginated)
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<UsersListResponse>> {
    auth_user.require_role(&[Role::Admin])?;

    let result = UserService::list_users(
        state.store(),
        state.config(),
        query.search(),
        query.page_request(),
    )
    .await?;

    let pagination = Pagination::of(&result);
    Ok(Json(UsersListResponse {
        users: result.items.into_iter().map(Into::into).collect(),
        pagination,
    }))
}

/// Create a user account (admin)
pub async fn create_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    auth_user.require_role(&[Role::Admin])?;
    check(&state, &payload, &create_user_schema()).await?;

    let signup = Signup {
        name: required_str(&payload, "name")?.to_string(),
        email: required_str(&payload, "email")?.to_string(),
        phone: field_str(&payload, "phone").map(str::to_string),
        cnic: field_str(&payload, "cnic").map(str::to_string),
        roll_no: field_str(&payload, "rollNo").map(str::to_string),
        role: crate::handlers::field_enum(&payload, "role")?,
        password: required_str(&payload, "password")?.to_string(),
        image: file_name(&payload, "image").map(str::to_string),
    };

    let user = UserService::create_user(state.store(), signup).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Get a specific user by ID
pub async fn get_user(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = UserService::get_user(state.store(), id).await?;
    Ok(Json(user.into()))
}

/// Update user profile (self, or admin)
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> AppResult<Json<UserResponse>> {
    check(&state, &payload, &update_user_schema(id)).await?;

    let user = UserService::update_profile(
        state.store(),
        &auth_user,
        id,
        field_str(&payload, "name"),
        field_str(&payload, "phone"),
        file_name(&payload, "image"),
    )
    .await?;
    Ok(Json(user.into()))
}

/// Change the caller's password
pub async fn update_password(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<Value>,
) -> AppResult<Json<UserResponse>> {
    check(&state, &payload, &update_password_schema()).await?;

    let user = UserService::update_password(
        state.store(),
        auth_user.id,
        required_str(&payload, "currentPassword")?,
        required_str(&payload, "password")?,
    )
    .await?;
    Ok(Json(user.into()))
}

/// Activate or deactivate an account (admin)
pub async fn update_status(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> AppResult<Json<UserResponse>> {
    auth_user.require_role(&[Role::Admin])?;
    check(&state, &payload, &update_status_schema()).await?;

    let status: AccountStatus = crate::handlers::field_enum(&payload, "status")?;
    let user = UserService::update_status(state.store(), id, status).await?;
    Ok(Json(user.into()))
}

/// Delete a user account (admin)
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    auth_user.require_role(&[Role::Admin])?;
    let user = UserService::delete_user(state.store(), id).await?;
    Ok(Json(user.into()))
}

//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod auth;
pub mod health;
pub mod meetings;
pub mod presentations;
pub mod progress;
pub mod projects;
pub mod proposals;
pub mod users;

use axum::{Router, middleware};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::auth::auth_middleware,
    state::AppState,
    store::{PageRequest, PageResult},
    validation::{Schema, validate},
};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/users", users::routes())
        .nest("/projects", projects::routes())
        .nest("/proposals", proposals::routes())
        .nest("/progress", progress::routes())
        .nest("/presentations", presentations::routes())
        .nest("/meetings", meetings::routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes())
        .merge(protected)
}

/// Common list query parameters: free-text search plus paging
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Free-text search term
    pub q: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl ListQuery {
    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}

/// Pagination metadata echoed in list responses
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub current_count: u64,
}

impl Pagination {
    pub fn of<T>(result: &PageResult<T>) -> Self {
        Self {
            current_page: result.current_page,
            total_pages: result.total_pages,
            page_size: result.page_size,
            total_count: result.total_count,
            current_count: result.current_count,
        }
    }
}

/// Run a payload through its schema, converting failures into a 422
pub(crate) async fn check(
    state: &AppState,
    payload: &serde_json::Value,
    schema: &Schema,
) -> AppResult<()> {
    let validation = validate(state.store(), payload, schema).await?;
    match validation.into_errors() {
        Some(errors) => Err(AppError::FailedValidation(errors)),
        None => Ok(()),
    }
}

/// Read a string field out of a validated payload
pub(crate) fn field_str<'a>(payload: &'a serde_json::Value, field: &str) -> Option<&'a str> {
    payload.get(field).and_then(serde_json::Value::as_str)
}

/// Read a string field that validation has already guaranteed present
pub(crate) fn required_str<'a>(
    payload: &'a serde_json::Value,
    field: &str,
) -> AppResult<&'a str> {
    field_str(payload, field)
        .ok_or_else(|| AppError::InvalidInput(format!("Missing field '{field}'")))
}

/// Read an identifier field out of a validated payload
pub(crate) fn field_id(payload: &serde_json::Value, field: &str) -> Option<uuid::Uuid> {
    field_str(payload, field).and_then(|s| uuid::Uuid::parse_str(s).ok())
}

/// Uploaded files arrive as descriptor objects; persist their stored name
pub(crate) fn file_name<'a>(payload: &'a serde_json::Value, field: &str) -> Option<&'a str> {
    match payload.get(field) {
        Some(serde_json::Value::Object(file)) => file.get("name").and_then(serde_json::Value::as_str),
        Some(serde_json::Value::String(name)) => Some(name),
        _ => None,
    }
}

/// Decode an enum-like field from its wire string
pub(crate) fn field_enum<T: serde::de::DeserializeOwned>(
    payload: &serde_json::Value,
    field: &str,
) -> AppResult<T> {
    let value = payload
        .get(field)
        .cloned()
        .ok_or_else(|| AppError::InvalidInput(format!("Missing field '{field}'")))?;
    serde_json::from_value(value)
        .map_err(|_| AppError::InvalidInput(format!("Invalid value for '{field}'")))
}

//! User management handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// User routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_users))
        .route("/", post(handler::create_user))
        .route("/password", patch(handler::update_password))
        .route("/{id}", get(handler::get_user))
        .route("/{id}", patch(handler::update_user))
        .route("/{id}", delete(handler::delete_user))
        .route("/{id}/status", patch(handler::update_status))
}

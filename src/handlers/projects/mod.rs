//! Project handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Project routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_projects))
        .route("/", post(handler::create_project))
        .route("/{id}", get(handler::get_project))
        .route("/{id}", patch(handler::update_project))
        .route("/{id}", delete(handler::delete_project))
}

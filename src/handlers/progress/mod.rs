//! Progress handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Progress routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_progress))
        .route("/", post(handler::create_progress))
        .route("/{id}", get(handler::get_progress))
        .route("/{id}", delete(handler::delete_progress))
        .route("/{id}/review", patch(handler::review_progress))
}

//! Presentation handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Presentation routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_presentations))
        .route("/", post(handler::create_presentation))
        .route("/{id}", get(handler::get_presentation))
        .route("/{id}", delete(handler::delete_presentation))
        .route("/{id}/review", patch(handler::review_presentation))
}

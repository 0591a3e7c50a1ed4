//! Proposal handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Proposal routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_proposals))
        .route("/", post(handler::create_proposal))
        .route("/{id}", get(handler::get_proposal))
        .route("/{id}", patch(handler::update_proposal))
        .route("/{id}", delete(handler::delete_proposal))
        .route("/{id}/review", patch(handler::review_proposal))
}

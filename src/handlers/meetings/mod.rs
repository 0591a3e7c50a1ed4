//! Meeting handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Meeting routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_meetings))
        .route("/", post(handler::create_meeting))
        .route("/{id}", get(handler::get_meeting))
        .route("/{id}", patch(handler::update_meeting))
        .route("/{id}", delete(handler::delete_meeting))
}

//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

use axum::{Router, routing::post};

use crate::state::AppState;

/// Authentication routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handler::signup))
        .route("/signin", post(handler::signin))
        .route("/otp/send", post(handler::send_otp))
        .route("/otp/verify", post(handler::verify_otp))
        .route("/password/reset", post(handler::reset_password))
}

//! FYPMS - Final Year Project Management backend
//!
//! A role-aware backend for academic final-year-project workflows: account
//! lifecycle, project/proposal assignment, progress and presentation
//! submissions, and supervisor meetings.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Models**: Domain models and DTOs
//!
//! Two engine modules underpin every controller:
//! - **validation**: a declarative rule engine validating request payloads
//!   against per-field rule sets, with templated error messages
//! - **store**: role-scoped, composable query filters and pagination over an
//!   opaque document store

pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

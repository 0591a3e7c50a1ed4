//! Business logic services

pub mod auth_service;
pub mod meeting_service;
pub mod presentation_service;
pub mod progress_service;
pub mod project_service;
pub mod proposal_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use meeting_service::MeetingService;
pub use presentation_service::PresentationService;
pub use progress_service::ProgressService;
pub use project_service::ProjectService;
pub use proposal_service::ProposalService;
pub use user_service::UserService;

use serde_json::Value;

use crate::store::Document;

/// Shorthand for building an update-changes document from a `json!` literal
pub(crate) fn changes(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

//! Domain models
//!
//! This module contains all domain models used throughout the application.
//! Every model maps to one document collection; role and status enums are
//! explicit types serialized with their wire strings.

pub mod meeting;
pub mod presentation;
pub mod progress;
pub mod project;
pub mod proposal;
pub mod user;
pub mod verification;

pub use meeting::{Meeting, MeetingStatus};
pub use presentation::Presentation;
pub use progress::{Progress, ReviewStatus};
pub use project::{Project, ProjectStatus, ProjectType};
pub use proposal::{Proposal, ProposalStatus};
pub use user::{AccountStatus, Role, User};
pub use verification::{Verification, VerificationPurpose};

use serde::Serialize;

/// FYP stages a submission can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FypStage {
    Fyp1,
    Fyp2,
    Fyp3,
    FypFinal,
}

impl FypStage {
    pub const WIRE: &[&str] = &["fyp1", "fyp2", "fyp3", "fypFinal"];
}

//! Progress model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::collections;
use crate::store::Collection;

use super::FypStage;

/// Review states shared by progress and presentation submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewStatus {
    Submitted,
    PendingReview,
    Reviewed,
    Rejected,
}

impl ReviewStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Submitted => "submitted",
            ReviewStatus::PendingReview => "pending-review",
            ReviewStatus::Reviewed => "reviewed",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// Progress document model: a periodic work report for a project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub id: Uuid,
    pub project: Uuid,
    pub summary: String,
    pub fyp: FypStage,
    /// Uploaded report document name
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Progress {
    pub const COLLECTION: Collection<Self> = Collection::new(collections::PROGRESS);
}

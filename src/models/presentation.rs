//! Presentation model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::collections;
use crate::store::Collection;

use super::{FypStage, progress::ReviewStatus};

/// Presentation document model: slides submitted for a project milestone
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub id: Uuid,
    pub project: Uuid,
    pub summary: String,
    pub fyp: FypStage,
    /// Uploaded slide deck name
    pub resource: String,
    #[serde(default)]
    pub remarks: Option<String>,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Presentation {
    pub const COLLECTION: Collection<Self> = Collection::new(collections::PRESENTATIONS);
}

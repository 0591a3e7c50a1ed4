//! Meeting model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::collections;
use crate::store::Collection;

/// Meeting lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Scheduled,
    Completed,
}

impl MeetingStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "scheduled",
            MeetingStatus::Completed => "completed",
        }
    }
}

/// Meeting document model: a supervisor session for a project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: Uuid,
    pub project: Uuid,
    /// Conference link
    pub link: String,
    pub schedule: DateTime<Utc>,
    pub summary: String,
    /// Optional related material link
    #[serde(default)]
    pub reference: Option<String>,
    pub status: MeetingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meeting {
    pub const COLLECTION: Collection<Self> = Collection::new(collections::MEETINGS);
}

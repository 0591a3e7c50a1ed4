//! Proposal model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::collections;
use crate::store::Collection;

use super::project::ProjectType;

/// Proposal review outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    ConditionallyAccepted,
    Rejected,
}

impl ProposalStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::ConditionallyAccepted => "conditionally-accepted",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

/// Proposal document model: a project pitch awaiting review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: Uuid,
    pub lead: Uuid,
    #[serde(default)]
    pub member_one: Option<Uuid>,
    #[serde(default)]
    pub member_two: Option<Uuid>,
    #[serde(default)]
    pub supervisor: Option<Uuid>,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_: String,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    pub category: String,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Proposal {
    pub const COLLECTION: Collection<Self> = Collection::new(collections::PROPOSALS);

    pub fn is_accepted(&self) -> bool {
        matches!(
            self.status,
            ProposalStatus::Accepted | ProposalStatus::ConditionallyAccepted
        )
    }
}

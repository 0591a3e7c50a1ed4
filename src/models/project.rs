//! Project model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::collections;
use crate::store::Collection;

/// Project kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectType {
    New,
    ModifiedOrExtension,
    ResearchBased,
}

impl ProjectType {
    pub const WIRE: &[&str] = &["new", "modifiedOrExtension", "researchBased"];
}

/// Project lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatus {
    UnderDevelopment,
    Completed,
}

impl ProjectStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::UnderDevelopment => "underDevelopment",
            ProjectStatus::Completed => "completed",
        }
    }
}

/// Project document model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub lead: Uuid,
    #[serde(default)]
    pub member_one: Option<Uuid>,
    #[serde(default)]
    pub member_two: Option<Uuid>,
    #[serde(default)]
    pub supervisor: Option<Uuid>,
    /// Project code, e.g. SW-001
    pub pid: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_: String,
    /// Uploaded proposal document name
    #[serde(default)]
    pub proposal: Option<String>,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    pub category: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub const COLLECTION: Collection<Self> = Collection::new(collections::PROJECTS);

    /// Student members: lead plus the optional second and third members
    pub fn members(&self) -> impl Iterator<Item = Uuid> + '_ {
        std::iter::once(self.lead)
            .chain(self.member_one)
            .chain(self.member_two)
    }

    pub fn is_member(&self, user: Uuid) -> bool {
        self.members().any(|member| member == user)
    }

    pub fn is_supervised_by(&self, user: Uuid) -> bool {
        self.supervisor == Some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_wire_strings() {
        assert_eq!(
            serde_json::to_value(ProjectType::ModifiedOrExtension).unwrap(),
            "modifiedOrExtension"
        );
    }

    #[test]
    fn test_membership() {
        let lead = Uuid::new_v4();
        let member = Uuid::new_v4();
        let project = Project {
            id: Uuid::new_v4(),
            lead,
            member_one: Some(member),
            member_two: None,
            supervisor: None,
            pid: "SW-001".into(),
            title: "Indoor navigation".into(),
            abstract_: String::new(),
            proposal: None,
            kind: ProjectType::New,
            category: "software".into(),
            status: ProjectStatus::UnderDevelopment,
            remarks: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(project.is_member(lead));
        assert!(project.is_member(member));
        assert!(!project.is_member(Uuid::new_v4()));
        assert!(!project.is_supervised_by(lead));
    }
}

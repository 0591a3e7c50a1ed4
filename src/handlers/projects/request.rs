//! Project request schemas
//!
//! The member/supervisor reference fields cross-check each other through
//! `exclude` rules built from the incoming payload, so one person cannot
//! fill two slots on the same project.

use serde_json::Value;
use uuid::Uuid;

use crate::constants::{MAX_PROPOSAL_KB, PROPOSAL_EXTENSIONS, collections};
use crate::models::{ProjectStatus, ProjectType};
use crate::validation::{Rule, Schema};

fn reference(payload: &Value, field: &str) -> Value {
    payload.get(field).cloned().unwrap_or(Value::Null)
}

/// Project creation form. `lead` is the authenticated caller, included in
/// the exclusion lists of every other reference slot.
pub fn create_project_schema(lead: Uuid, payload: &Value) -> Schema {
    let lead_value = Value::String(lead.to_string());
    let member_one = reference(payload, "memberOne");
    let member_two = reference(payload, "memberTwo");
    let supervisor = reference(payload, "supervisor");

    Schema::new()
        .field(
            "memberOne",
            [
                Rule::Optional,
                Rule::Id,
                Rule::Exclude(vec![lead_value.clone(), member_two.clone(), supervisor.clone()]),
                Rule::exists(collections::USERS, "id"),
            ],
        )
        .field(
            "memberTwo",
            [
                Rule::Optional,
                Rule::Id,
                Rule::Exclude(vec![lead_value.clone(), member_one.clone(), supervisor.clone()]),
                Rule::exists(collections::USERS, "id"),
            ],
        )
        .field(
            "supervisor",
            [
                Rule::Optional,
                Rule::Id,
                Rule::Exclude(vec![lead_value, member_one, member_two]),
                Rule::exists(collections::USERS, "id"),
            ],
        )
        .field(
            "pid",
            [
                Rule::Required,
                Rule::ProjectCode,
                Rule::unique(collections::PROJECTS, "pid"),
            ],
        )
        .field(
            "title",
            [
                Rule::Required,
                Rule::Min(3),
                Rule::Max(255),
                Rule::unique(collections::PROJECTS, "title"),
            ],
        )
        .field("abstract", [Rule::Required, Rule::word(200, 350)])
        .field("type", [Rule::Required, Rule::in_list(ProjectType::WIRE)])
        .field("category", [Rule::Required, Rule::Str])
}

/// Project update form; title uniqueness skips the project being edited
pub fn update_project_schema(project: Uuid, payload: &Value) -> Schema {
    let lead = reference(payload, "lead");
    let member_one = reference(payload, "memberOne");
    let member_two = reference(payload, "memberTwo");
    let supervisor = reference(payload, "supervisor");

    Schema::new()
        .field(
            "lead",
            [
                Rule::Optional,
                Rule::Id,
                Rule::Exclude(vec![member_one.clone(), member_two.clone(), supervisor.clone()]),
                Rule::exists(collections::USERS, "id"),
            ],
        )
        .field(
            "memberOne",
            [
                Rule::Optional,
                Rule::Id,
                Rule::Exclude(vec![lead.clone(), member_two.clone(), supervisor.clone()]),
                Rule::exists(collections::USERS, "id"),
            ],
        )
        .field(
            "memberTwo",
            [
                Rule::Optional,
                Rule::Id,
                Rule::Exclude(vec![lead.clone(), member_one.clone(), supervisor.clone()]),
                Rule::exists(collections::USERS, "id"),
            ],
        )
        .field(
            "supervisor",
            [
                Rule::Optional,
                Rule::Id,
                Rule::Exclude(vec![lead, member_one, member_two]),
                Rule::exists(collections::USERS, "id"),
            ],
        )
        .field(
            "title",
            [
                Rule::Optional,
                Rule::Min(3),
                Rule::Max(255),
                Rule::unique_ignoring(collections::PROJECTS, "title", "id", project.to_string()),
            ],
        )
        .field("abstract", [Rule::Optional, Rule::word(200, 350)])
        .field(
            "proposal",
            [
                Rule::Optional,
                Rule::extensions(PROPOSAL_EXTENSIONS),
                Rule::FileSize(MAX_PROPOSAL_KB),
            ],
        )
        .field(
            "status",
            [
                Rule::Optional,
                Rule::in_list(&[
                    ProjectStatus::UnderDevelopment.as_str(),
                    ProjectStatus::Completed.as_str(),
                ]),
            ],
        )
        .field("remarks", [Rule::Optional, Rule::word(1, 350)])
}

//! Proposal request schemas

use serde_json::Value;
use uuid::Uuid;

use crate::constants::collections;
use crate::models::{ProjectType, ProposalStatus};
use crate::validation::{Rule, Schema};

fn reference(payload: &Value, field: &str) -> Value {
    payload.get(field).cloned().unwrap_or(Value::Null)
}

/// Proposal submission form. The lead is the authenticated caller and may
/// not double as a member.
pub fn create_proposal_schema(lead: Uuid, payload: &Value) -> Schema {
    let lead_value = Value::String(lead.to_string());
    let member_one = reference(payload, "memberOne");
    let member_two = reference(payload, "memberTwo");

    Schema::new()
        .field(
            "memberOne",
            [
                Rule::Optional,
                Rule::Id,
                Rule::Exclude(vec![lead_value.clone(), member_two.clone()]),
                Rule::exists(collections::USERS, "id"),
            ],
        )
        .field(
            "memberTwo",
            [
                Rule::Optional,
                Rule::Id,
                Rule::Exclude(vec![lead_value, member_one]),
                Rule::exists(collections::USERS, "id"),
            ],
        )
        .field(
            "title",
            [
                Rule::Required,
                Rule::Min(3),
                Rule::Max(255),
                Rule::unique(collections::PROPOSALS, "title"),
            ],
        )
        .field("abstract", [Rule::Required, Rule::word(200, 350)])
        .field("type", [Rule::Required, Rule::in_list(ProjectType::WIRE)])
        .field("category", [Rule::Required, Rule::Str])
}

/// Proposal content update form (lead, while pending)
pub fn update_proposal_schema(proposal: Uuid, payload: &Value) -> Schema {
    let member_one = reference(payload, "memberOne");
    let member_two = reference(payload, "memberTwo");

    Schema::new()
        .field(
            "memberOne",
            [
                Rule::Optional,
                Rule::Id,
                Rule::Exclude(vec![member_two.clone()]),
                Rule::exists(collections::USERS, "id"),
            ],
        )
        .field(
            "memberTwo",
            [
                Rule::Optional,
                Rule::Id,
                Rule::Exclude(vec![member_one]),
                Rule::exists(collections::USERS, "id"),
            ],
        )
        .field(
            "title",
            [
                Rule::Optional,
                Rule::Min(3),
                Rule::Max(255),
                Rule::unique_ignoring(collections::PROPOSALS, "title", "id", proposal.to_string()),
            ],
        )
        .field("abstract", [Rule::Optional, Rule::word(200, 350)])
        .field("type", [Rule::Optional, Rule::in_list(ProjectType::WIRE)])
        .field("category", [Rule::Optional, Rule::Str])
}

/// Proposal review form (supervisor or admin)
pub fn review_proposal_schema() -> Schema {
    Schema::new()
        .field(
            "supervisor",
            [Rule::Optional, Rule::Id, Rule::exists(collections::USERS, "id")],
        )
        .field(
            "status",
            [
                Rule::Required,
                Rule::in_list(&[
                    ProposalStatus::Accepted.as_str(),
                    ProposalStatus::ConditionallyAccepted.as_str(),
                    ProposalStatus::Rejected.as_str(),
                ]),
            ],
        )
        .field("remarks", [Rule::Optional, Rule::word(5, 350)])
}

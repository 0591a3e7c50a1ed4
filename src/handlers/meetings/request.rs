//! Meeting request schemas

use crate::constants::collections;
use crate::models::MeetingStatus;
use crate::validation::{Rule, Schema};

/// Meeting scheduling form; the schedule must lie in the future
pub fn create_meeting_schema() -> Schema {
    Schema::new()
        .field(
            "project",
            [
                Rule::Required,
                Rule::Id,
                Rule::exists(collections::PROJECTS, "id"),
            ],
        )
        .field("link", [Rule::Required, Rule::Url])
        .field("schedule", [Rule::Required, Rule::Date { future: true }])
        .field("summary", [Rule::Required, Rule::word(5, 350)])
        .field("reference", [Rule::Optional, Rule::Url])
}

/// Meeting update form
pub fn update_meeting_schema() -> Schema {
    Schema::new()
        .field("link", [Rule::Optional, Rule::Url])
        .field("schedule", [Rule::Optional, Rule::Date { future: true }])
        .field("summary", [Rule::Optional, Rule::word(5, 350)])
        .field("reference", [Rule::Optional, Rule::Url])
        .field(
            "status",
            [
                Rule::Optional,
                Rule::in_list(&[
                    MeetingStatus::Scheduled.as_str(),
                    MeetingStatus::Completed.as_str(),
                ]),
            ],
        )
}

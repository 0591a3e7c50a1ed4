//! Presentation request schemas

use crate::constants::{MAX_RESOURCE_KB, RESOURCE_EXTENSIONS};
use crate::models::{FypStage, ReviewStatus};
use crate::validation::{Rule, Schema};

/// Presentation submission form; the slide deck upload is mandatory
pub fn create_presentation_schema() -> Schema {
    Schema::new()
        .field("summary", [Rule::Required, Rule::word(10, 350)])
        .field("fyp", [Rule::Required, Rule::in_list(FypStage::WIRE)])
        .field(
            "resource",
            [
                Rule::Required,
                Rule::extensions(RESOURCE_EXTENSIONS),
                Rule::FileSize(MAX_RESOURCE_KB),
            ],
        )
}

/// Presentation review form (supervisor)
pub fn review_presentation_schema() -> Schema {
    Schema::new()
        .field(
            "status",
            [
                Rule::Required,
                Rule::in_list(&[
                    ReviewStatus::Reviewed.as_str(),
                    ReviewStatus::Rejected.as_str(),
                    ReviewStatus::PendingReview.as_str(),
                ]),
            ],
        )
        .field("remarks", [Rule::Optional, Rule::word(5, 350)])
}

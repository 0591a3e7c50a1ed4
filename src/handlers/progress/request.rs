//! Progress request schemas

use crate::constants::{MAX_RESOURCE_KB, RESOURCE_EXTENSIONS};
use crate::models::{FypStage, ReviewStatus};
use crate::validation::{Rule, Schema};

/// Progress submission form
pub fn create_progress_schema() -> Schema {
    Schema::new()
        .field("summary", [Rule::Required, Rule::word(10, 350)])
        .field("fyp", [Rule::Required, Rule::in_list(FypStage::WIRE)])
        .field(
            "resource",
            [
                Rule::Optional,
                Rule::extensions(RESOURCE_EXTENSIONS),
                Rule::FileSize(MAX_RESOURCE_KB),
            ],
        )
}

/// Progress review form (supervisor)
pub fn review_progress_schema() -> Schema {
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

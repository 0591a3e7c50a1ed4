//! User request schemas

use uuid::Uuid;

use crate::constants::{IMAGE_EXTENSIONS, MAX_IMAGE_KB, collections};
use crate::models::{AccountStatus, Role};
use crate::validation::{Rule, Schema};

/// Admin account-creation form
pub fn create_user_schema() -> Schema {
    Schema::new()
        .field("name", [Rule::Required, Rule::Str, Rule::Min(3), Rule::Max(50)])
        .field(
            "email",
            [
                Rule::Required,
                Rule::Email,
                Rule::unique(collections::USERS, "email"),
            ],
        )
        .field(
            "phone",
            [
                Rule::Optional,
                Rule::Phone,
                Rule::unique(collections::USERS, "phone"),
            ],
        )
        .field(
            "cnic",
            [
                Rule::Optional,
                Rule::Number,
                Rule::Digits(13),
                Rule::unique(collections::USERS, "cnic"),
            ],
        )
        .field(
            "rollNo",
            [
                Rule::Optional,
                Rule::Size(7),
                Rule::RollNo,
                Rule::unique(collections::USERS, "rollNo"),
            ],
        )
        .field("role", [Rule::Required, Rule::in_list(Role::SIGNUP)])
        .field("password", [Rule::Required, Rule::Password])
        .field(
            "image",
            [
                Rule::Optional,
                Rule::extensions(IMAGE_EXTENSIONS),
                Rule::FileSize(MAX_IMAGE_KB),
            ],
        )
}

/// Profile update form; uniqueness checks skip the profile being edited
pub fn update_user_schema(target: Uuid) -> Schema {
    Schema::new()
        .field("name", [Rule::Optional, Rule::Str, Rule::Min(3), Rule::Max(50)])
        .field(
            "phone",
            [
                Rule::Optional,
                Rule::Phone,
                Rule::unique_ignoring(collections::USERS, "phone", "id", target.to_string()),
            ],
        )
        .field(
            "image",
            [
                Rule::Optional,
                Rule::extensions(IMAGE_EXTENSIONS),
                Rule::FileSize(MAX_IMAGE_KB),
            ],
        )
}

/// Password change form
pub fn update_password_schema() -> Schema {
    Schema::new()
        .field("currentPassword", [Rule::Required])
        .field("password", [Rule::Required, Rule::Password])
}

/// Account status form (admin)
pub fn update_status_schema() -> Schema {
    Schema::new().field(
        "status",
        [
            Rule::Required,
            Rule::in_list(&[
                AccountStatus::Active.as_str(),
                AccountStatus::Inactive.as_str(),
            ]),
        ],
    )
}

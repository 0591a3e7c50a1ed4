//! Authentication request schemas

use crate::constants::{IMAGE_EXTENSIONS, MAX_IMAGE_KB, OTP_LENGTH, collections};
use crate::models::Role;
use crate::validation::{Rule, Schema};

/// Signup form
pub fn signup_schema() -> Schema {
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

/// Signin form
pub fn signin_schema() -> Schema {
    Schema::new()
        .field("email", [Rule::Required, Rule::Email])
        .field("password", [Rule::Required])
}

/// OTP dispatch form
pub fn send_otp_schema() -> Schema {
    Schema::new()
        .field("email", [Rule::Required, Rule::Email])
        .field(
            "purpose",
            [
                Rule::Required,
                Rule::in_list(&["account-activation", "password-reset"]),
            ],
        )
}

/// OTP confirmation form
pub fn verify_otp_schema() -> Schema {
    Schema::new()
        .field("email", [Rule::Required, Rule::Email])
        .field("otp", [Rule::Required, Rule::Number, Rule::Digits(OTP_LENGTH)])
}

/// Forgotten-password reset form
pub fn reset_password_schema() -> Schema {
    Schema::new()
        .field("email", [Rule::Required, Rule::Email])
        .field("otp", [Rule::Required, Rule::Number, Rule::Digits(OTP_LENGTH)])
        .field("password", [Rule::Required, Rule::Password])
        .field(
            "confirmationPassword",
            [Rule::Required, Rule::Same("password".to_string())],
        )
}

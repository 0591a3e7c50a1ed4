//! Utility functions

pub mod crypto;
pub mod mailer;
pub mod time;

pub use crypto::{generate_otp, hash_password, hash_string, verify_password};
pub use mailer::{Mailer, TracingMailer};
pub use time::{now_utc, parse_datetime};

//! Verification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::collections;
use crate::store::Collection;

/// What a one-time passcode unlocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationPurpose {
    AccountActivation,
    PasswordReset,
}

/// A pending OTP challenge. Only the digest is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub id: Uuid,
    pub user: Uuid,
    pub otp_hash: String,
    pub purpose: VerificationPurpose,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Verification {
    pub const COLLECTION: Collection<Self> = Collection::new(collections::VERIFICATIONS);

    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

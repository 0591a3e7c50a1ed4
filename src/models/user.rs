//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::collections;
use crate::store::Collection;

/// User roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Supervisor,
    Student,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::Student => "student",
        }
    }

    /// Roles assignable through signup
    pub const SIGNUP: &[&str] = &["supervisor", "student"];
}

/// Account lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountStatus {
    Active,
    Inactive,
    VerificationPending,
}

impl AccountStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
            AccountStatus::VerificationPending => "verification-pending",
        }
    }
}

/// User document model.
///
/// The password hash never leaves this type through a response DTO; handlers
/// expose explicit response structs instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub cnic: Option<String>,
    #[serde(default)]
    pub roll_no: Option<String>,
    pub role: Role,
    pub status: AccountStatus,
    #[serde(default)]
    pub image: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub const COLLECTION: Collection<Self> = Collection::new(collections::USERS);

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_strings() {
        assert_eq!(serde_json::to_value(Role::Student).unwrap(), "student");
        assert_eq!(serde_json::to_value(Role::Supervisor).unwrap(), "supervisor");
    }

    #[test]
    fn test_account_status_wire_strings() {
        assert_eq!(
            serde_json::to_value(AccountStatus::VerificationPending).unwrap(),
            "verification-pending"
        );
    }
}

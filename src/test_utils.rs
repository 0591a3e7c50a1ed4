//! Shared test fixtures
//!
//! Seeds an in-memory store with users and projects so service and handler
//! tests don't repeat document plumbing.

use chrono::Utc;
use uuid::Uuid;

use crate::config::{Config, JwtConfig, MailConfig, OtpConfig, PaginationConfig, ServerConfig};
use crate::models::{
    AccountStatus, Project, ProjectStatus, ProjectType, Role, User,
};
use crate::store::{DocumentStore, Subject};
use crate::utils::crypto::hash_password;

/// Password used by every seeded user
pub const TEST_PASSWORD: &str = "Secret1!";

/// A configuration that never reads the environment
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            rust_log: "warn".into(),
        },
        jwt: JwtConfig {
            secret: "test-secret".into(),
            expiry_hours: 1,
        },
        otp: OtpConfig { expiry_minutes: 10 },
        pagination: PaginationConfig {
            default_page_size: 10,
        },
        mail: MailConfig {
            from_address: "no-reply@test".into(),
        },
    }
}

/// Insert an active user and return it
pub async fn seed_user(
    store: &dyn DocumentStore,
    name: &str,
    email: &str,
    role: Role,
) -> User {
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        name: name.into(),
        email: email.into(),
        phone: None,
        cnic: None,
        roll_no: None,
        role,
        status: AccountStatus::Active,
        image: None,
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        created_at: now,
        updated_at: now,
    };
    User::COLLECTION.insert(store, &user).await.unwrap()
}

/// Insert a project led by `lead` and return it
pub async fn seed_project(
    store: &dyn DocumentStore,
    lead: Uuid,
    member_one: Option<Uuid>,
    supervisor: Option<Uuid>,
    title: &str,
) -> Project {
    let now = Utc::now();
    let project = Project {
        id: Uuid::new_v4(),
        lead,
        member_one,
        member_two: None,
        supervisor,
        pid: "SW-001".into(),
        title: title.into(),
        abstract_: "A sufficiently long abstract for testing purposes.".into(),
        proposal: None,
        kind: ProjectType::New,
        category: "software".into(),
        status: ProjectStatus::UnderDevelopment,
        remarks: None,
        created_at: now,
        updated_at: now,
    };
    Project::COLLECTION.insert(store, &project).await.unwrap()
}

/// Subject shorthand
pub fn subject(id: Uuid, role: Role) -> Subject {
    Subject { id, role }
}

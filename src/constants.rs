//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Default OTP expiry in minutes
pub const DEFAULT_OTP_EXPIRY_MINUTES: i64 = 10;

/// Number of digits in a generated OTP
pub const OTP_LENGTH: usize = 6;

// =============================================================================
// PAGINATION DEFAULTS
// =============================================================================

/// Default number of records per page when the caller supplies none
pub const DEFAULT_PAGE_SIZE: u64 = 10;

// =============================================================================
// DOCUMENT COLLECTIONS
// =============================================================================

/// Collection names in the document store
pub mod collections {
    pub const USERS: &str = "users";
    pub const VERIFICATIONS: &str = "verifications";
    pub const PROJECTS: &str = "projects";
    pub const PROPOSALS: &str = "proposals";
    pub const PROGRESS: &str = "progress";
    pub const PRESENTATIONS: &str = "presentations";
    pub const MEETINGS: &str = "meetings";
}

// =============================================================================
// SEARCHABLE FIELDS
// =============================================================================

/// Per-resource field lists targeted by free-text search
pub mod search_fields {
    pub const USERS: &[&str] = &["name", "email", "cnic", "rollNo"];
    pub const PROJECTS: &[&str] = &["title", "abstract", "status"];
    pub const PROPOSALS: &[&str] = &["title", "abstract", "status"];
    pub const PROGRESS: &[&str] = &["summary", "fyp", "status", "remarks"];
    pub const PRESENTATIONS: &[&str] = &["summary", "fyp", "status", "remarks"];
    pub const MEETINGS: &[&str] = &["summary", "reference", "status"];
}

// =============================================================================
// PROJECT MEMBERSHIP
// =============================================================================

/// Document fields holding the student members of a project
pub const PROJECT_MEMBER_FIELDS: &[&str] = &["lead", "memberOne", "memberTwo"];

/// Document field holding the supervising faculty member of a project
pub const PROJECT_SUPERVISOR_FIELD: &str = "supervisor";

// =============================================================================
// UPLOAD LIMITS
// =============================================================================

/// Allowed profile image extensions
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Maximum profile image size in kilobytes
pub const MAX_IMAGE_KB: u64 = 1024 * 3;

/// Allowed proposal document extensions
pub const PROPOSAL_EXTENSIONS: &[&str] = &["pdf", "docx", "pptx"];

/// Maximum proposal document size in kilobytes
pub const MAX_PROPOSAL_KB: u64 = 10240;

/// Allowed submission resource extensions (reports, slide decks, archives)
pub const RESOURCE_EXTENSIONS: &[&str] = &["pdf", "pptx", "docx", "zip", "rar", "7z", "tar"];

/// Maximum submission resource size in kilobytes
pub const MAX_RESOURCE_KB: u64 = 1024 * 10;

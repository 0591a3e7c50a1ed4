//! Role-scoped filter composition
//!
//! Derives, per resource kind, the filter restricting a collection to the
//! records a subject may see or act on. Scopes combine with base filters via
//! conjunction only, so they can narrow visibility but never widen it. A
//! subject with no matching parent resource gets [`Filter::Nothing`], and
//! pagination downstream reports a well-formed empty page.

use serde_json::Value;
use uuid::Uuid;

use crate::constants::{PROJECT_MEMBER_FIELDS, PROJECT_SUPERVISOR_FIELD, collections};
use crate::models::Role;

use super::query::ID_FIELD;
use super::{DocumentStore, FindOptions, Filter, StoreError};

/// Resource kinds subject to role scoping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Project,
    Proposal,
    Progress,
    Presentation,
    Meeting,
}

/// The caller's identity and role
#[derive(Debug, Clone)]
pub struct Subject {
    pub id: Uuid,
    pub role: Role,
}

/// Derive the visibility filter for `subject` over `kind`.
///
/// Projects and proposals carry their membership directly; progress,
/// presentation and meeting records are scoped through their parent
/// project's membership, which costs one find query for non-admin roles.
pub async fn scope_for(
    store: &dyn DocumentStore,
    subject: &Subject,
    kind: ResourceKind,
) -> Result<Filter, StoreError> {
    match kind {
        ResourceKind::Project | ResourceKind::Proposal => Ok(membership_filter(subject)),
        ResourceKind::Progress | ResourceKind::Presentation | ResourceKind::Meeting => {
            parent_project_filter(store, subject).await
        }
    }
}

/// Membership filter over a collection that carries lead/member/supervisor
/// reference fields itself
fn membership_filter(subject: &Subject) -> Filter {
    match subject.role {
        Role::Admin => Filter::All,
        Role::Supervisor => Filter::id_eq(PROJECT_SUPERVISOR_FIELD, subject.id),
        Role::Student => Filter::Or(
            PROJECT_MEMBER_FIELDS
                .iter()
                .map(|field| Filter::id_eq(*field, subject.id))
                .collect(),
        ),
    }
}

/// Scope a child collection through the subject's parent project(s)
async fn parent_project_filter(
    store: &dyn DocumentStore,
    subject: &Subject,
) -> Result<Filter, StoreError> {
    match subject.role {
        Role::Admin => Ok(Filter::All),
        Role::Supervisor => {
            let supervised = store
                .find(
                    collections::PROJECTS,
                    &Filter::id_eq(PROJECT_SUPERVISOR_FIELD, subject.id),
                    &FindOptions::default(),
                )
                .await?;

            let ids: Vec<Uuid> = supervised.iter().filter_map(document_id).collect();
            if ids.is_empty() {
                Ok(Filter::Nothing)
            } else {
                Ok(Filter::IdIn("project".to_string(), ids))
            }
        }
        Role::Student => {
            let own = store
                .find_one(collections::PROJECTS, &membership_filter(subject))
                .await?;

            match own.as_ref().and_then(|doc| document_id(doc)) {
                Some(id) => Ok(Filter::id_eq("project", id)),
                None => Ok(Filter::Nothing),
            }
        }
    }
}

fn document_id(doc: &super::Document) -> Option<Uuid> {
    doc.get(ID_FIELD)
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
}

//! Proposal service

use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    config::Config,
    constants::search_fields,
    error::{AppError, AppResult},
    models::{Proposal, ProposalStatus, ProjectType, Role},
    store::{
        DocumentStore, Filter, PageRequest, PageResult, ResourceKind, Sort, Subject,
        query::{Field, QueryOptions, build_filter},
        scope_for,
    },
};

use super::changes;

/// New proposal data, already validated by the creation schema
#[derive(Debug, Clone)]
pub struct CreateProposal {
    pub lead: Uuid,
    pub member_one: Option<Uuid>,
    pub member_two: Option<Uuid>,
    pub supervisor: Option<Uuid>,
    pub title: String,
    pub abstract_: String,
    pub kind: ProjectType,
    pub category: String,
}

/// Proposal service for business logic
pub struct ProposalService;

impl ProposalService {
    /// List proposals visible to the caller
    pub async fn retrieve_all(
        store: &dyn DocumentStore,
        config: &Config,
        subject: &Subject,
        search: &str,
        page: PageRequest,
    ) -> AppResult<PageResult<Proposal>> {
        let search_filter = build_filter(
            Field::Any(search_fields::PROPOSALS),
            search,
            &QueryOptions::default(),
        )?;
        let scope = scope_for(store, subject, ResourceKind::Proposal).await?;

        let result = Proposal::COLLECTION
            .paginate(
                store,
                &scope.and(search_filter),
                page.sorted(Sort::desc("createdAt")),
                config.pagination.default_page_size,
            )
            .await?;
        Ok(result)
    }

    /// Retrieve one proposal the caller may see
    pub async fn retrieve_one(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
    ) -> AppResult<Proposal> {
        let scope = scope_for(store, subject, ResourceKind::Proposal).await?;
        Proposal::COLLECTION
            .find_one(store, &Filter::id_eq("id", id).and(scope))
            .await?
            .ok_or_else(|| AppError::NotFound("Proposal not found".to_string()))
    }

    /// Submit a proposal. A lead may have only one pending proposal at a time.
    pub async fn create(store: &dyn DocumentStore, data: CreateProposal) -> AppResult<Proposal> {
        let pending = Filter::id_eq("lead", data.lead)
            .and(Filter::eq("status", ProposalStatus::Pending.as_str()));
        if Proposal::COLLECTION.find_one(store, &pending).await?.is_some() {
            return Err(AppError::Conflict(
                "A proposal is already pending for you".to_string(),
            ));
        }

        let now = Utc::now();
        let proposal = Proposal {
            id: Uuid::new_v4(),
            lead: data.lead,
            member_one: data.member_one,
            member_two: data.member_two,
            supervisor: data.supervisor,
            title: data.title,
            abstract_: data.abstract_,
            remarks: None,
            kind: data.kind,
            category: data.category,
            status: ProposalStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        let proposal = Proposal::COLLECTION.insert(store, &proposal).await?;
        Ok(proposal)
    }

    /// Update a pending proposal's content (lead only, while pending)
    pub async fn update(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
        payload: &Value,
    ) -> AppResult<Proposal> {
        let proposal = Proposal::COLLECTION
            .find_one(store, &Filter::id_eq("id", id))
            .await?
            .ok_or_else(|| AppError::NotFound("Proposal not found".to_string()))?;

        if subject.role == Role::Student {
            if proposal.lead != subject.id {
                return Err(AppError::Forbidden("Not your proposal".to_string()));
            }
            if proposal.status != ProposalStatus::Pending {
                return Err(AppError::Conflict(
                    "Only pending proposals can be edited".to_string(),
                ));
            }
        }

        let fields: &[&str] = match subject.role {
            Role::Student => &["title", "abstract", "memberOne", "memberTwo", "type", "category"],
            Role::Supervisor | Role::Admin => &["status", "remarks", "supervisor"],
        };

        let mut updates = changes(json!({ "updatedAt": Utc::now() }));
        if let Some(body) = payload.as_object() {
            for (field, value) in body {
                if fields.contains(&field.as_str()) && !value.is_null() {
                    updates.insert(field.clone(), value.clone());
                }
            }
        }

        Proposal::COLLECTION
            .update_one(store, &Filter::id_eq("id", id), updates)
            .await?
            .ok_or_else(|| AppError::NotFound("Proposal not found".to_string()))
    }

    /// Record a review decision (supervisor of the proposal, or admin)
    pub async fn review(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
        status: ProposalStatus,
        remarks: Option<&str>,
    ) -> AppResult<Proposal> {
        let proposal = Proposal::COLLECTION
            .find_one(store, &Filter::id_eq("id", id))
            .await?
            .ok_or_else(|| AppError::NotFound("Proposal not found".to_string()))?;

        let allowed = match subject.role {
            Role::Admin => true,
            Role::Supervisor => proposal.supervisor == Some(subject.id),
            Role::Student => false,
        };
        if !allowed {
            return Err(AppError::Forbidden(
                "Only the assigned supervisor may review".to_string(),
            ));
        }

        Proposal::COLLECTION
            .update_one(
                store,
                &Filter::id_eq("id", id),
                changes(json!({
                    "status": status,
                    "remarks": remarks,
                    "updatedAt": Utc::now(),
                })),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Proposal not found".to_string()))
    }

    /// Delete a proposal: the lead while pending, admins any
    pub async fn delete(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
    ) -> AppResult<Proposal> {
        let filter = match subject.role {
            Role::Admin => Filter::id_eq("id", id),
            Role::Student => Filter::id_eq("id", id)
                .and(Filter::id_eq("lead", subject.id))
                .and(Filter::eq("status", ProposalStatus::Pending.as_str())),
            Role::Supervisor => {
                return Err(AppError::Forbidden(
                    "Supervisors cannot delete proposals".to_string(),
                ));
            }
        };

        Proposal::COLLECTION
            .delete_one(store, &filter)
            .await?
            .ok_or_else(|| AppError::NotFound("Proposal not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_utils::{subject, test_config};

    fn create_data(lead: Uuid, supervisor: Option<Uuid>) -> CreateProposal {
        CreateProposal {
            lead,
            member_one: None,
            member_two: None,
            supervisor,
            title: "Indoor navigation".into(),
            abstract_: "An abstract.".into(),
            kind: ProjectType::New,
            category: "software".into(),
        }
    }

    #[tokio::test]
    async fn test_one_pending_proposal_per_lead() {
        let store = MemoryStore::new();
        let lead = Uuid::new_v4();
        ProposalService::create(&store, create_data(lead, None))
            .await
            .unwrap();

        let again = ProposalService::create(&store, create_data(lead, None)).await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_review_requires_assigned_supervisor() {
        let store = MemoryStore::new();
        let supervisor = Uuid::new_v4();
        let proposal =
            ProposalService::create(&store, create_data(Uuid::new_v4(), Some(supervisor)))
                .await
                .unwrap();

        let other = subject(Uuid::new_v4(), Role::Supervisor);
        let denied = ProposalService::review(
            &store,
            &other,
            proposal.id,
            ProposalStatus::Accepted,
            None,
        )
        .await;
        assert!(matches!(denied, Err(AppError::Forbidden(_))));

        let assigned = subject(supervisor, Role::Supervisor);
        let reviewed = ProposalService::review(
            &store,
            &assigned,
            proposal.id,
            ProposalStatus::ConditionallyAccepted,
            Some("Narrow the scope"),
        )
        .await
        .unwrap();
        assert_eq!(reviewed.status, ProposalStatus::ConditionallyAccepted);
        assert_eq!(reviewed.remarks.as_deref(), Some("Narrow the scope"));
        assert!(reviewed.is_accepted());
    }

    #[tokio::test]
    async fn test_student_cannot_edit_reviewed_proposal() {
        let store = MemoryStore::new();
        let lead = Uuid::new_v4();
        let proposal = ProposalService::create(&store, create_data(lead, None))
            .await
            .unwrap();

        ProposalService::review(
            &store,
            &subject(Uuid::new_v4(), Role::Admin),
            proposal.id,
            ProposalStatus::Rejected,
            None,
        )
        .await
        .unwrap();

        let result = ProposalService::update(
            &store,
            &subject(lead, Role::Student),
            proposal.id,
            &json!({"title": "Second try"}),
        )
        .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_retrieve_all_scoped_by_membership() {
        let store = MemoryStore::new();
        let config = test_config();
        let lead = Uuid::new_v4();
        ProposalService::create(&store, create_data(lead, None))
            .await
            .unwrap();
        ProposalService::create(&store, create_data(Uuid::new_v4(), None))
            .await
            .unwrap();

        let mine = ProposalService::retrieve_all(
            &store,
            &config,
            &subject(lead, Role::Student),
            "",
            PageRequest::default(),
        )
        .await
        .unwrap();
        assert_eq!(mine.total_count, 1);
    }
}

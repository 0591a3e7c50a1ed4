//! Presentation service

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
    config::Config,
    constants::search_fields,
    error::{AppError, AppResult},
    models::{FypStage, Presentation, ReviewStatus, Role},
    store::{
        DocumentStore, Filter, PageRequest, PageResult, ResourceKind, Sort, Subject,
        query::{Field, QueryOptions, build_filter},
        scope_for,
    },
};

use super::changes;
use super::progress_service::{own_project, require_reviewer};

/// New presentation data, already validated by the submission schema
#[derive(Debug, Clone)]
pub struct CreatePresentation {
    pub summary: String,
    pub fyp: FypStage,
    /// Uploaded slide deck name
    pub resource: String,
}

/// Presentation service for business logic
pub struct PresentationService;

impl PresentationService {
    /// List presentations visible to the caller
    pub async fn retrieve_all(
        store: &dyn DocumentStore,
        config: &Config,
        subject: &Subject,
        search: &str,
        page: PageRequest,
    ) -> AppResult<PageResult<Presentation>> {
        let search_filter = build_filter(
            Field::Any(search_fields::PRESENTATIONS),
            search,
            &QueryOptions::default(),
        )?;
        let scope = scope_for(store, subject, ResourceKind::Presentation).await?;

        let result = Presentation::COLLECTION
            .paginate(
                store,
                &scope.and(search_filter),
                page.sorted(Sort::desc("createdAt")),
                config.pagination.default_page_size,
            )
            .await?;
        Ok(result)
    }

    /// Retrieve one presentation the caller may see
    pub async fn retrieve_one(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
    ) -> AppResult<Presentation> {
        let scope = scope_for(store, subject, ResourceKind::Presentation).await?;
        Presentation::COLLECTION
            .find_one(store, &Filter::id_eq("id", id).and(scope))
            .await?
            .ok_or_else(|| AppError::NotFound("Presentation not found".to_string()))
    }

    /// Submit a presentation for the caller's project
    pub async fn create(
        store: &dyn DocumentStore,
        subject: &Subject,
        data: CreatePresentation,
    ) -> AppResult<Presentation> {
        let project = own_project(store, subject).await?;

        let now = Utc::now();
        let presentation = Presentation {
            id: Uuid::new_v4(),
            project: project.id,
            summary: data.summary,
            fyp: data.fyp,
            resource: data.resource,
            remarks: None,
            status: ReviewStatus::Submitted,
            created_at: now,
            updated_at: now,
        };
        let presentation = Presentation::COLLECTION.insert(store, &presentation).await?;
        Ok(presentation)
    }

    /// Record a review decision (the project's supervisor, or admin)
    pub async fn review(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
        status: ReviewStatus,
        remarks: Option<&str>,
    ) -> AppResult<Presentation> {
        let presentation = Presentation::COLLECTION
            .find_one(store, &Filter::id_eq("id", id))
            .await?
            .ok_or_else(|| AppError::NotFound("Presentation not found".to_string()))?;

        require_reviewer(store, subject, presentation.project).await?;

        Presentation::COLLECTION
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
            .ok_or_else(|| AppError::NotFound("Presentation not found".to_string()))
    }

    /// Delete a presentation: the project's lead while still submitted,
    /// admins any
    pub async fn delete(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
    ) -> AppResult<Presentation> {
        let filter = match subject.role {
            Role::Admin => Filter::id_eq("id", id),
            Role::Student => {
                let project = own_project(store, subject).await?;
                Filter::id_eq("id", id)
                    .and(Filter::id_eq("project", project.id))
                    .and(Filter::eq("status", ReviewStatus::Submitted.as_str()))
            }
            Role::Supervisor => {
                return Err(AppError::Forbidden(
                    "Supervisors cannot delete presentations".to_string(),
                ));
            }
        };

        Presentation::COLLECTION
            .delete_one(store, &filter)
            .await?
            .ok_or_else(|| AppError::NotFound("Presentation not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_utils::{seed_project, subject, test_config};

    fn submission() -> CreatePresentation {
        CreatePresentation {
            summary: "Mid-term slides covering architecture and evaluation".into(),
            fyp: FypStage::Fyp2,
            resource: "slides.pptx".into(),
        }
    }

    #[tokio::test]
    async fn test_member_submits_for_own_project() {
        let store = MemoryStore::new();
        let lead = Uuid::new_v4();
        let member = Uuid::new_v4();
        let project = seed_project(&store, lead, Some(member), None, "Mine").await;

        let presentation = PresentationService::create(
            &store,
            &subject(member, Role::Student),
            submission(),
        )
        .await
        .unwrap();
        assert_eq!(presentation.project, project.id);
    }

    #[tokio::test]
    async fn test_supervisor_listing_covers_supervised_projects_only() {
        let store = MemoryStore::new();
        let config = test_config();
        let supervisor = Uuid::new_v4();
        let lead = Uuid::new_v4();
        seed_project(&store, lead, None, Some(supervisor), "Supervised").await;
        let other_lead = Uuid::new_v4();
        seed_project(&store, other_lead, None, None, "Unsupervised").await;

        PresentationService::create(&store, &subject(lead, Role::Student), submission())
            .await
            .unwrap();
        PresentationService::create(&store, &subject(other_lead, Role::Student), submission())
            .await
            .unwrap();

        let listing = PresentationService::retrieve_all(
            &store,
            &config,
            &subject(supervisor, Role::Supervisor),
            "",
            PageRequest::default(),
        )
        .await
        .unwrap();
        assert_eq!(listing.total_count, 1);
    }

    #[tokio::test]
    async fn test_student_delete_only_while_submitted() {
        let store = MemoryStore::new();
        let lead = Uuid::new_v4();
        let supervisor = Uuid::new_v4();
        seed_project(&store, lead, None, Some(supervisor), "Mine").await;
        let presentation = PresentationService::create(
            &store,
            &subject(lead, Role::Student),
            submission(),
        )
        .await
        .unwrap();

        PresentationService::review(
            &store,
            &subject(supervisor, Role::Supervisor),
            presentation.id,
            ReviewStatus::Reviewed,
            None,
        )
        .await
        .unwrap();

        let result = PresentationService::delete(
            &store,
            &subject(lead, Role::Student),
            presentation.id,
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}

//! Progress service

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
    config::Config,
    constants::search_fields,
    error::{AppError, AppResult},
    models::{FypStage, Progress, Project, ReviewStatus, Role},
    store::{
        DocumentStore, Filter, PageRequest, PageResult, ResourceKind, Sort, Subject,
        query::{Field, QueryOptions, build_filter},
        scope_for,
    },
};

use super::changes;

/// New progress data, already validated by the submission schema
#[derive(Debug, Clone)]
pub struct CreateProgress {
    pub summary: String,
    pub fyp: FypStage,
    pub resource: Option<String>,
}

/// Progress service for business logic
pub struct ProgressService;

impl ProgressService {
    /// List progress reports visible to the caller
    pub async fn retrieve_all(
        store: &dyn DocumentStore,
        config: &Config,
        subject: &Subject,
        search: &str,
        page: PageRequest,
    ) -> AppResult<PageResult<Progress>> {
        let search_filter = build_filter(
            Field::Any(search_fields::PROGRESS),
            search,
            &QueryOptions::default(),
        )?;
        let scope = scope_for(store, subject, ResourceKind::Progress).await?;

        let result = Progress::COLLECTION
            .paginate(
                store,
                &scope.and(search_filter),
                page.sorted(Sort::desc("createdAt")),
                config.pagination.default_page_size,
            )
            .await?;
        Ok(result)
    }

    /// Retrieve one progress report the caller may see
    pub async fn retrieve_one(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
    ) -> AppResult<Progress> {
        let scope = scope_for(store, subject, ResourceKind::Progress).await?;
        Progress::COLLECTION
            .find_one(store, &Filter::id_eq("id", id).and(scope))
            .await?
            .ok_or_else(|| AppError::NotFound("Progress report not found".to_string()))
    }

    /// Submit a progress report for the caller's project
    pub async fn create(
        store: &dyn DocumentStore,
        subject: &Subject,
        data: CreateProgress,
    ) -> AppResult<Progress> {
        let project = own_project(store, subject).await?;

        let now = Utc::now();
        let progress = Progress {
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
        let progress = Progress::COLLECTION.insert(store, &progress).await?;
        Ok(progress)
    }

    /// Record a review decision (the project's supervisor, or admin)
    pub async fn review(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
        status: ReviewStatus,
        remarks: Option<&str>,
    ) -> AppResult<Progress> {
        let progress = Progress::COLLECTION
            .find_one(store, &Filter::id_eq("id", id))
            .await?
            .ok_or_else(|| AppError::NotFound("Progress report not found".to_string()))?;

        require_reviewer(store, subject, progress.project).await?;

        Progress::COLLECTION
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
            .ok_or_else(|| AppError::NotFound("Progress report not found".to_string()))
    }

    /// Delete a report: the submitting project's lead while still submitted,
    /// admins any
    pub async fn delete(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
    ) -> AppResult<Progress> {
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
                    "Supervisors cannot delete progress reports".to_string(),
                ));
            }
        };

        Progress::COLLECTION
            .delete_one(store, &filter)
            .await?
            .ok_or_else(|| AppError::NotFound("Progress report not found".to_string()))
    }
}

/// The caller's own project, required for student submissions
pub(super) async fn own_project(
    store: &dyn DocumentStore,
    subject: &Subject,
) -> AppResult<Project> {
    let membership = build_filter(
        Field::Any(crate::constants::PROJECT_MEMBER_FIELDS),
        &subject.id.to_string(),
        &QueryOptions::identifier(),
    )?;
    Project::COLLECTION
        .find_one(store, &membership)
        .await?
        .ok_or_else(|| AppError::Conflict("No project assigned".to_string()))
}

/// Only the parent project's supervisor (or an admin) reviews submissions
pub(super) async fn require_reviewer(
    store: &dyn DocumentStore,
    subject: &Subject,
    project_id: Uuid,
) -> AppResult<()> {
    if subject.role == Role::Admin {
        return Ok(());
    }
    if subject.role == Role::Supervisor {
        let project = Project::COLLECTION
            .find_one(store, &Filter::id_eq("id", project_id))
            .await?;
        if project.is_some_and(|p| p.is_supervised_by(subject.id)) {
            return Ok(());
        }
    }
    Err(AppError::Forbidden(
        "Only the project's supervisor may review".to_string(),
    ))
}

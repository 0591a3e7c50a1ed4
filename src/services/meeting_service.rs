//! Meeting service

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::{
    config::Config,
    constants::search_fields,
    error::{AppError, AppResult},
    models::{Meeting, MeetingStatus, Project, Role},
    store::{
        DocumentStore, Filter, PageRequest, PageResult, ResourceKind, Sort, Subject,
        query::{Field, QueryOptions, build_filter},
        scope_for,
    },
};

use super::changes;

/// New meeting data, already validated by the scheduling schema
#[derive(Debug, Clone)]
pub struct CreateMeeting {
    pub project: Uuid,
    pub link: String,
    pub schedule: DateTime<Utc>,
    pub summary: String,
    pub reference: Option<String>,
}

/// Meeting service for business logic
pub struct MeetingService;

impl MeetingService {
    /// List meetings visible to the caller
    pub async fn retrieve_all(
        store: &dyn DocumentStore,
        config: &Config,
        subject: &Subject,
        search: &str,
        page: PageRequest,
    ) -> AppResult<PageResult<Meeting>> {
        let search_filter = build_filter(
            Field::Any(search_fields::MEETINGS),
            search,
            &QueryOptions::default(),
        )?;
        let scope = scope_for(store, subject, ResourceKind::Meeting).await?;

        let result = Meeting::COLLECTION
            .paginate(
                store,
                &scope.and(search_filter),
                page.sorted(Sort::desc("schedule")),
                config.pagination.default_page_size,
            )
            .await?;
        Ok(result)
    }

    /// Retrieve one meeting the caller may see
    pub async fn retrieve_one(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
    ) -> AppResult<Meeting> {
        let scope = scope_for(store, subject, ResourceKind::Meeting).await?;
        Meeting::COLLECTION
            .find_one(store, &Filter::id_eq("id", id).and(scope))
            .await?
            .ok_or_else(|| AppError::NotFound("Meeting not found".to_string()))
    }

    /// Schedule a meeting for a supervised project
    pub async fn create(
        store: &dyn DocumentStore,
        subject: &Subject,
        data: CreateMeeting,
    ) -> AppResult<Meeting> {
        let project = Project::COLLECTION
            .find_one(store, &Filter::id_eq("id", data.project))
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        let allowed = match subject.role {
            Role::Admin => true,
            Role::Supervisor => project.is_supervised_by(subject.id),
            Role::Student => false,
        };
        if !allowed {
            return Err(AppError::Forbidden(
                "Only the project's supervisor may schedule meetings".to_string(),
            ));
        }

        let now = Utc::now();
        let meeting = Meeting {
            id: Uuid::new_v4(),
            project: project.id,
            link: data.link,
            schedule: data.schedule,
            summary: data.summary,
            reference: data.reference,
            status: MeetingStatus::Scheduled,
            created_at: now,
            updated_at: now,
        };
        let meeting = Meeting::COLLECTION.insert(store, &meeting).await?;
        Ok(meeting)
    }

    /// Update a meeting (the supervising faculty member, or admin):
    /// reschedule, revise the summary/reference, or close it out
    pub async fn update(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
        payload: &serde_json::Value,
    ) -> AppResult<Meeting> {
        let meeting = Meeting::COLLECTION
            .find_one(store, &Filter::id_eq("id", id))
            .await?
            .ok_or_else(|| AppError::NotFound("Meeting not found".to_string()))?;

        super::progress_service::require_reviewer(store, subject, meeting.project).await?;

        let fields = ["link", "schedule", "summary", "reference", "status"];
        let mut updates = changes(json!({ "updatedAt": Utc::now() }));
        if let Some(body) = payload.as_object() {
            for (field, value) in body {
                if fields.contains(&field.as_str()) && !value.is_null() {
                    updates.insert(field.clone(), value.clone());
                }
            }
        }

        Meeting::COLLECTION
            .update_one(store, &Filter::id_eq("id", id), updates)
            .await?
            .ok_or_else(|| AppError::NotFound("Meeting not found".to_string()))
    }

    /// Delete a meeting (the supervising faculty member, or admin)
    pub async fn delete(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
    ) -> AppResult<Meeting> {
        let meeting = Meeting::COLLECTION
            .find_one(store, &Filter::id_eq("id", id))
            .await?
            .ok_or_else(|| AppError::NotFound("Meeting not found".to_string()))?;

        super::progress_service::require_reviewer(store, subject, meeting.project).await?;

        Meeting::COLLECTION
            .delete_one(store, &Filter::id_eq("id", id))
            .await?
            .ok_or_else(|| AppError::NotFound("Meeting not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_utils::{seed_project, subject, test_config};

    fn schedule_for(project: Uuid) -> CreateMeeting {
        CreateMeeting {
            project,
            link: "https://meet.example.com/fyp".into(),
            schedule: Utc::now() + chrono::Duration::days(2),
            summary: "Weekly sync on map matching results".into(),
            reference: None,
        }
    }

    #[tokio::test]
    async fn test_only_supervisor_schedules() {
        let store = MemoryStore::new();
        let lead = Uuid::new_v4();
        let supervisor = Uuid::new_v4();
        let project = seed_project(&store, lead, None, Some(supervisor), "Mine").await;

        let denied = MeetingService::create(
            &store,
            &subject(lead, Role::Student),
            schedule_for(project.id),
        )
        .await;
        assert!(matches!(denied, Err(AppError::Forbidden(_))));

        let meeting = MeetingService::create(
            &store,
            &subject(supervisor, Role::Supervisor),
            schedule_for(project.id),
        )
        .await
        .unwrap();
        assert_eq!(meeting.status, MeetingStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_student_sees_own_project_meetings() {
        let store = MemoryStore::new();
        let config = test_config();
        let lead = Uuid::new_v4();
        let supervisor = Uuid::new_v4();
        let project = seed_project(&store, lead, None, Some(supervisor), "Mine").await;
        let other = seed_project(&store, Uuid::new_v4(), None, Some(supervisor), "Other").await;

        let scheduler = subject(supervisor, Role::Supervisor);
        MeetingService::create(&store, &scheduler, schedule_for(project.id))
            .await
            .unwrap();
        MeetingService::create(&store, &scheduler, schedule_for(other.id))
            .await
            .unwrap();

        let listing = MeetingService::retrieve_all(
            &store,
            &config,
            &subject(lead, Role::Student),
            "",
            PageRequest::default(),
        )
        .await
        .unwrap();
        assert_eq!(listing.total_count, 1);
    }

    #[tokio::test]
    async fn test_supervisor_closes_meeting_out() {
        let store = MemoryStore::new();
        let supervisor = Uuid::new_v4();
        let project = seed_project(&store, Uuid::new_v4(), None, Some(supervisor), "Mine").await;
        let scheduler = subject(supervisor, Role::Supervisor);
        let meeting = MeetingService::create(&store, &scheduler, schedule_for(project.id))
            .await
            .unwrap();

        let updated = MeetingService::update(
            &store,
            &scheduler,
            meeting.id,
            &json!({"status": "completed"}),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, MeetingStatus::Completed);
    }
}

//! Project service

use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    config::Config,
    constants::{PROJECT_MEMBER_FIELDS, search_fields},
    error::{AppError, AppResult},
    models::{Project, ProjectStatus, ProjectType, Role},
    store::{
        DocumentStore, Filter, PageRequest, PageResult, ResourceKind, Sort, Subject,
        query::{Field, QueryOptions, build_filter},
        scope_for,
    },
};

use super::changes;

/// New project data, already validated by the creation schema
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub lead: Uuid,
    pub member_one: Option<Uuid>,
    pub member_two: Option<Uuid>,
    pub supervisor: Option<Uuid>,
    pub pid: String,
    pub title: String,
    pub abstract_: String,
    pub kind: ProjectType,
    pub category: String,
}

/// Project service for business logic
pub struct ProjectService;

impl ProjectService {
    /// List projects visible to the caller, optionally filtered by search
    pub async fn retrieve_all(
        store: &dyn DocumentStore,
        config: &Config,
        subject: &Subject,
        search: &str,
        page: PageRequest,
    ) -> AppResult<PageResult<Project>> {
        let search_filter = build_filter(
            Field::Any(search_fields::PROJECTS),
            search,
            &QueryOptions::default(),
        )?;
        let scope = scope_for(store, subject, ResourceKind::Project).await?;

        let result = Project::COLLECTION
            .paginate(
                store,
                &scope.and(search_filter),
                page.sorted(Sort::desc("createdAt")),
                config.pagination.default_page_size,
            )
            .await?;
        Ok(result)
    }

    /// Retrieve one project the caller may see
    pub async fn retrieve_one(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
    ) -> AppResult<Project> {
        let scope = scope_for(store, subject, ResourceKind::Project).await?;
        Project::COLLECTION
            .find_one(store, &Filter::id_eq("id", id).and(scope))
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    /// Create a project. Every named student must be unassigned; a student
    /// can belong to at most one project.
    pub async fn create(store: &dyn DocumentStore, data: CreateProject) -> AppResult<Project> {
        for (label, member) in [
            ("you", Some(data.lead)),
            ("member one", data.member_one),
            ("member two", data.member_two),
        ] {
            let Some(member) = member else { continue };
            let existing = Project::COLLECTION
                .find_one(store, &membership_filter(member))
                .await?;
            if existing.is_some() {
                return Err(AppError::Conflict(format!(
                    "A project is already assigned to {label}"
                )));
            }
        }

        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            lead: data.lead,
            member_one: data.member_one,
            member_two: data.member_two,
            supervisor: data.supervisor,
            pid: data.pid,
            title: data.title,
            abstract_: data.abstract_,
            proposal: None,
            kind: data.kind,
            category: data.category,
            status: ProjectStatus::UnderDevelopment,
            remarks: None,
            created_at: now,
            updated_at: now,
        };
        let project = Project::COLLECTION.insert(store, &project).await?;
        Ok(project)
    }

    /// Update a project with role-specific field whitelists.
    ///
    /// Students edit content fields on their own project (the lead also
    /// manages members); the supervising faculty member reviews; admins may
    /// additionally reassign the supervisor. Reference fields may be set to
    /// null to detach a member.
    pub async fn update(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
        payload: &Value,
    ) -> AppResult<Project> {
        let project = Project::COLLECTION
            .find_one(store, &Filter::id_eq("id", id))
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        let mut fields: Vec<&str> = Vec::new();
        // The lead slot is mandatory, so only these references can be nulled
        let mut reference_fields: Vec<&str> = vec!["memberOne", "memberTwo"];

        match subject.role {
            Role::Student => {
                if !project.is_member(subject.id) {
                    return Err(AppError::Forbidden(
                        "Not a member of this project".to_string(),
                    ));
                }
                fields.extend(["title", "abstract", "proposal"]);
                if project.lead == subject.id {
                    fields.extend(["memberOne", "memberTwo"]);
                }
            }
            Role::Supervisor => {
                if !project.is_supervised_by(subject.id) {
                    return Err(AppError::Forbidden(
                        "Not the supervisor of this project".to_string(),
                    ));
                }
                fields.extend(["lead", "memberOne", "memberTwo", "status", "remarks"]);
            }
            Role::Admin => {
                fields.extend([
                    "lead",
                    "memberOne",
                    "memberTwo",
                    "status",
                    "remarks",
                    "supervisor",
                ]);
                reference_fields.push("supervisor");
            }
        }

        let mut updates = changes(json!({ "updatedAt": Utc::now() }));
        if let Some(body) = payload.as_object() {
            for (field, value) in body {
                let allowed = fields.contains(&field.as_str());
                let detachable = reference_fields.contains(&field.as_str())
                    && fields.contains(&field.as_str());
                if value.is_null() {
                    if detachable {
                        updates.insert(field.clone(), Value::Null);
                    }
                } else if allowed {
                    updates.insert(field.clone(), value.clone());
                }
            }
        }

        Project::COLLECTION
            .update_one(store, &Filter::id_eq("id", id), updates)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    /// Delete a project: the lead may remove their own, admins any
    pub async fn delete(
        store: &dyn DocumentStore,
        subject: &Subject,
        id: Uuid,
    ) -> AppResult<Project> {
        let filter = match subject.role {
            Role::Admin => Filter::id_eq("id", id),
            Role::Student => Filter::id_eq("id", id).and(Filter::id_eq("lead", subject.id)),
            Role::Supervisor => {
                return Err(AppError::Forbidden(
                    "Supervisors cannot delete projects".to_string(),
                ));
            }
        };

        Project::COLLECTION
            .delete_one(store, &filter)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }
}

/// Any membership slot holding this student
fn membership_filter(user: Uuid) -> Filter {
    Filter::Or(
        PROJECT_MEMBER_FIELDS
            .iter()
            .map(|field| Filter::id_eq(*field, user))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_utils::{seed_project, subject, test_config};

    fn create_data(lead: Uuid) -> CreateProject {
        CreateProject {
            lead,
            member_one: None,
            member_two: None,
            supervisor: None,
            pid: "SW-002".into(),
            title: "Campus navigation".into(),
            abstract_: "An abstract.".into(),
            kind: ProjectType::New,
            category: "software".into(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_already_assigned_students() {
        let store = MemoryStore::new();
        let lead = Uuid::new_v4();
        seed_project(&store, lead, None, None, "Existing").await;

        let result = ProjectService::create(&store, create_data(lead)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        // Also rejected when named as a member of the new project
        let mut data = create_data(Uuid::new_v4());
        data.member_one = Some(lead);
        let result = ProjectService::create(&store, data).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_retrieve_all_is_role_scoped() {
        let store = MemoryStore::new();
        let config = test_config();
        let lead = Uuid::new_v4();
        seed_project(&store, lead, None, None, "Mine").await;
        seed_project(&store, Uuid::new_v4(), None, None, "Theirs").await;

        let student = subject(lead, Role::Student);
        let mine =
            ProjectService::retrieve_all(&store, &config, &student, "", PageRequest::default())
                .await
                .unwrap();
        assert_eq!(mine.total_count, 1);
        assert_eq!(mine.items[0].title, "Mine");

        let admin = subject(Uuid::new_v4(), Role::Admin);
        let all = ProjectService::retrieve_all(&store, &config, &admin, "", PageRequest::default())
            .await
            .unwrap();
        assert_eq!(all.total_count, 2);
    }

    #[tokio::test]
    async fn test_retrieve_one_denies_outsiders() {
        let store = MemoryStore::new();
        let lead = Uuid::new_v4();
        let project = seed_project(&store, lead, None, None, "Mine").await;

        let outsider = subject(Uuid::new_v4(), Role::Student);
        let result = ProjectService::retrieve_one(&store, &outsider, project.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let owner = subject(lead, Role::Student);
        let found = ProjectService::retrieve_one(&store, &owner, project.id)
            .await
            .unwrap();
        assert_eq!(found.id, project.id);
    }

    #[tokio::test]
    async fn test_update_whitelists_fields_by_role() {
        let store = MemoryStore::new();
        let lead = Uuid::new_v4();
        let supervisor = Uuid::new_v4();
        let project = seed_project(&store, lead, None, Some(supervisor), "Mine").await;

        // Lead may retitle but not self-assign a supervisor
        let payload = json!({"title": "Renamed", "supervisor": Uuid::new_v4().to_string()});
        let updated = ProjectService::update(
            &store,
            &subject(lead, Role::Student),
            project.id,
            &payload,
        )
        .await
        .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.supervisor, Some(supervisor));

        // Supervisor sets status and remarks
        let payload = json!({"status": "completed", "remarks": "Good work"});
        let updated = ProjectService::update(
            &store,
            &subject(supervisor, Role::Supervisor),
            project.id,
            &payload,
        )
        .await
        .unwrap();
        assert_eq!(updated.status, ProjectStatus::Completed);
        assert_eq!(updated.remarks.as_deref(), Some("Good work"));
    }

    #[tokio::test]
    async fn test_lead_detaches_member_with_null() {
        let store = MemoryStore::new();
        let lead = Uuid::new_v4();
        let member = Uuid::new_v4();
        let project = seed_project(&store, lead, Some(member), None, "Mine").await;

        let payload = json!({"memberOne": null});
        let updated = ProjectService::update(
            &store,
            &subject(lead, Role::Student),
            project.id,
            &payload,
        )
        .await
        .unwrap();
        assert_eq!(updated.member_one, None);
    }

    #[tokio::test]
    async fn test_non_member_update_is_forbidden() {
        let store = MemoryStore::new();
        let project = seed_project(&store, Uuid::new_v4(), None, None, "Mine").await;

        let result = ProjectService::update(
            &store,
            &subject(Uuid::new_v4(), Role::Student),
            project.id,
            &json!({"title": "Hijacked"}),
        )
        .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_rules() {
        let store = MemoryStore::new();
        let lead = Uuid::new_v4();
        let project = seed_project(&store, lead, None, None, "Mine").await;

        let supervisor = subject(Uuid::new_v4(), Role::Supervisor);
        assert!(matches!(
            ProjectService::delete(&store, &supervisor, project.id).await,
            Err(AppError::Forbidden(_))
        ));

        let stranger = subject(Uuid::new_v4(), Role::Student);
        assert!(matches!(
            ProjectService::delete(&store, &stranger, project.id).await,
            Err(AppError::NotFound(_))
        ));

        let owner = subject(lead, Role::Student);
        let deleted = ProjectService::delete(&store, &owner, project.id)
            .await
            .unwrap();
        assert_eq!(deleted.id, project.id);
    }
}

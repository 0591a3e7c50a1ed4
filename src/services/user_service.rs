//! User service

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
    config::Config,
    constants::search_fields,
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::{AccountStatus, User},
    store::{
        DocumentStore, Filter, PageRequest, PageResult, Sort,
        query::{Field, QueryOptions, build_filter},
    },
    utils::crypto::{hash_password, verify_password},
};

use super::changes;

/// User service for business logic
pub struct UserService;

impl UserService {
    /// List users with free-text search and pagination
    pub async fn list_users(
        store: &dyn DocumentStore,
        config: &Config,
        search: &str,
        page: PageRequest,
    ) -> AppResult<PageResult<User>> {
        let filter = build_filter(
            Field::Any(search_fields::USERS),
            search,
            &QueryOptions::default(),
        )?;

        let result = User::COLLECTION
            .paginate(
                store,
                &filter,
                page.sorted(Sort::desc("createdAt")),
                config.pagination.default_page_size,
            )
            .await?;
        Ok(result)
    }

    /// Create an account directly in the active state (admin operation);
    /// signup with OTP verification lives in the auth service
    pub async fn create_user(
        store: &dyn DocumentStore,
        data: super::auth_service::Signup,
    ) -> AppResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            phone: data.phone,
            cnic: data.cnic,
            roll_no: data.roll_no,
            role: data.role,
            status: AccountStatus::Active,
            image: data.image,
            password_hash: hash_password(&data.password)?,
            created_at: now,
            updated_at: now,
        };
        let user = User::COLLECTION.insert(store, &user).await?;
        Ok(user)
    }

    /// Get user by ID
    pub async fn get_user(store: &dyn DocumentStore, id: Uuid) -> AppResult<User> {
        User::COLLECTION
            .find_one(store, &Filter::id_eq("id", id))
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Get user by email
    pub async fn get_user_by_email(store: &dyn DocumentStore, email: &str) -> AppResult<User> {
        User::COLLECTION
            .find_one(store, &Filter::eq("email", email))
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Update profile fields. Users may update themselves; admins anyone.
    pub async fn update_profile(
        store: &dyn DocumentStore,
        requester: &AuthenticatedUser,
        target: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        image: Option<&str>,
    ) -> AppResult<User> {
        if requester.id != target && !requester.is_admin() {
            return Err(AppError::Forbidden(
                "Cannot update other users' profiles".to_string(),
            ));
        }

        let mut updates = changes(json!({ "updatedAt": Utc::now() }));
        if let Some(name) = name {
            updates.insert("name".into(), json!(name));
        }
        if let Some(phone) = phone {
            updates.insert("phone".into(), json!(phone));
        }
        if let Some(image) = image {
            updates.insert("image".into(), json!(image));
        }

        User::COLLECTION
            .update_one(store, &Filter::id_eq("id", target), updates)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Change the caller's password, verifying the current one first
    pub async fn update_password(
        store: &dyn DocumentStore,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<User> {
        let user = Self::get_user(store, user_id).await?;

        if !verify_password(current_password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        User::COLLECTION
            .update_one(
                store,
                &Filter::id_eq("id", user_id),
                changes(json!({
                    "passwordHash": hash_password(new_password)?,
                    "updatedAt": Utc::now(),
                })),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Activate or deactivate an account (admin operation)
    pub async fn update_status(
        store: &dyn DocumentStore,
        target: Uuid,
        status: AccountStatus,
    ) -> AppResult<User> {
        User::COLLECTION
            .update_one(
                store,
                &Filter::id_eq("id", target),
                changes(json!({ "status": status, "updatedAt": Utc::now() })),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Delete a user account (admin operation)
    pub async fn delete_user(store: &dyn DocumentStore, id: Uuid) -> AppResult<User> {
        User::COLLECTION
            .delete_one(store, &Filter::id_eq("id", id))
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::store::MemoryStore;
    use crate::test_utils::{seed_user, test_config};

    #[tokio::test]
    async fn test_list_users_searches_across_fields() {
        let store = MemoryStore::new();
        let config = test_config();
        seed_user(&store, "Aisha Khan", "aisha@uni.pk", Role::Student).await;
        seed_user(&store, "Bilal Ahmed", "bilal@uni.pk", Role::Supervisor).await;

        let all = UserService::list_users(&store, &config, "", PageRequest::default())
            .await
            .unwrap();
        assert_eq!(all.total_count, 2);

        let hit = UserService::list_users(&store, &config, "aisha", PageRequest::default())
            .await
            .unwrap();
        assert_eq!(hit.total_count, 1);
        assert_eq!(hit.items[0].name, "Aisha Khan");
    }

    #[tokio::test]
    async fn test_update_profile_requires_self_or_admin() {
        let store = MemoryStore::new();
        let target = seed_user(&store, "Aisha Khan", "aisha@uni.pk", Role::Student).await;
        let other = AuthenticatedUser {
            id: Uuid::new_v4(),
            name: "Someone Else".into(),
            role: Role::Student,
        };

        let denied = UserService::update_profile(
            &store,
            &other,
            target.id,
            Some("New Name"),
            None,
            None,
        )
        .await;
        assert!(matches!(denied, Err(AppError::Forbidden(_))));

        let admin = AuthenticatedUser {
            id: Uuid::new_v4(),
            name: "Admin".into(),
            role: Role::Admin,
        };
        let updated =
            UserService::update_profile(&store, &admin, target.id, Some("New Name"), None, None)
                .await
                .unwrap();
        assert_eq!(updated.name, "New Name");
    }

    #[tokio::test]
    async fn test_update_password_checks_current() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "Aisha Khan", "aisha@uni.pk", Role::Student).await;

        let wrong = UserService::update_password(&store, user.id, "nope", "Fresh1!pw").await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));

        UserService::update_password(&store, user.id, "Secret1!", "Fresh1!pw")
            .await
            .unwrap();
        let updated = UserService::get_user(&store, user.id).await.unwrap();
        assert!(verify_password("Fresh1!pw", &updated.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let store = MemoryStore::new();
        let result = UserService::delete_user(&store, Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}

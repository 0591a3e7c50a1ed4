//! Authentication service

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::Config,
    constants::OTP_LENGTH,
    error::{AppError, AppResult},
    models::{AccountStatus, Role, User, Verification, VerificationPurpose},
    store::{DocumentStore, Filter},
    utils::{
        crypto::{self, generate_otp, hash_password, verify_password},
        mailer::Mailer,
    },
};

use super::changes;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub name: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// New account data, already validated by the signup schema
#[derive(Debug, Clone)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cnic: Option<String>,
    pub roll_no: Option<String>,
    pub role: Role,
    pub password: String,
    pub image: Option<String>,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new account. The account stays `verification-pending`
    /// until its emailed OTP is confirmed.
    ///
    /// Field-level uniqueness was checked by the signup schema; the check is
    /// time-of-check only, so a store-level constraint still has the last
    /// word on conflicts.
    pub async fn signup(
        store: &dyn DocumentStore,
        mailer: &dyn Mailer,
        config: &Config,
        signup: Signup,
    ) -> AppResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: signup.name,
            email: signup.email,
            phone: signup.phone,
            cnic: signup.cnic,
            roll_no: signup.roll_no,
            role: signup.role,
            status: AccountStatus::VerificationPending,
            image: signup.image,
            password_hash: hash_password(&signup.password)?,
            created_at: now,
            updated_at: now,
        };

        let user = User::COLLECTION.insert(store, &user).await?;
        Self::send_otp(
            store,
            mailer,
            config,
            &user,
            VerificationPurpose::AccountActivation,
        )
        .await?;

        Ok(user)
    }

    /// Login with email and password
    pub async fn signin(
        store: &dyn DocumentStore,
        config: &Config,
        email: &str,
        password: &str,
    ) -> AppResult<(User, String, i64)> {
        let user = User::COLLECTION
            .find_one(store, &Filter::eq("email", email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        match user.status {
            AccountStatus::Active => {}
            AccountStatus::VerificationPending => {
                return Err(AppError::Forbidden(
                    "Account is pending verification".to_string(),
                ));
            }
            AccountStatus::Inactive => {
                return Err(AppError::Forbidden("Account is deactivated".to_string()));
            }
        }

        let (token, expires_in) = Self::generate_access_token(&user, config)?;
        Ok((user, token, expires_in))
    }

    /// Issue a fresh OTP for `purpose`, replacing any pending one
    pub async fn send_otp(
        store: &dyn DocumentStore,
        mailer: &dyn Mailer,
        config: &Config,
        user: &User,
        purpose: VerificationPurpose,
    ) -> AppResult<()> {
        let pending = Filter::id_eq("user", user.id).and(Filter::eq(
            "purpose",
            serde_json::to_value(purpose).map_err(|e| AppError::Internal(e.into()))?,
        ));
        Verification::COLLECTION.delete_one(store, &pending).await?;

        let otp = generate_otp(OTP_LENGTH);
        let verification = Verification {
            id: Uuid::new_v4(),
            user: user.id,
            otp_hash: crypto::hash_string(&otp),
            purpose,
            expires_at: Utc::now() + Duration::minutes(config.otp.expiry_minutes),
            created_at: Utc::now(),
        };
        Verification::COLLECTION.insert(store, &verification).await?;

        let subject = match purpose {
            VerificationPurpose::AccountActivation => "Verify your account",
            VerificationPurpose::PasswordReset => "Reset your password",
        };
        mailer
            .send(
                &user.email,
                subject,
                &format!("Your one-time passcode is {otp}. It expires in {} minutes.", config.otp.expiry_minutes),
            )
            .await?;

        Ok(())
    }

    /// Check an OTP and consume it. Activates the account when the purpose
    /// is account activation.
    pub async fn verify_otp(
        store: &dyn DocumentStore,
        email: &str,
        otp: &str,
        purpose: VerificationPurpose,
    ) -> AppResult<User> {
        let user = User::COLLECTION
            .find_one(store, &Filter::eq("email", email))
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let pending = Filter::id_eq("user", user.id).and(Filter::eq(
            "purpose",
            serde_json::to_value(purpose).map_err(|e| AppError::Internal(e.into()))?,
        ));
        let verification = Verification::COLLECTION
            .find_one(store, &pending)
            .await?
            .ok_or_else(|| AppError::InvalidInput("No pending verification".to_string()))?;

        if verification.is_expired() || !crypto::verify_hash(otp, &verification.otp_hash) {
            return Err(AppError::InvalidInput("Invalid or expired OTP".to_string()));
        }

        Verification::COLLECTION.delete_one(store, &pending).await?;

        if purpose == VerificationPurpose::AccountActivation {
            let updated = User::COLLECTION
                .update_one(
                    store,
                    &Filter::id_eq("id", user.id),
                    changes(serde_json::json!({
                        "status": AccountStatus::Active,
                        "updatedAt": Utc::now(),
                    })),
                )
                .await?;
            return updated.ok_or_else(|| AppError::NotFound("User not found".to_string()));
        }

        Ok(user)
    }

    /// Reset a forgotten password after OTP verification
    pub async fn reset_password(
        store: &dyn DocumentStore,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> AppResult<User> {
        let user =
            Self::verify_otp(store, email, otp, VerificationPurpose::PasswordReset).await?;

        User::COLLECTION
            .update_one(
                store,
                &Filter::id_eq("id", user.id),
                changes(serde_json::json!({
                    "passwordHash": hash_password(new_password)?,
                    "updatedAt": Utc::now(),
                })),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Generate a JWT access token for a user
    pub fn generate_access_token(user: &User, config: &Config) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_in = config.jwt.expiry_hours * 3600;

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            role: user.role,
            exp: (now + Duration::hours(config.jwt.expiry_hours)).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
        )?;

        Ok((token, expires_in))
    }

    /// Verify and decode a JWT access token
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_utils::test_config;
    use crate::utils::mailer::TracingMailer;

    fn signup_data(email: &str) -> Signup {
        Signup {
            name: "Aisha Khan".into(),
            email: email.into(),
            phone: None,
            cnic: None,
            roll_no: Some("21SW066".into()),
            role: Role::Student,
            password: "Secret1!".into(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_signup_starts_pending_and_stores_otp() {
        let store = MemoryStore::new();
        let config = test_config();

        let user = AuthService::signup(&store, &TracingMailer, &config, signup_data("a@uni.pk"))
            .await
            .unwrap();

        assert_eq!(user.status, AccountStatus::VerificationPending);
        let verification = Verification::COLLECTION
            .find_one(&store, &Filter::id_eq("user", user.id))
            .await
            .unwrap();
        assert!(verification.is_some());
    }

    #[tokio::test]
    async fn test_signin_rejects_pending_account() {
        let store = MemoryStore::new();
        let config = test_config();
        AuthService::signup(&store, &TracingMailer, &config, signup_data("a@uni.pk"))
            .await
            .unwrap();

        let result = AuthService::signin(&store, &config, "a@uni.pk", "Secret1!").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let store = MemoryStore::new();
        let config = test_config();
        AuthService::signup(&store, &TracingMailer, &config, signup_data("a@uni.pk"))
            .await
            .unwrap();

        let result = AuthService::signin(&store, &config, "a@uni.pk", "Wrong1!pw").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_token_round_trip() {
        let store = MemoryStore::new();
        let config = test_config();
        let user = AuthService::signup(&store, &TracingMailer, &config, signup_data("a@uni.pk"))
            .await
            .unwrap();

        let (token, expires_in) = AuthService::generate_access_token(&user, &config).unwrap();
        assert_eq!(expires_in, 3600);

        let claims = AuthService::verify_token(&token, &config.jwt.secret).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.role, Role::Student);

        assert!(AuthService::verify_token(&token, "other-secret").is_err());
    }
}

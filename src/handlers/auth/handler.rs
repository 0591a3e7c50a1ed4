//! Authentication handler implementations

use axum::{Json, extract::State, http::StatusCode};
use serde_json::Value;

use crate::{
    error::AppResult,
    handlers::{check, field_enum, field_str, file_name, required_str},
    models::VerificationPurpose,
    services::{AuthService, auth_service::Signup},
    state::AppState,
};

use super::{
    request::{
        reset_password_schema, send_otp_schema, signin_schema, signup_schema, verify_otp_schema,
    },
    response::{MessageResponse, SigninResponse, SignupResponse},
};

/// Register a new account; an activation OTP is emailed
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    check(&state, &payload, &signup_schema()).await?;

    let signup = Signup {
        name: required_str(&payload, "name")?.to_string(),
        email: required_str(&payload, "email")?.to_string(),
        phone: field_str(&payload, "phone").map(str::to_string),
        cnic: field_str(&payload, "cnic").map(str::to_string),
        roll_no: field_str(&payload, "rollNo").map(str::to_string),
        role: field_enum(&payload, "role")?,
        password: required_str(&payload, "password")?.to_string(),
        image: file_name(&payload, "image").map(str::to_string),
    };

    let user = AuthService::signup(state.store(), state.mailer(), state.config(), signup).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: user.into(),
            message: "Account created. Check your inbox for the verification code.".to_string(),
        }),
    ))
}

/// Login with email and password
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<SigninResponse>> {
    check(&state, &payload, &signin_schema()).await?;

    let (user, access_token, expires_in) = AuthService::signin(
        state.store(),
        state.config(),
        required_str(&payload, "email")?,
        required_str(&payload, "password")?,
    )
    .await?;

    Ok(Json(SigninResponse {
        user: user.into(),
        access_token,
        token_type: "Bearer".to_string(),
        expires_in,
    }))
}

/// Issue a fresh OTP for account activation or password reset
pub async fn send_otp(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<MessageResponse>> {
    check(&state, &payload, &send_otp_schema()).await?;

    let purpose: VerificationPurpose = field_enum(&payload, "purpose")?;
    let user = crate::services::UserService::get_user_by_email(
        state.store(),
        required_str(&payload, "email")?,
    )
    .await?;

    AuthService::send_otp(state.store(), state.mailer(), state.config(), &user, purpose).await?;
    Ok(Json(MessageResponse {
        message: "A one-time passcode has been sent to your email.".to_string(),
    }))
}

/// Confirm an activation OTP
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<MessageResponse>> {
    check(&state, &payload, &verify_otp_schema()).await?;

    AuthService::verify_otp(
        state.store(),
        required_str(&payload, "email")?,
        required_str(&payload, "otp")?,
        VerificationPurpose::AccountActivation,
    )
    .await?;
    Ok(Json(MessageResponse {
        message: "Account verified. You can sign in now.".to_string(),
    }))
}

/// Reset a forgotten password with an OTP
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<MessageResponse>> {
    check(&state, &payload, &reset_password_schema()).await?;

    AuthService::reset_password(
        state.store(),
        required_str(&payload, "email")?,
        required_str(&payload, "otp")?,
        required_str(&payload, "password")?,
    )
    .await?;
    Ok(Json(MessageResponse {
        message: "Password updated. You can sign in now.".to_string(),
    }))
}

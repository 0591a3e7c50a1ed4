//! Authentication response DTOs

use serde::Serialize;

use crate::handlers::users::response::UserResponse;

/// Signin response with the issued access token
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Signup response: the pending account plus a hint about the emailed OTP
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: UserResponse,
    pub message: String,
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

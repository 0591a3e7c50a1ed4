//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;

use crate::constants::{
    DEFAULT_JWT_EXPIRY_HOURS, DEFAULT_OTP_EXPIRY_MINUTES, DEFAULT_PAGE_SIZE, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub otp: OtpConfig,
    pub pagination: PaginationConfig,
    pub mail: MailConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

/// One-time-passcode configuration
#[derive(Debug, Clone)]
pub struct OtpConfig {
    pub expiry_minutes: i64,
}

/// Pagination configuration
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// Records per page when the request does not specify a count
    pub default_page_size: u64,
}

/// Outbound mail configuration
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub from_address: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            otp: OtpConfig::from_env()?,
            pagination: PaginationConfig::from_env()?,
            mail: MailConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| DEFAULT_JWT_EXPIRY_HOURS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_EXPIRY_HOURS".to_string()))?,
        })
    }
}

impl OtpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            expiry_minutes: env::var("OTP_EXPIRY_MINUTES")
                .unwrap_or_else(|_| DEFAULT_OTP_EXPIRY_MINUTES.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("OTP_EXPIRY_MINUTES".to_string()))?,
        })
    }
}

impl PaginationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            default_page_size: env::var("DEFAULT_PAGE_SIZE")
                .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DEFAULT_PAGE_SIZE".to_string()))?,
        })
    }
}

impl MailConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            from_address: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@fypms.local".to_string()),
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        // No DEFAULT_PAGE_SIZE in the test environment
        unsafe { env::remove_var("DEFAULT_PAGE_SIZE") };
        let pagination = PaginationConfig::from_env().unwrap();
        assert_eq!(pagination.default_page_size, DEFAULT_PAGE_SIZE);
    }
}

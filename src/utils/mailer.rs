//! Outbound mail seam
//!
//! Actual delivery (SMTP, provider APIs) is an external collaborator; the
//! application only depends on the [`Mailer`] trait. The bundled
//! implementation logs messages through `tracing`, which is what tests and
//! development runs use.

use async_trait::async_trait;

use crate::error::AppResult;

/// Sends transactional mail (OTP codes, notifications)
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// A mailer that records messages in the log instead of delivering them
#[derive(Debug, Clone, Default)]
pub struct TracingMailer;

#[async_trait]
impl Mailer for TracingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        tracing::info!(to = %to, subject = %subject, body = %body, "Outbound mail");
        Ok(())
    }
}

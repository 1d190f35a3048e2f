//! Mail Delivery
//!
//! Outbound mail behind a trait so handlers and use cases stay independent
//! of the delivery mechanism. The default implementation writes the links
//! to the log, which is what development and tests need.

use crate::domain::value_object::email::Email;

/// Mail delivery error
#[derive(Debug, thiserror::Error)]
#[error("mail delivery failed: {0}")]
pub struct MailError(pub String);

/// Outbound mail sender
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send_verification(&self, to: &Email, link: &str) -> Result<(), MailError>;
    async fn send_password_reset(&self, to: &Email, link: &str) -> Result<(), MailError>;
}

/// Logs outgoing mail instead of delivering it
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send_verification(&self, to: &Email, link: &str) -> Result<(), MailError> {
        tracing::info!(to = %to, link = %link, "Verification email");
        Ok(())
    }

    async fn send_password_reset(&self, to: &Email, link: &str) -> Result<(), MailError> {
        tracing::info!(to = %to, link = %link, "Password reset email");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        let mailer = LogMailer;
        let email = Email::new("user@example.com").unwrap();
        // Fully qualified: LogMailer satisfies both trait variants
        assert!(
            Mailer::send_verification(&mailer, &email, "http://localhost/verify/abc")
                .await
                .is_ok()
        );
        assert!(
            Mailer::send_password_reset(&mailer, &email, "http://localhost/reset/abc")
                .await
                .is_ok()
        );
    }
}

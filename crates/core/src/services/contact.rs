//! Contact form relay.

use fundacja_common::config::MailConfig;
use fundacja_common::{AppError, AppResult};
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;
use validator::Validate;

/// A contact form submission.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 300))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

/// Relays contact form submissions to the foundation inbox over SMTP.
/// Cleanly disabled when no mail section is configured.
#[derive(Clone)]
pub struct ContactService {
    mail: Option<MailConfig>,
}

impl ContactService {
    /// Create a new contact service.
    #[must_use]
    pub const fn new(mail: Option<MailConfig>) -> Self {
        Self { mail }
    }

    /// Validate and relay one submission.
    pub async fn send(&self, input: ContactInput) -> AppResult<()> {
        input.validate()?;

        let Some(config) = &self.mail else {
            return Err(AppError::Config("mail is not configured".to_string()));
        };

        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid from address: {e}")))?;
        let to: Mailbox = config
            .to_address
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid to address: {e}")))?;
        let reply_to: Mailbox = input
            .email
            .parse()
            .map_err(|_| AppError::Validation("Invalid sender address".to_string()))?;

        let message = Message::builder()
            .from(from)
            .reply_to(reply_to)
            .to(to)
            .subject(format!("[Kontakt] {}", input.subject))
            .body(format!(
                "Od: {} <{}>\n\n{}",
                input.name, input.email, input.message
            ))
            .map_err(|e| AppError::Mail(e.to_string()))?;

        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| AppError::Mail(e.to_string()))?
                .credentials(Credentials::new(
                    config.smtp_username.clone(),
                    config.smtp_password.clone(),
                ))
                .build();

        mailer
            .send(message)
            .await
            .map_err(|e| AppError::Upstream(format!("SMTP relay failed: {e}")))?;

        tracing::info!(subject = %input.subject, "Relayed contact submission");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ContactInput {
        ContactInput {
            name: "Jan Kowalski".to_string(),
            email: "jan@example.org".to_string(),
            subject: "Pytanie".to_string(),
            message: "Tresc wiadomosci".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_mail_is_a_config_error() {
        let service = ContactService::new(None);
        let result = service.send(valid_input()).await;

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected_before_config_check() {
        let service = ContactService::new(None);
        let mut input = valid_input();
        input.email = "not-an-address".to_string();

        let result = service.send(input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

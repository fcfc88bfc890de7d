//! Code delivery.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::info;

use crate::domain::auth_codes::models::Contact;

#[derive(Debug, Error)]
#[error("failed to deliver code to {contact}: {reason}")]
pub struct SendError {
    pub contact: String,
    pub reason: String,
}

/// Delivers a composed message to a contact.
#[automock]
#[async_trait]
pub trait CodeSender: Send + Sync {
    async fn send_email(&self, email: &str, text: &str) -> Result<(), SendError>;

    async fn send_sms(&self, phone: &str, text: &str) -> Result<(), SendError>;
}

/// Compose the message for `contact` and hand it to `sender`.
pub(crate) async fn deliver(
    sender: &dyn CodeSender,
    contact: &Contact,
    code: &str,
) -> Result<(), SendError> {
    match contact {
        Contact::Email(email) => {
            sender
                .send_email(email, &format!("Ваш код подтверждения: {code}"))
                .await
        }
        Contact::Phone(phone) => sender.send_sms(phone, &format!("Код: {code}")).await,
    }
}

/// Sender that only records the dispatch in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCodeSender;

#[async_trait]
impl CodeSender for LogCodeSender {
    async fn send_email(&self, email: &str, text: &str) -> Result<(), SendError> {
        info!(email, text, "email code dispatched");

        Ok(())
    }

    async fn send_sms(&self, phone: &str, text: &str) -> Result<(), SendError> {
        info!(phone, text, "sms code dispatched");

        Ok(())
    }
}

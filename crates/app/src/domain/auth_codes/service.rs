//! Auth codes service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rand::Rng;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::auth_codes::{
        data::SendCode,
        errors::AuthCodesServiceError,
        models::Contact,
        repository::PgAuthCodesRepository,
        sender::{CodeSender, deliver},
    },
};

/// Codes a contact may receive within 24 hours.
const MAX_DAILY_CODES: i64 = 5;

const CODE_TTL: SignedDuration = SignedDuration::from_mins(5);

#[derive(Clone)]
pub struct PgAuthCodesService {
    db: Db,
    repository: PgAuthCodesRepository,
    sender: Arc<dyn CodeSender>,
}

impl PgAuthCodesService {
    #[must_use]
    pub fn new(db: Db, sender: Arc<dyn CodeSender>) -> Self {
        Self {
            db,
            repository: PgAuthCodesRepository::new(),
            sender,
        }
    }
}

impl fmt::Debug for PgAuthCodesService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgAuthCodesService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

/// A random four digit code, zero padded.
fn generate_code() -> String {
    format!("{:04}", rand::thread_rng().gen_range(0..10_000))
}

#[async_trait]
impl AuthCodesService for PgAuthCodesService {
    #[tracing::instrument(name = "auth_codes.service.send_code", skip_all, err)]
    async fn send_code(&self, request: SendCode) -> Result<(), AuthCodesServiceError> {
        let contact = Contact::try_from(request)?;

        let mut tx = self.db.begin().await?;

        let sent = self.repository.count_recent(&mut tx, &contact).await?;

        if sent >= MAX_DAILY_CODES {
            info!(%contact, sent, "code rate limit reached");

            return Err(AuthCodesServiceError::TooManyAttempts);
        }

        let code = match self.repository.active_code(&mut tx, &contact).await? {
            Some(active) => {
                debug!(id = active.id, "reusing active code");

                active.code
            }
            None => {
                let expires_at = Timestamp::now() + CODE_TTL;

                self.repository
                    .insert_code(&mut tx, &contact, &generate_code(), expires_at)
                    .await?
                    .code
            }
        };

        tx.commit().await?;

        deliver(self.sender.as_ref(), &contact, &code).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthCodesService: Send + Sync {
    /// Issue a confirmation code to the contact in `request`, reusing a still valid one.
    async fn send_code(&self, request: SendCode) -> Result<(), AuthCodesServiceError>;
}

//! Auth Codes Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::auth_codes::models::{AuthCodeRecord, Contact};

const COUNT_RECENT_CODES_SQL: &str = include_str!("sql/count_recent_codes.sql");
const GET_ACTIVE_CODE_SQL: &str = include_str!("sql/get_active_code.sql");
const INSERT_CODE_SQL: &str = include_str!("sql/insert_code.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthCodesRepository;

impl PgAuthCodesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Codes issued to `contact` during the last 24 hours.
    pub(crate) async fn count_recent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contact: &Contact,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_RECENT_CODES_SQL)
            .bind(contact.email())
            .bind(contact.phone())
            .fetch_one(&mut **tx)
            .await
    }

    /// The newest unused, unexpired code of `contact`.
    pub(crate) async fn active_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contact: &Contact,
    ) -> Result<Option<AuthCodeRecord>, sqlx::Error> {
        query_as::<Postgres, AuthCodeRecord>(GET_ACTIVE_CODE_SQL)
            .bind(contact.email())
            .bind(contact.phone())
            .fetch_optional(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "auth_codes.repository.insert_code",
        skip(self, tx, code),
        fields(contact = %contact),
        err
    )]
    pub(crate) async fn insert_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contact: &Contact,
        code: &str,
        expires_at: Timestamp,
    ) -> Result<AuthCodeRecord, sqlx::Error> {
        query_as::<Postgres, AuthCodeRecord>(INSERT_CODE_SQL)
            .bind(contact.email())
            .bind(contact.phone())
            .bind(code)
            .bind(SqlxTimestamp::from(expires_at))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AuthCodeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            code: row.try_get("code")?,
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            used: row.try_get("used")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

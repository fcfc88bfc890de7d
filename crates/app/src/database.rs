//! Database connection management

use std::time::Duration;

use sqlx::{
    PgPool, Postgres, Transaction,
    error::ErrorKind,
    postgres::PgPoolOptions,
};
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

/// Postgres `query_canceled`, raised for both statement timeouts and explicit cancellation.
const QUERY_CANCELED: &str = "57014";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a plain transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Begin a transaction that concurrently dispatched writes can share.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired.
    pub async fn begin_unit_of_work(&self) -> Result<UnitOfWork, sqlx::Error> {
        Ok(UnitOfWork::new(self.begin().await?))
    }
}

/// One transaction shared by every statement of a reconciliation.
///
/// A Postgres connection runs one statement at a time, so sibling writes take turns on the
/// lock. Dropping the unit of work without calling [`UnitOfWork::commit`] rolls back.
#[derive(Debug)]
pub struct UnitOfWork {
    tx: Mutex<Transaction<'static, Postgres>>,
}

impl UnitOfWork {
    #[must_use]
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx: Mutex::new(tx) }
    }

    pub async fn lock(&self) -> MutexGuard<'_, Transaction<'static, Postgres>> {
        self.tx.lock().await
    }

    /// Commit every statement executed through this unit of work.
    ///
    /// # Errors
    ///
    /// Returns an error when the commit fails.
    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.into_inner().commit().await
    }
}

/// Normalized persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("database operation timed out")]
    Timeout,

    #[error("database operation was canceled")]
    Canceled,

    #[error("record already exists")]
    AlreadyExists,

    #[error("related record not found")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => return Self::NotFound,
            sqlx::Error::PoolTimedOut => return Self::Timeout,
            _ => {}
        }

        if let Some(database_error) = error.as_database_error() {
            if database_error.code().as_deref() == Some(QUERY_CANCELED) {
                return if database_error.message().contains("statement timeout") {
                    Self::Timeout
                } else {
                    Self::Canceled
                };
            }

            match database_error.kind() {
                ErrorKind::UniqueViolation => return Self::AlreadyExists,
                ErrorKind::ForeignKeyViolation => return Self::InvalidReference,
                _ => {}
            }
        }

        Self::Sql(error)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

/// Apply the embedded migrations.
///
/// # Errors
///
/// Returns an error when a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

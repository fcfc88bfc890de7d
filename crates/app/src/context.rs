//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        auth_codes::{AuthCodesService, PgAuthCodesService, sender::CodeSender},
        categories::{CategoriesService, PgCategoriesService},
        prices::{PgPricesService, PricesService},
        properties::{PgPropertiesService, PropertiesService},
        storages::{PgStoragesService, StoragesService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Pool settings for [`AppContext::from_database_url`].
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub run_migrations: bool,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
            run_migrations: false,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub categories: Arc<dyn CategoriesService>,
    pub prices: Arc<dyn PricesService>,
    pub storages: Arc<dyn StoragesService>,
    pub properties: Arc<dyn PropertiesService>,
    pub auth_codes: Arc<dyn AuthCodesService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(
        url: &str,
        options: &DatabaseOptions,
        sender: Arc<dyn CodeSender>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url, options.max_connections, options.acquire_timeout)
            .await
            .map_err(AppInitError::Database)?;

        if options.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        let db = Db::new(pool);

        Ok(Self {
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            prices: Arc::new(PgPricesService::new(db.clone())),
            storages: Arc::new(PgStoragesService::new(db.clone())),
            properties: Arc::new(PgPropertiesService::new(db.clone())),
            auth_codes: Arc::new(PgAuthCodesService::new(db, sender)),
        })
    }
}

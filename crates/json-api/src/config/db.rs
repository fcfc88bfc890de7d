//! Database Config

use clap::Args;

use catalog_app::context::DatabaseOptions;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub database_max_connections: u32,

    /// Seconds to wait for a pooled connection
    #[arg(long, env = "DATABASE_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub database_acquire_timeout_secs: u64,

    /// Apply pending migrations on startup
    #[arg(long, env = "DATABASE_RUN_MIGRATIONS", default_value_t = false)]
    pub database_run_migrations: bool,
}

impl DatabaseConfig {
    #[must_use]
    pub fn options(&self) -> DatabaseOptions {
        DatabaseOptions {
            max_connections: self.database_max_connections,
            acquire_timeout: std::time::Duration::from_secs(self.database_acquire_timeout_secs),
            run_migrations: self.database_run_migrations,
        }
    }
}

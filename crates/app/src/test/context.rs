//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::domain::{
    auth_codes::{PgAuthCodesService, sender::LogCodeSender},
    categories::PgCategoriesService,
    prices::PgPricesService,
    properties::PgPropertiesService,
    storages::PgStoragesService,
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub categories: PgCategoriesService,
    pub prices: PgPricesService,
    pub storages: PgStoragesService,
    pub properties: PgPropertiesService,
    pub auth_codes: PgAuthCodesService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = test_db.db();

        Self {
            categories: PgCategoriesService::new(db.clone()),
            prices: PgPricesService::new(db.clone()),
            storages: PgStoragesService::new(db.clone()),
            properties: PgPropertiesService::new(db.clone()),
            auth_codes: PgAuthCodesService::new(db, Arc::new(LogCodeSender)),
            db: test_db,
        }
    }
}

//! Properties service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::properties::{
        data::PropertiesUpsert,
        errors::PropertiesServiceError,
        records::PropertyRecord,
        repositories::{PgPropertiesRepository, PgPropertyValuesRepository},
    },
    reconcile::{DeletePolicy, ReconcileStats, Reconciler},
};

#[derive(Debug, Clone)]
pub struct PgPropertiesService {
    db: Db,
    properties: PgPropertiesRepository,
    reconciler: Reconciler<PgPropertiesRepository, PgPropertyValuesRepository>,
}

impl PgPropertiesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            properties: PgPropertiesRepository::new(),
            reconciler: Reconciler::new(
                PgPropertiesRepository::new(),
                PgPropertyValuesRepository::new(),
                DeletePolicy::DeleteMissing,
            ),
        }
    }
}

#[async_trait]
impl PropertiesService for PgPropertiesService {
    #[tracing::instrument(name = "properties.service.upsert", skip_all, err)]
    async fn upsert(
        &self,
        upsert: PropertiesUpsert,
    ) -> Result<ReconcileStats, PropertiesServiceError> {
        let (properties, values) = upsert.into_desired()?;

        let uow = self
            .db
            .begin_unit_of_work()
            .await
            .map_err(PropertiesServiceError::properties)?;

        let stats = self.reconciler.run(&uow, properties, values).await?;

        uow.commit().await.map_err(PropertiesServiceError::properties)?;

        Ok(stats)
    }

    async fn list_properties(&self) -> Result<Vec<PropertyRecord>, PropertiesServiceError> {
        let mut tx = self.db.begin().await?;

        let properties = self.properties.list_properties(&mut tx).await?;

        tx.commit().await?;

        if properties.is_empty() {
            return Err(PropertiesServiceError::NotFound);
        }

        Ok(properties)
    }
}

#[automock]
#[async_trait]
pub trait PropertiesService: Send + Sync {
    /// Reconcile properties and their values with the submitted desired state.
    async fn upsert(
        &self,
        upsert: PropertiesUpsert,
    ) -> Result<ReconcileStats, PropertiesServiceError>;

    /// Lists every property, failing with `NotFound` when there are none.
    async fn list_properties(&self) -> Result<Vec<PropertyRecord>, PropertiesServiceError>;
}

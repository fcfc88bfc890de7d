//! Storage Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::domain::storages::records::StorageRecord;

use crate::{errors::ApiError, extensions::*, state::State, storages::errors::into_api_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StorageResponse {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub active: String,
}

impl From<StorageRecord> for StorageResponse {
    fn from(record: StorageRecord) -> Self {
        StorageResponse {
            id: record.id,
            uuid: record.uuid.into(),
            name: record.name,
            active: record.active.as_str().to_owned(),
        }
    }
}

#[endpoint(tags("storages"), summary = "List Storages")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<StorageResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let storages = state
        .app
        .storages
        .list_storages()
        .await
        .map_err(into_api_error)?;

    Ok(Json(storages.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;

    use catalog_app::domain::storages::{MockStoragesService, StoragesServiceError};

    use crate::test_helpers::storages_service;

    use super::*;

    #[tokio::test]
    async fn test_no_storages_returns_404() {
        let mut storages = MockStoragesService::new();

        storages
            .expect_list_storages()
            .once()
            .return_once(|| Err(StoragesServiceError::NotFound));

        let res = TestClient::get("http://example.com/storages")
            .send(&storages_service(
                storages,
                Router::with_path("storages").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}

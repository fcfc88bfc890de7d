//! Upsert Storages Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::domain::storages::data::{
    ProductStorageData, ProductStoragesData, StorageData, StoragesGeneral, StoragesUpsert,
};

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    stats::{self, AssociationStatsResponse, MasterStatsResponse},
    storages::errors::into_api_error,
};

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpsertStoragesRequest {
    pub general: Option<StoragesGeneralRequest>,
    pub data: Option<Vec<ProductStoragesRequest>>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoragesGeneralRequest {
    pub storages: Option<Vec<StorageRequest>>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct StorageRequest {
    pub uuid: Option<Uuid>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub active: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductStoragesRequest {
    pub product_uuid: Option<Uuid>,
    pub storages: Option<Vec<ProductStorageRequest>>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductStorageRequest {
    pub storage_uuid: Option<Uuid>,

    #[serde(default)]
    pub active: String,

    /// Units of the product kept in the storage
    #[serde(default)]
    pub quantity: i64,
}

impl From<StorageRequest> for StorageData {
    fn from(request: StorageRequest) -> Self {
        StorageData {
            uuid: request.uuid,
            name: request.name,
            active: request.active,
        }
    }
}

impl From<ProductStorageRequest> for ProductStorageData {
    fn from(request: ProductStorageRequest) -> Self {
        ProductStorageData {
            storage_uuid: request.storage_uuid,
            active: request.active,
            quantity: request.quantity,
        }
    }
}

impl From<UpsertStoragesRequest> for StoragesUpsert {
    fn from(request: UpsertStoragesRequest) -> Self {
        StoragesUpsert {
            general: request.general.map(|general| StoragesGeneral {
                storages: general
                    .storages
                    .map(|storages| storages.into_iter().map(Into::into).collect()),
            }),
            data: request.data.map(|data| {
                data.into_iter()
                    .map(|product| ProductStoragesData {
                        product_uuid: product.product_uuid,
                        storages: product
                            .storages
                            .map(|storages| storages.into_iter().map(Into::into).collect()),
                    })
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpsertStoragesResponse {
    pub storage: MasterStatsResponse,
    pub product_storage: AssociationStatsResponse,
}

/// Upsert Storages Handler
///
/// Reconciles storages and product stock with the submitted state.
#[endpoint(
    tags("storages"),
    summary = "Upsert Storages",
    responses(
        (status_code = StatusCode::CREATED, description = "Storages reconciled"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UpsertStoragesResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body: UpsertStoragesRequest = req.json_or_400().await?;

    let result = state
        .app
        .storages
        .upsert(body.into())
        .await
        .map_err(into_api_error)?;

    stats::record("storage", "storage", "product_storage", &result);

    res.status_code(StatusCode::CREATED);

    Ok(Json(UpsertStoragesResponse {
        storage: result.masters.into(),
        product_storage: result.associations.into(),
    }))
}

//! Upsert Prices Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::domain::prices::data::{
    PricesGeneral, PricesUpsert, ProductPriceData, ProductPricesData, TypePriceData,
};

use crate::{
    errors::ApiError,
    extensions::*,
    prices::errors::into_api_error,
    state::State,
    stats::{self, AssociationStatsResponse, MasterStatsResponse},
};

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpsertPricesRequest {
    /// Every price type; types missing from a non-empty list are deleted
    pub general: Option<PricesGeneralRequest>,

    pub data: Option<Vec<ProductPricesRequest>>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PricesGeneralRequest {
    pub prices: Option<Vec<TypePriceRequest>>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct TypePriceRequest {
    pub uuid: Option<Uuid>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub active: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductPricesRequest {
    pub product_uuid: Option<Uuid>,
    pub prices: Option<Vec<ProductPriceRequest>>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductPriceRequest {
    pub type_price_uuid: Option<Uuid>,

    #[serde(default)]
    pub active: String,

    #[serde(default)]
    pub price: f64,
}

impl From<UpsertPricesRequest> for PricesUpsert {
    fn from(request: UpsertPricesRequest) -> Self {
        PricesUpsert {
            general: request.general.map(|general| PricesGeneral {
                prices: general.prices.map(|prices| {
                    prices
                        .into_iter()
                        .map(|price| TypePriceData {
                            uuid: price.uuid,
                            name: price.name,
                            active: price.active,
                        })
                        .collect()
                }),
            }),
            data: request.data.map(|data| {
                data.into_iter()
                    .map(|product| ProductPricesData {
                        product_uuid: product.product_uuid,
                        prices: product.prices.map(|prices| {
                            prices
                                .into_iter()
                                .map(|price| ProductPriceData {
                                    type_price_uuid: price.type_price_uuid,
                                    active: price.active,
                                    price: price.price,
                                })
                                .collect()
                        }),
                    })
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpsertPricesResponse {
    pub type_price: MasterStatsResponse,
    pub product_price: AssociationStatsResponse,
}

/// Upsert Prices Handler
///
/// Reconciles price types and product prices with the submitted state.
#[endpoint(
    tags("prices"),
    summary = "Upsert Prices",
    responses(
        (status_code = StatusCode::CREATED, description = "Prices reconciled"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UpsertPricesResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body: UpsertPricesRequest = req.json_or_400().await?;

    let result = state
        .app
        .prices
        .upsert(body.into())
        .await
        .map_err(into_api_error)?;

    stats::record("price", "type_price", "product_price", &result);

    res.status_code(StatusCode::CREATED);

    Ok(Json(UpsertPricesResponse {
        type_price: result.masters.into(),
        product_price: result.associations.into(),
    }))
}

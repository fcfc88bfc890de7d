//! Price Type Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::domain::prices::records::TypePriceRecord;

use crate::{errors::ApiError, extensions::*, prices::errors::into_api_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TypePriceResponse {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub active: String,
}

impl From<TypePriceRecord> for TypePriceResponse {
    fn from(record: TypePriceRecord) -> Self {
        TypePriceResponse {
            id: record.id,
            uuid: record.uuid.into(),
            name: record.name,
            active: record.active.as_str().to_owned(),
        }
    }
}

/// Price Type Index Handler
#[endpoint(tags("prices"), summary = "List Price Types")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<TypePriceResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let type_prices = state
        .app
        .prices
        .list_type_prices()
        .await
        .map_err(into_api_error)?;

    Ok(Json(type_prices.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use catalog_app::domain::{
        Active,
        prices::{MockPricesService, PricesServiceError, models::TypePriceUuid},
    };

    use crate::{errors::ErrorResponse, test_helpers::prices_service};

    use super::*;

    fn make_service(prices: MockPricesService) -> Service {
        prices_service(prices, Router::with_path("type-price").get(handler))
    }

    #[tokio::test]
    async fn test_list_type_prices() -> TestResult {
        let uuid = TypePriceUuid::new();

        let mut prices = MockPricesService::new();

        prices.expect_list_type_prices().once().return_once(move || {
            Ok(vec![TypePriceRecord {
                id: 7,
                uuid,
                name: "Опт".to_owned(),
                active: Active::No,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            }])
        });

        let mut res = TestClient::get("http://example.com/type-price")
            .send(&make_service(prices))
            .await;

        let body: Vec<TypePriceResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 1, "one price type");
        assert_eq!(body[0].uuid, uuid.into_uuid());
        assert_eq!(body[0].active, "N");

        Ok(())
    }

    #[tokio::test]
    async fn test_no_type_prices_returns_404() -> TestResult {
        let mut prices = MockPricesService::new();

        prices
            .expect_list_type_prices()
            .once()
            .return_once(|| Err(PricesServiceError::NotFound));

        let mut res = TestClient::get("http://example.com/type-price")
            .send(&make_service(prices))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "типы цен не найдены");

        Ok(())
    }
}

//! Property Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::domain::properties::records::PropertyRecord;

use crate::{errors::ApiError, extensions::*, properties::errors::into_api_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PropertyResponse {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,

    #[serde(rename = "type")]
    pub kind: String,
}

impl From<PropertyRecord> for PropertyResponse {
    fn from(record: PropertyRecord) -> Self {
        PropertyResponse {
            id: record.id,
            uuid: record.uuid.into(),
            name: record.name,
            slug: record.slug,
            kind: record.kind,
        }
    }
}

/// Property Index Handler
#[endpoint(tags("properties"), summary = "List Properties")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<PropertyResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let properties = state
        .app
        .properties
        .list_properties()
        .await
        .map_err(into_api_error)?;

    Ok(Json(properties.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use catalog_app::domain::properties::{MockPropertiesService, models::PropertyUuid};

    use crate::test_helpers::properties_service;

    use super::*;

    #[tokio::test]
    async fn test_kind_is_written_as_type() -> TestResult {
        let mut properties = MockPropertiesService::new();

        properties.expect_list_properties().once().return_once(|| {
            Ok(vec![PropertyRecord {
                id: 1,
                uuid: PropertyUuid::new(),
                name: "Цвет".to_owned(),
                slug: "tsvet".to_owned(),
                kind: "list".to_owned(),
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            }])
        });

        let mut res = TestClient::get("http://example.com/properties")
            .send(&properties_service(
                properties,
                Router::with_path("properties").get(handler),
            ))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body[0]["type"], "list");
        assert_eq!(body[0]["slug"], "tsvet");

        Ok(())
    }
}

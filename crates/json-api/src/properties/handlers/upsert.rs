//! Upsert Properties Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::domain::properties::data::{
    PropertiesGeneral, PropertiesUpsert, PropertyData, PropertyValueData, PropertyValuesData,
};

use crate::{
    errors::ApiError,
    extensions::*,
    properties::errors::into_api_error,
    state::State,
    stats::{self, AssociationStatsResponse, MasterStatsResponse},
};

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpsertPropertiesRequest {
    pub general: Option<PropertiesGeneralRequest>,
    pub data: Option<Vec<PropertyValuesRequest>>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PropertiesGeneralRequest {
    pub properties: Option<Vec<PropertyRequest>>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PropertyRequest {
    pub uuid: Option<Uuid>,

    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PropertyValuesRequest {
    pub property_uuid: Option<Uuid>,
    pub values: Option<Vec<PropertyValueRequest>>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PropertyValueRequest {
    /// Identifies the value within its property
    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub value: String,
}

impl From<UpsertPropertiesRequest> for PropertiesUpsert {
    fn from(request: UpsertPropertiesRequest) -> Self {
        PropertiesUpsert {
            general: request.general.map(|general| PropertiesGeneral {
                properties: general.properties.map(|properties| {
                    properties
                        .into_iter()
                        .map(|property| PropertyData {
                            uuid: property.uuid,
                            name: property.name,
                            kind: property.kind,
                        })
                        .collect()
                }),
            }),
            data: request.data.map(|data| {
                data.into_iter()
                    .map(|property| PropertyValuesData {
                        property_uuid: property.property_uuid,
                        values: property.values.map(|values| {
                            values
                                .into_iter()
                                .map(|value| PropertyValueData {
                                    key: value.key,
                                    value: value.value,
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
pub(crate) struct UpsertPropertiesResponse {
    pub property: MasterStatsResponse,
    pub property_value: AssociationStatsResponse,
}

/// Upsert Properties Handler
///
/// Reconciles properties and their values with the submitted state.
#[endpoint(
    tags("properties"),
    summary = "Upsert Properties",
    responses(
        (status_code = StatusCode::CREATED, description = "Properties reconciled"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UpsertPropertiesResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body: UpsertPropertiesRequest = req.json_or_400().await?;

    let result = state
        .app
        .properties
        .upsert(body.into())
        .await
        .map_err(into_api_error)?;

    stats::record("property", "property", "property_value", &result);

    res.status_code(StatusCode::CREATED);

    Ok(Json(UpsertPropertiesResponse {
        property: result.masters.into(),
        property_value: result.associations.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use catalog_app::{
        domain::properties::MockPropertiesService,
        reconcile::{AssociationStats, MasterStats, ReconcileStats},
    };

    use crate::test_helpers::properties_service;

    use super::*;

    #[tokio::test]
    async fn test_type_is_read_into_kind() -> TestResult {
        let color = Uuid::now_v7();

        let mut properties = MockPropertiesService::new();

        properties
            .expect_upsert()
            .once()
            .withf(move |upsert| {
                upsert
                    .general
                    .as_ref()
                    .and_then(|general| general.properties.as_ref())
                    .is_some_and(|properties| {
                        properties
                            .iter()
                            .all(|property| property.uuid == Some(color) && property.kind == "list")
                    })
            })
            .return_once(|_| {
                Ok(ReconcileStats {
                    masters: MasterStats {
                        count_deleted: 0,
                        count_inserted: 1,
                        count_updated: 0,
                    },
                    associations: AssociationStats {
                        count_inserted: 2,
                        count_updated: 0,
                    },
                })
            });

        let mut res = TestClient::post("http://example.com/upsert")
            .json(&json!({
                "general": { "properties": [{ "uuid": color, "name": "Цвет", "type": "list" }] },
                "data": [{
                    "property_uuid": color,
                    "values": [
                        { "key": "red", "value": "Красный" },
                        { "key": "blue", "value": "Синий" },
                    ],
                }],
            }))
            .send(&properties_service(
                properties,
                Router::with_path("upsert").post(handler),
            ))
            .await;

        let body: UpsertPropertiesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.property.count_inserted, 1);
        assert_eq!(body.property_value.count_inserted, 2);

        Ok(())
    }
}

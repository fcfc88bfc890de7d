//! Storage upsert payload.

use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::{
        Active,
        products::ProductUuid,
        storages::models::{ProductStorage, Storage, StorageUuid},
    },
    validation::{self, FieldErrors, required},
};

/// Desired state of storages and product quantities.
#[derive(Debug, Clone, Default, Validate)]
pub struct StoragesUpsert {
    pub general: Option<StoragesGeneral>,

    #[validate(required)]
    pub data: Option<Vec<ProductStoragesData>>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct StoragesGeneral {
    #[validate(required)]
    pub storages: Option<Vec<StorageData>>,
}

#[derive(Debug, Clone, Default, Validate, serde::Serialize)]
pub struct StorageData {
    #[validate(required)]
    pub uuid: Option<Uuid>,

    #[validate(length(min = 1, code = "required"))]
    pub name: String,

    #[validate(
        length(min = 1, code = "required"),
        custom(function = "crate::validation::one_of_active")
    )]
    pub active: String,
}

#[derive(Debug, Clone, Default, Validate, serde::Serialize)]
pub struct ProductStoragesData {
    #[validate(required)]
    pub product_uuid: Option<Uuid>,

    #[validate(required)]
    pub storages: Option<Vec<ProductStorageData>>,
}

#[derive(Debug, Clone, Default, Validate, serde::Serialize)]
pub struct ProductStorageData {
    #[validate(required)]
    pub storage_uuid: Option<Uuid>,

    #[validate(
        length(min = 1, code = "required"),
        custom(function = "crate::validation::one_of_active")
    )]
    pub active: String,

    #[validate(range(min = 0, code = "gte"))]
    pub quantity: i64,
}

pub(crate) type DesiredStorages = (Option<Vec<Storage>>, Vec<ProductStorage>);

impl StoragesUpsert {
    pub(crate) fn into_desired(self) -> Result<DesiredStorages, FieldErrors> {
        validation::check(&self)?;

        if let Some(general) = &self.general {
            validation::check(general)?;
            validation::check_each(general.storages.iter().flatten())?;
        }

        let data = required(self.data, "data")?;

        validation::check_each(&data)?;

        for product in &data {
            validation::check_each(product.storages.iter().flatten())?;
        }

        let storages = self
            .general
            .and_then(|general| general.storages)
            .map(|storages| {
                storages
                    .into_iter()
                    .map(Storage::try_from)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let mut product_storages = Vec::new();

        for product in data {
            let product_uuid = ProductUuid::from_uuid(required(product.product_uuid, "product_uuid")?);

            for stock in required(product.storages, "storages")? {
                product_storages.push(ProductStorage {
                    product_uuid,
                    storage_uuid: StorageUuid::from_uuid(required(
                        stock.storage_uuid,
                        "storage_uuid",
                    )?),
                    active: Active::parse_field(&stock.active, "active")?,
                    quantity: stock.quantity,
                });
            }
        }

        Ok((storages, product_storages))
    }
}

impl TryFrom<StorageData> for Storage {
    type Error = FieldErrors;

    fn try_from(data: StorageData) -> Result<Self, Self::Error> {
        Ok(Self {
            uuid: StorageUuid::from_uuid(required(data.uuid, "uuid")?),
            active: Active::parse_field(&data.active, "active")?,
            name: data.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_active_flag_is_reported() {
        let upsert = StoragesUpsert {
            general: Some(StoragesGeneral {
                storages: Some(vec![StorageData {
                    uuid: Some(Uuid::now_v7()),
                    name: "Основной склад".to_owned(),
                    active: "X".to_owned(),
                }]),
            }),
            data: Some(Vec::new()),
        };

        let errors = upsert.into_desired().err().unwrap_or_default();

        assert_eq!(errors.get("active"), Some("Поле active должно быть Y или N"));
    }

    #[test]
    fn missing_product_storages_list_is_reported() {
        let upsert = StoragesUpsert {
            general: None,
            data: Some(vec![ProductStoragesData {
                product_uuid: Some(Uuid::now_v7()),
                storages: None,
            }]),
        };

        let errors = upsert.into_desired().err().unwrap_or_default();

        assert_eq!(
            errors.get("storages"),
            Some("Поле storages обязательно для заполнения")
        );
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let upsert = StoragesUpsert {
            general: None,
            data: Some(vec![ProductStoragesData {
                product_uuid: Some(Uuid::now_v7()),
                storages: Some(vec![ProductStorageData {
                    storage_uuid: Some(Uuid::now_v7()),
                    active: "Y".to_owned(),
                    quantity: -3,
                }]),
            }]),
        };

        let errors = upsert.into_desired().err().unwrap_or_default();

        assert_eq!(
            errors.get("quantity"),
            Some("Поле quantity должно быть больше или равно 0")
        );
    }
}

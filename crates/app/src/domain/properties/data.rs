//! Property upsert payload.

use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::properties::models::{Property, PropertyUuid, PropertyValue},
    validation::{self, FieldErrors, required},
};

/// Desired state of properties and their values.
#[derive(Debug, Clone, Default, Validate)]
pub struct PropertiesUpsert {
    pub general: Option<PropertiesGeneral>,

    #[validate(required)]
    pub data: Option<Vec<PropertyValuesData>>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct PropertiesGeneral {
    #[validate(required)]
    pub properties: Option<Vec<PropertyData>>,
}

/// A property. `kind` travels as `type` on the wire.
#[derive(Debug, Clone, Default, Validate, serde::Serialize)]
pub struct PropertyData {
    #[validate(required)]
    pub uuid: Option<Uuid>,

    #[validate(length(min = 1, code = "required"))]
    pub name: String,

    pub kind: String,
}

#[derive(Debug, Clone, Default, Validate, serde::Serialize)]
pub struct PropertyValuesData {
    #[validate(required)]
    pub property_uuid: Option<Uuid>,

    #[validate(required)]
    pub values: Option<Vec<PropertyValueData>>,
}

#[derive(Debug, Clone, Default, Validate, serde::Serialize)]
pub struct PropertyValueData {
    #[validate(length(min = 1, code = "required"))]
    pub key: String,

    #[validate(length(min = 1, code = "required"))]
    pub value: String,
}

pub(crate) type DesiredProperties = (Option<Vec<Property>>, Vec<PropertyValue>);

impl PropertiesUpsert {
    pub(crate) fn into_desired(self) -> Result<DesiredProperties, FieldErrors> {
        validation::check(&self)?;

        if let Some(general) = &self.general {
            validation::check(general)?;

            for property in general.properties.iter().flatten() {
                validation::check(property)?;

                if property.kind.is_empty() {
                    return Err(FieldErrors::single(
                        "type",
                        "Поле type обязательно для заполнения",
                    ));
                }
            }
        }

        let data = required(self.data, "data")?;

        validation::check_each(&data)?;

        for property in &data {
            validation::check_each(property.values.iter().flatten())?;
        }

        let properties = self
            .general
            .and_then(|general| general.properties)
            .map(|properties| {
                properties
                    .into_iter()
                    .map(|property| {
                        Ok(Property::new(
                            PropertyUuid::from_uuid(required(property.uuid, "uuid")?),
                            property.name,
                            property.kind,
                        ))
                    })
                    .collect::<Result<Vec<_>, FieldErrors>>()
            })
            .transpose()?;

        let mut values = Vec::new();

        for property in data {
            let property_uuid =
                PropertyUuid::from_uuid(required(property.property_uuid, "property_uuid")?);

            for value in required(property.values, "values")? {
                values.push(PropertyValue::new(property_uuid, value.key, value.value));
            }
        }

        Ok((properties, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_type_is_reported_under_its_wire_name() {
        let upsert = PropertiesUpsert {
            general: Some(PropertiesGeneral {
                properties: Some(vec![PropertyData {
                    uuid: Some(Uuid::now_v7()),
                    name: "Цвет".to_owned(),
                    kind: String::new(),
                }]),
            }),
            data: Some(Vec::new()),
        };

        let errors = upsert.into_desired().err().unwrap_or_default();

        assert_eq!(
            errors.get("type"),
            Some("Поле type обязательно для заполнения")
        );
    }

    #[test]
    fn values_take_their_property_uuid_from_the_parent() -> Result<(), FieldErrors> {
        let property = Uuid::now_v7();

        let upsert = PropertiesUpsert {
            general: None,
            data: Some(vec![PropertyValuesData {
                property_uuid: Some(property),
                values: Some(vec![
                    PropertyValueData {
                        key: "red".to_owned(),
                        value: "Красный".to_owned(),
                    },
                    PropertyValueData {
                        key: "blue".to_owned(),
                        value: "Синий".to_owned(),
                    },
                ]),
            }]),
        };

        let (properties, values) = upsert.into_desired()?;

        assert!(properties.is_none(), "no general section was sent");
        assert_eq!(values.len(), 2);
        assert!(
            values
                .iter()
                .all(|value| value.property_uuid.into_uuid() == property),
            "every value belongs to its parent property"
        );

        Ok(())
    }
}

//! Price upsert payload.

use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::{
        Active,
        prices::models::{ProductPrice, TypePrice, TypePriceUuid},
        products::ProductUuid,
    },
    validation::{self, FieldErrors, required},
};

/// Desired state of price types and product prices.
#[derive(Debug, Clone, Default, Validate)]
pub struct PricesUpsert {
    pub general: Option<PricesGeneral>,

    #[validate(required)]
    pub data: Option<Vec<ProductPricesData>>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct PricesGeneral {
    #[validate(required)]
    pub prices: Option<Vec<TypePriceData>>,
}

#[derive(Debug, Clone, Default, Validate, serde::Serialize)]
pub struct TypePriceData {
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
pub struct ProductPricesData {
    #[validate(required)]
    pub product_uuid: Option<Uuid>,

    #[validate(required)]
    pub prices: Option<Vec<ProductPriceData>>,
}

#[derive(Debug, Clone, Default, Validate, serde::Serialize)]
pub struct ProductPriceData {
    #[validate(required)]
    pub type_price_uuid: Option<Uuid>,

    #[validate(
        length(min = 1, code = "required"),
        custom(function = "crate::validation::one_of_active")
    )]
    pub active: String,

    #[validate(range(min = 0.0, code = "gte"))]
    pub price: f64,
}

/// Validated desired state: `None` when the request carried no price types.
pub(crate) type DesiredPrices = (Option<Vec<TypePrice>>, Vec<ProductPrice>);

impl PricesUpsert {
    pub(crate) fn into_desired(self) -> Result<DesiredPrices, FieldErrors> {
        validation::check(&self)?;

        if let Some(general) = &self.general {
            validation::check(general)?;
            validation::check_each(general.prices.iter().flatten())?;
        }

        let data = required(self.data, "data")?;

        validation::check_each(&data)?;

        for product in &data {
            validation::check_each(product.prices.iter().flatten())?;
        }

        let type_prices = self
            .general
            .and_then(|general| general.prices)
            .map(|prices| {
                prices
                    .into_iter()
                    .map(TypePrice::try_from)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let mut product_prices = Vec::new();

        for product in data {
            let product_uuid = ProductUuid::from_uuid(required(product.product_uuid, "product_uuid")?);

            for price in required(product.prices, "prices")? {
                product_prices.push(ProductPrice {
                    product_uuid,
                    type_price_uuid: TypePriceUuid::from_uuid(required(
                        price.type_price_uuid,
                        "type_price_uuid",
                    )?),
                    active: Active::parse_field(&price.active, "active")?,
                    price: price.price,
                });
            }
        }

        Ok((type_prices, product_prices))
    }
}

impl TryFrom<TypePriceData> for TypePrice {
    type Error = FieldErrors;

    fn try_from(data: TypePriceData) -> Result<Self, Self::Error> {
        Ok(Self {
            uuid: TypePriceUuid::from_uuid(required(data.uuid, "uuid")?),
            active: Active::parse_field(&data.active, "active")?,
            name: data.name,
        })
    }
}

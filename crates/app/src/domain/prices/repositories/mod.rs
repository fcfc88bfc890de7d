//! Prices Repositories

mod product_prices;
mod type_prices;

pub(crate) use product_prices::PgProductPricesRepository;
pub(crate) use type_prices::PgTypePricesRepository;

//! Properties Repositories

mod properties;
mod property_values;

pub(crate) use properties::PgPropertiesRepository;
pub(crate) use property_values::PgPropertyValuesRepository;

//! Storages Repositories

mod product_storages;
mod storages;

pub(crate) use product_storages::PgProductStoragesRepository;
pub(crate) use storages::PgStoragesRepository;

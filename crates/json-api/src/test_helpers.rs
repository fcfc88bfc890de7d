//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use catalog_app::{
    context::AppContext,
    domain::{
        Active,
        auth_codes::MockAuthCodesService,
        categories::{MockCategoriesService, models::CategoryUuid, records::CategoryRecord},
        prices::MockPricesService,
        properties::MockPropertiesService,
        storages::MockStoragesService,
    },
};

use crate::state::State;

fn strict_categories_mock() -> MockCategoriesService {
    let mut categories = MockCategoriesService::new();

    categories.expect_list_categories().never();
    categories.expect_get_category().never();
    categories.expect_create_categories().never();
    categories.expect_update_category().never();
    categories.expect_delete_category().never();
    categories.expect_category_tree().never();
    categories.expect_upsert().never();

    categories
}

fn strict_prices_mock() -> MockPricesService {
    let mut prices = MockPricesService::new();

    prices.expect_upsert().never();
    prices.expect_list_type_prices().never();

    prices
}

fn strict_storages_mock() -> MockStoragesService {
    let mut storages = MockStoragesService::new();

    storages.expect_upsert().never();
    storages.expect_list_storages().never();

    storages
}

fn strict_properties_mock() -> MockPropertiesService {
    let mut properties = MockPropertiesService::new();

    properties.expect_upsert().never();
    properties.expect_list_properties().never();

    properties
}

fn strict_auth_codes_mock() -> MockAuthCodesService {
    let mut auth_codes = MockAuthCodesService::new();

    auth_codes.expect_send_code().never();

    auth_codes
}

/// Every service refuses calls until a test swaps in its own mock.
pub(crate) fn strict_app() -> AppContext {
    AppContext {
        categories: Arc::new(strict_categories_mock()),
        prices: Arc::new(strict_prices_mock()),
        storages: Arc::new(strict_storages_mock()),
        properties: Arc::new(strict_properties_mock()),
        auth_codes: Arc::new(strict_auth_codes_mock()),
    }
}

pub(crate) fn app_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .push(route),
    )
}

pub(crate) fn categories_service(categories: MockCategoriesService, route: Router) -> Service {
    app_service(
        AppContext {
            categories: Arc::new(categories),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn prices_service(prices: MockPricesService, route: Router) -> Service {
    app_service(
        AppContext {
            prices: Arc::new(prices),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn storages_service(storages: MockStoragesService, route: Router) -> Service {
    app_service(
        AppContext {
            storages: Arc::new(storages),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn properties_service(properties: MockPropertiesService, route: Router) -> Service {
    app_service(
        AppContext {
            properties: Arc::new(properties),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn auth_codes_service(auth_codes: MockAuthCodesService, route: Router) -> Service {
    app_service(
        AppContext {
            auth_codes: Arc::new(auth_codes),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn make_category(
    uuid: CategoryUuid,
    name: &str,
    slug: &str,
    parent_uuid: Option<CategoryUuid>,
) -> CategoryRecord {
    CategoryRecord {
        id: 1,
        uuid,
        name: name.to_owned(),
        slug: slug.to_owned(),
        active: Active::Yes,
        parent_uuid,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

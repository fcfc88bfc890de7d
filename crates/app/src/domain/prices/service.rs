//! Prices service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::prices::{
        data::PricesUpsert,
        errors::PricesServiceError,
        records::TypePriceRecord,
        repositories::{PgProductPricesRepository, PgTypePricesRepository},
    },
    reconcile::{DeletePolicy, ReconcileStats, Reconciler},
};

#[derive(Debug, Clone)]
pub struct PgPricesService {
    db: Db,
    type_prices: PgTypePricesRepository,
    reconciler: Reconciler<PgTypePricesRepository, PgProductPricesRepository>,
}

impl PgPricesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            type_prices: PgTypePricesRepository::new(),
            reconciler: Reconciler::new(
                PgTypePricesRepository::new(),
                PgProductPricesRepository::new(),
                DeletePolicy::DeleteMissing,
            ),
        }
    }
}

#[async_trait]
impl PricesService for PgPricesService {
    #[tracing::instrument(name = "prices.service.upsert", skip_all, err)]
    async fn upsert(&self, upsert: PricesUpsert) -> Result<ReconcileStats, PricesServiceError> {
        let (type_prices, product_prices) = upsert.into_desired()?;

        let uow = self
            .db
            .begin_unit_of_work()
            .await
            .map_err(PricesServiceError::type_prices)?;

        let stats = self
            .reconciler
            .run(&uow, type_prices, product_prices)
            .await?;

        uow.commit().await.map_err(PricesServiceError::type_prices)?;

        Ok(stats)
    }

    async fn list_type_prices(&self) -> Result<Vec<TypePriceRecord>, PricesServiceError> {
        let mut tx = self.db.begin().await?;

        let type_prices = self.type_prices.list_type_prices(&mut tx).await?;

        tx.commit().await?;

        if type_prices.is_empty() {
            return Err(PricesServiceError::NotFound);
        }

        Ok(type_prices)
    }
}

#[automock]
#[async_trait]
pub trait PricesService: Send + Sync {
    /// Reconcile price types and product prices with the submitted desired state.
    async fn upsert(&self, upsert: PricesUpsert) -> Result<ReconcileStats, PricesServiceError>;

    /// Lists every price type, failing with `NotFound` when there are none.
    async fn list_type_prices(&self) -> Result<Vec<TypePriceRecord>, PricesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        database::StoreError,
        domain::{
            Active,
            prices::{
                data::{PricesGeneral, ProductPriceData, ProductPricesData, TypePriceData},
                models::{ProductPrice, TypePrice, TypePriceUuid},
            },
            products::ProductUuid,
        },
        reconcile::{AssociationStats, MasterStats, ReconcileError},
        test::TestContext,
    };

    use super::*;

    fn type_price(uuid: Uuid, name: &str) -> TypePriceData {
        TypePriceData {
            uuid: Some(uuid),
            name: name.to_owned(),
            active: "Y".to_owned(),
        }
    }

    fn prices(product: Uuid, entries: &[(Uuid, f64)]) -> ProductPricesData {
        ProductPricesData {
            product_uuid: Some(product),
            prices: Some(
                entries
                    .iter()
                    .map(|(type_price_uuid, price)| ProductPriceData {
                        type_price_uuid: Some(*type_price_uuid),
                        active: "Y".to_owned(),
                        price: *price,
                    })
                    .collect(),
            ),
        }
    }

    fn upsert(general: Option<Vec<TypePriceData>>, data: Vec<ProductPricesData>) -> PricesUpsert {
        PricesUpsert {
            general: general.map(|prices| PricesGeneral {
                prices: Some(prices),
            }),
            data: Some(data),
        }
    }

    #[tokio::test]
    async fn upsert_inserts_types_and_product_prices() -> TestResult {
        let ctx = TestContext::new().await;
        let (retail, wholesale, promo) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());
        let (product_a, product_b) = (Uuid::now_v7(), Uuid::now_v7());

        let stats = ctx
            .prices
            .upsert(upsert(
                Some(vec![
                    type_price(retail, "Розница"),
                    type_price(wholesale, "Опт"),
                    type_price(promo, "Акция"),
                ]),
                vec![
                    prices(product_a, &[(retail, 100.0), (wholesale, 90.0), (promo, 80.0)]),
                    prices(product_b, &[(retail, 50.0), (wholesale, 45.0)]),
                ],
            ))
            .await?;

        assert_eq!(stats.masters.count_inserted, 3);
        assert_eq!(stats.associations.count_inserted, 5);

        Ok(())
    }

    #[tokio::test]
    async fn repeating_an_upsert_changes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let retail = Uuid::now_v7();
        let product = Uuid::now_v7();

        let request = upsert(
            Some(vec![type_price(retail, "Розница")]),
            vec![prices(product, &[(retail, 10.0)])],
        );

        ctx.prices.upsert(request.clone()).await?;
        let stats = ctx.prices.upsert(request).await?;

        assert_eq!(stats, ReconcileStats::default(), "second run must be a no-op");

        Ok(())
    }

    #[tokio::test]
    async fn omitted_type_prices_are_deleted() -> TestResult {
        let ctx = TestContext::new().await;
        let (retail, wholesale) = (Uuid::now_v7(), Uuid::now_v7());

        ctx.prices
            .upsert(upsert(
                Some(vec![type_price(retail, "Розница"), type_price(wholesale, "Опт")]),
                Vec::new(),
            ))
            .await?;

        let stats = ctx
            .prices
            .upsert(upsert(
                Some(vec![type_price(retail, "Розничная цена")]),
                Vec::new(),
            ))
            .await?;

        assert_eq!(
            stats.masters,
            MasterStats {
                count_deleted: 1,
                count_inserted: 0,
                count_updated: 1,
            }
        );

        let remaining = ctx.prices.list_type_prices().await?;

        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining.first().map(|t| t.name.as_str()), Some("Розничная цена"));

        Ok(())
    }

    #[tokio::test]
    async fn omitted_product_price_is_kept() -> TestResult {
        let ctx = TestContext::new().await;
        let (retail, wholesale) = (Uuid::now_v7(), Uuid::now_v7());
        let product = Uuid::now_v7();
        let types = vec![type_price(retail, "Розница"), type_price(wholesale, "Опт")];

        ctx.prices
            .upsert(upsert(
                Some(types.clone()),
                vec![prices(product, &[(retail, 10.0), (wholesale, 8.0)])],
            ))
            .await?;

        let stats = ctx
            .prices
            .upsert(upsert(Some(types), vec![prices(product, &[(retail, 12.0)])]))
            .await?;

        assert_eq!(
            stats.associations,
            AssociationStats {
                count_inserted: 0,
                count_updated: 1,
            }
        );

        let stored: i64 =
            sqlx::query_scalar("SELECT count(*) FROM product_prices WHERE product_uuid = $1")
                .bind(product)
                .fetch_one(ctx.db.pool())
                .await?;

        assert_eq!(stored, 2, "the omitted price must survive");

        Ok(())
    }

    #[tokio::test]
    async fn prices_for_unknown_types_are_dropped() -> TestResult {
        let ctx = TestContext::new().await;
        let retail = Uuid::now_v7();
        let product = Uuid::now_v7();

        let stats = ctx
            .prices
            .upsert(upsert(
                Some(vec![type_price(retail, "Розница")]),
                vec![prices(product, &[(retail, 10.0), (Uuid::now_v7(), 5.0)])],
            ))
            .await?;

        assert_eq!(stats.associations.count_inserted, 1, "unknown type is filtered");

        Ok(())
    }

    #[tokio::test]
    async fn first_upsert_without_general_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .prices
            .upsert(upsert(None, vec![prices(Uuid::now_v7(), &[])]))
            .await;

        assert!(
            matches!(result, Err(PricesServiceError::MissingGeneral)),
            "expected MissingGeneral, got {result:?}"
        );
    }

    #[tokio::test]
    async fn later_upsert_without_general_keeps_types() -> TestResult {
        let ctx = TestContext::new().await;
        let retail = Uuid::now_v7();
        let product = Uuid::now_v7();

        ctx.prices
            .upsert(upsert(Some(vec![type_price(retail, "Розница")]), Vec::new()))
            .await?;

        let stats = ctx
            .prices
            .upsert(upsert(None, vec![prices(product, &[(retail, 1.0)])]))
            .await?;

        assert_eq!(stats.masters, MasterStats::default());
        assert_eq!(stats.associations.count_inserted, 1);

        Ok(())
    }

    #[tokio::test]
    async fn explicit_empty_type_prices_delete_every_type() -> TestResult {
        let ctx = TestContext::new().await;
        let (retail, wholesale) = (Uuid::now_v7(), Uuid::now_v7());

        ctx.prices
            .upsert(upsert(
                Some(vec![type_price(retail, "Розница"), type_price(wholesale, "Опт")]),
                Vec::new(),
            ))
            .await?;

        let stats = ctx.prices.upsert(upsert(Some(Vec::new()), Vec::new())).await?;

        assert_eq!(
            stats.masters,
            MasterStats {
                count_deleted: 2,
                count_inserted: 0,
                count_updated: 0,
            }
        );

        let result = ctx.prices.list_type_prices().await;

        assert!(
            matches!(result, Err(PricesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn explicit_empty_type_prices_on_empty_table_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.prices.upsert(upsert(Some(Vec::new()), Vec::new())).await;

        assert!(
            matches!(result, Err(PricesServiceError::MissingGeneral)),
            "expected MissingGeneral, got {result:?}"
        );
    }

    #[tokio::test]
    async fn failed_product_prices_undo_type_price_writes() -> TestResult {
        let ctx = TestContext::new().await;
        let retail = TypePriceUuid::new();

        let uow = ctx.db.db().begin_unit_of_work().await?;

        let result = ctx
            .prices
            .reconciler
            .run(
                &uow,
                Some(vec![TypePrice {
                    uuid: retail,
                    name: "Розница".to_owned(),
                    active: Active::Yes,
                }]),
                vec![ProductPrice {
                    product_uuid: ProductUuid::new(),
                    type_price_uuid: retail,
                    active: Active::Yes,
                    price: -1.0,
                }],
            )
            .await;

        assert!(
            matches!(
                result,
                Err(ReconcileError::Associations {
                    source: StoreError::Sql(_),
                    ..
                })
            ),
            "expected the price check to fail, got {result:?}"
        );

        drop(uow);

        let result = ctx.prices.list_type_prices().await;

        assert!(
            matches!(result, Err(PricesServiceError::NotFound)),
            "type price insert must be rolled back, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unavailable_database_is_reported_as_type_price_failure() {
        let ctx = TestContext::new().await;

        ctx.db.pool().close().await;

        let result = ctx
            .prices
            .upsert(upsert(Some(vec![type_price(Uuid::now_v7(), "Розница")]), Vec::new()))
            .await;

        assert!(
            matches!(result, Err(PricesServiceError::TypePrices(StoreError::Sql(_)))),
            "expected TypePrices, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_type_prices_empty_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.prices.list_type_prices().await;

        assert!(
            matches!(result, Err(PricesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}

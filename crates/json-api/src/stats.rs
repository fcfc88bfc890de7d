//! Upsert statistics shared by the reconciling modules.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use catalog_app::reconcile::{AssociationStats, MasterStats, ReconcileStats};

use crate::observability::observe_reconciled;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct MasterStatsResponse {
    pub count_deleted: usize,
    pub count_inserted: usize,
    pub count_updated: usize,
}

impl From<MasterStats> for MasterStatsResponse {
    fn from(stats: MasterStats) -> Self {
        MasterStatsResponse {
            count_deleted: stats.count_deleted,
            count_inserted: stats.count_inserted,
            count_updated: stats.count_updated,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct AssociationStatsResponse {
    pub count_inserted: usize,
    pub count_updated: usize,
}

impl From<AssociationStats> for AssociationStatsResponse {
    fn from(stats: AssociationStats) -> Self {
        AssociationStatsResponse {
            count_inserted: stats.count_inserted,
            count_updated: stats.count_updated,
        }
    }
}

pub(crate) fn record_masters(module: &str, entity: &str, stats: &MasterStats) {
    observe_reconciled(module, entity, "deleted", stats.count_deleted);
    observe_reconciled(module, entity, "inserted", stats.count_inserted);
    observe_reconciled(module, entity, "updated", stats.count_updated);
}

/// Record both levels of a two-level upsert, e.g. `("price", "type_price", "product_price")`.
pub(crate) fn record(module: &str, master: &str, association: &str, stats: &ReconcileStats) {
    record_masters(module, master, &stats.masters);

    observe_reconciled(
        module,
        association,
        "inserted",
        stats.associations.count_inserted,
    );
    observe_reconciled(
        module,
        association,
        "updated",
        stats.associations.count_updated,
    );
}

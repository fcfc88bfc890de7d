//! Upsert-by-diff reconciliation.
//!
//! A client submits the desired state of a module as a set of master records (price types,
//! storages, properties, categories) and, optionally, association records hanging off those
//! masters (product prices, product stocks, property values). The engine reads the current
//! state inside one unit of work, computes what has to change, and dispatches the writes
//! concurrently against that same unit of work.

mod apply;
mod diff;
mod engine;
mod filter;

pub use diff::{
    Association, AssociationDiff, DeletePolicy, Master, MasterDiff, diff_associations,
    diff_masters,
};
pub use engine::{
    AssociationStore, MasterStore, ReconcileError, Reconciler, reconcile_associations,
    reconcile_masters,
};
pub use filter::retain_known_masters;

pub(crate) use apply::WriteSet;

/// Counts of master rows written by one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MasterStats {
    pub count_deleted: usize,
    pub count_inserted: usize,
    pub count_updated: usize,
}

/// Counts of association rows written by one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssociationStats {
    pub count_inserted: usize,
    pub count_updated: usize,
}

/// Combined result of a two-level reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub masters: MasterStats,
    pub associations: AssociationStats,
}

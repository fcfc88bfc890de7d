//! Store seams and the two-phase reconciliation driver.

use async_trait::async_trait;
use rustc_hash::FxHashSet;
use sqlx::{Postgres, Transaction};
use thiserror::Error;
use tracing::{debug, info};

use crate::database::{StoreError, UnitOfWork};

use super::{
    Association, AssociationStats, DeletePolicy, Master, MasterStats, ReconcileStats, WriteSet,
    diff_associations, diff_masters, retain_known_masters,
};

/// Persistence of one master table, one row per statement.
#[async_trait]
pub trait MasterStore: Send + Sync {
    type Record: Master + Send + Sync;

    /// Entity name used in logs and errors.
    const ENTITY: &'static str;

    async fn list_current(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Self::Record>, sqlx::Error>;

    async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &Self::Record,
    ) -> Result<(), sqlx::Error>;

    async fn update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &Self::Record,
    ) -> Result<(), sqlx::Error>;

    async fn delete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: <Self::Record as Master>::Key,
    ) -> Result<(), sqlx::Error>;
}

/// Persistence of one association table, written in batches.
#[async_trait]
pub trait AssociationStore: Send + Sync {
    type Record: Association + Send + Sync;

    /// Entity name used in logs and errors.
    const ENTITY: &'static str;

    async fn list_for_owners(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owners: &[<Self::Record as Association>::Owner],
    ) -> Result<Vec<Self::Record>, sqlx::Error>;

    async fn insert_batch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: &[Self::Record],
    ) -> Result<(), sqlx::Error>;

    async fn update_batch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: &[Self::Record],
    ) -> Result<(), sqlx::Error>;
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// No master rows exist yet and the request did not supply any.
    #[error("master section must be populated")]
    MissingGeneral,

    #[error("failed to reconcile {entity}")]
    Masters {
        entity: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("failed to reconcile {entity}")]
    Associations {
        entity: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ReconcileError {
    fn masters<S: MasterStore>(error: sqlx::Error) -> Self {
        Self::Masters {
            entity: S::ENTITY,
            source: error.into(),
        }
    }

    fn associations<S: AssociationStore>(error: sqlx::Error) -> Self {
        Self::Associations {
            entity: S::ENTITY,
            source: error.into(),
        }
    }
}

/// Reconcile one master table against `desired`.
///
/// `None` means the request carried no master section: the table is left as is when it
/// already has rows. An empty list is a desired state like any other, so under
/// [`DeletePolicy::DeleteMissing`] it clears the table. Either is refused while the table
/// has no rows yet.
#[tracing::instrument(
    name = "reconcile.masters",
    skip_all,
    fields(
        entity = S::ENTITY,
        count_deleted = tracing::field::Empty,
        count_inserted = tracing::field::Empty,
        count_updated = tracing::field::Empty
    ),
    err
)]
pub async fn reconcile_masters<S: MasterStore>(
    store: &S,
    uow: &UnitOfWork,
    desired: Option<Vec<S::Record>>,
    policy: DeletePolicy,
) -> Result<MasterStats, ReconcileError> {
    let current = store
        .list_current(&mut *uow.lock().await)
        .await
        .map_err(ReconcileError::masters::<S>)?;

    let desired = match desired {
        Some(desired) if !(desired.is_empty() && current.is_empty()) => desired,
        _ if current.is_empty() => return Err(ReconcileError::MissingGeneral),
        _ => {
            debug!("no master section supplied, keeping current rows");
            return Ok(MasterStats::default());
        }
    };

    let diff = diff_masters(current, desired, policy);
    let stats = diff.stats();

    let span = tracing::Span::current();
    span.record("count_deleted", stats.count_deleted);
    span.record("count_inserted", stats.count_inserted);
    span.record("count_updated", stats.count_updated);

    let mut writes = WriteSet::new();

    for record in &diff.deletes {
        let key = record.key();
        writes.push(async move { store.delete(&mut *uow.lock().await, key).await });
    }

    for record in &diff.inserts {
        writes.push(async move { store.insert(&mut *uow.lock().await, record).await });
    }

    for record in &diff.updates {
        writes.push(async move { store.update(&mut *uow.lock().await, record).await });
    }

    debug!(writes = writes.len(), "dispatching master writes");

    writes.run().await.map_err(ReconcileError::masters::<S>)?;

    Ok(stats)
}

/// Reconcile the associations of the owners present in `desired`.
///
/// Inserts referencing a master outside `valid_masters` are dropped before writing.
#[tracing::instrument(
    name = "reconcile.associations",
    skip_all,
    fields(
        entity = S::ENTITY,
        count_inserted = tracing::field::Empty,
        count_updated = tracing::field::Empty
    ),
    err
)]
pub async fn reconcile_associations<S: AssociationStore>(
    store: &S,
    uow: &UnitOfWork,
    desired: Vec<S::Record>,
    valid_masters: &FxHashSet<<S::Record as Association>::Master>,
) -> Result<AssociationStats, ReconcileError> {
    if desired.is_empty() {
        return Ok(AssociationStats::default());
    }

    let owners: Vec<_> = desired
        .iter()
        .map(Association::owner)
        .collect::<FxHashSet<_>>()
        .into_iter()
        .collect();

    let current = store
        .list_for_owners(&mut *uow.lock().await, &owners)
        .await
        .map_err(ReconcileError::associations::<S>)?;

    let diff = diff_associations(current, desired);
    let inserts = retain_known_masters(diff.inserts, valid_masters, S::ENTITY);
    let updates = diff.updates;

    let stats = AssociationStats {
        count_inserted: inserts.len(),
        count_updated: updates.len(),
    };

    let span = tracing::Span::current();
    span.record("count_inserted", stats.count_inserted);
    span.record("count_updated", stats.count_updated);

    let mut writes = WriteSet::new();

    if !inserts.is_empty() {
        writes.push(async { store.insert_batch(&mut *uow.lock().await, &inserts).await });
    }

    if !updates.is_empty() {
        writes.push(async { store.update_batch(&mut *uow.lock().await, &updates).await });
    }

    writes
        .run()
        .await
        .map_err(ReconcileError::associations::<S>)?;

    Ok(stats)
}

/// Drives a master table and its association table through one unit of work.
#[derive(Debug, Clone)]
pub struct Reconciler<M, A> {
    masters: M,
    associations: A,
    policy: DeletePolicy,
}

impl<M, A> Reconciler<M, A>
where
    M: MasterStore,
    A: AssociationStore,
    A::Record: Association<Master = <M::Record as Master>::Key>,
{
    pub fn new(masters: M, associations: A, policy: DeletePolicy) -> Self {
        Self {
            masters,
            associations,
            policy,
        }
    }

    /// Reconcile masters, then associations against the masters as they stand afterwards.
    ///
    /// # Errors
    ///
    /// Returns the first failure of either phase. Nothing is committed here; the caller
    /// owns the unit of work.
    pub async fn run(
        &self,
        uow: &UnitOfWork,
        masters: Option<Vec<M::Record>>,
        associations: Vec<A::Record>,
    ) -> Result<ReconcileStats, ReconcileError> {
        let master_stats = reconcile_masters(&self.masters, uow, masters, self.policy).await?;

        if associations.is_empty() {
            return Ok(ReconcileStats {
                masters: master_stats,
                associations: AssociationStats::default(),
            });
        }

        let valid: FxHashSet<_> = self
            .masters
            .list_current(&mut *uow.lock().await)
            .await
            .map_err(ReconcileError::masters::<M>)?
            .iter()
            .map(Master::key)
            .collect();

        let association_stats =
            reconcile_associations(&self.associations, uow, associations, &valid).await?;

        info!(
            masters = M::ENTITY,
            associations = A::ENTITY,
            master_inserted = master_stats.count_inserted,
            master_updated = master_stats.count_updated,
            master_deleted = master_stats.count_deleted,
            association_inserted = association_stats.count_inserted,
            association_updated = association_stats.count_updated,
            "reconciled"
        );

        Ok(ReconcileStats {
            masters: master_stats,
            associations: association_stats,
        })
    }
}

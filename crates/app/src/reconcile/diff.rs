//! Set diffing for master and association records.

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use rustc_hash::FxHashMap;

use super::{AssociationStats, MasterStats};

/// A top-level record with its own external identifier.
pub trait Master {
    type Key: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    fn key(&self) -> Self::Key;

    /// Whether every field that is persisted by an update matches. Identity and timestamps
    /// never take part.
    fn same_content(&self, other: &Self) -> bool;
}

/// A dependent record addressed by its owner plus a key unique within that owner.
pub trait Association {
    type Owner: Copy + Eq + Hash + Display + Send + Sync + 'static;
    type Key: Clone + Eq + Hash + Send + Sync;
    type Master: Copy + Eq + Hash + Display + Send + Sync + 'static;

    fn owner(&self) -> Self::Owner;

    fn key(&self) -> Self::Key;

    /// The master record this association must reference.
    fn master(&self) -> Self::Master;

    /// Whether the value payload matches, excluding the composite key.
    fn same_payload(&self, other: &Self) -> bool;
}

/// What happens to current masters absent from the desired set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    DeleteMissing,
    KeepMissing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MasterDiff<T> {
    pub deletes: Vec<T>,
    pub inserts: Vec<T>,
    pub updates: Vec<T>,
}

impl<T> MasterDiff<T> {
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.inserts.is_empty() && self.updates.is_empty()
    }

    pub fn stats(&self) -> MasterStats {
        MasterStats {
            count_deleted: self.deletes.len(),
            count_inserted: self.inserts.len(),
            count_updated: self.updates.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssociationDiff<T> {
    pub inserts: Vec<T>,
    pub updates: Vec<T>,
}

impl<T> AssociationDiff<T> {
    pub fn stats(&self) -> AssociationStats {
        AssociationStats {
            count_inserted: self.inserts.len(),
            count_updated: self.updates.len(),
        }
    }
}

/// Three-way diff of master records keyed by their identifier.
///
/// Output order is unspecified. When `desired` repeats a key the last occurrence wins.
pub fn diff_masters<T: Master>(
    current: Vec<T>,
    desired: Vec<T>,
    policy: DeletePolicy,
) -> MasterDiff<T> {
    let mut current: FxHashMap<T::Key, T> = current.into_iter().map(|m| (m.key(), m)).collect();
    let desired: FxHashMap<T::Key, T> = desired.into_iter().map(|m| (m.key(), m)).collect();

    let mut inserts = Vec::new();
    let mut updates = Vec::new();

    for (key, wanted) in desired {
        match current.remove(&key) {
            None => inserts.push(wanted),
            Some(existing) if !existing.same_content(&wanted) => updates.push(wanted),
            Some(_) => {}
        }
    }

    let deletes = match policy {
        DeletePolicy::DeleteMissing => current.into_values().collect(),
        DeletePolicy::KeepMissing => Vec::new(),
    };

    MasterDiff {
        deletes,
        inserts,
        updates,
    }
}

/// Two-way diff of association records, nested by owner.
///
/// Owners absent from `current` have all their desired rows inserted. Rows present in
/// `current` but missing from `desired` are left alone.
pub fn diff_associations<T: Association>(current: Vec<T>, desired: Vec<T>) -> AssociationDiff<T> {
    let mut current = nest(current);

    let mut inserts = Vec::new();
    let mut updates = Vec::new();

    for (owner, wanted) in nest(desired) {
        let Some(mut existing) = current.remove(&owner) else {
            inserts.extend(wanted.into_values());
            continue;
        };

        for (key, row) in wanted {
            match existing.remove(&key) {
                None => inserts.push(row),
                Some(stored) if !stored.same_payload(&row) => updates.push(row),
                Some(_) => {}
            }
        }
    }

    AssociationDiff { inserts, updates }
}

fn nest<T: Association>(rows: Vec<T>) -> FxHashMap<T::Owner, FxHashMap<T::Key, T>> {
    let mut nested: FxHashMap<T::Owner, FxHashMap<T::Key, T>> = FxHashMap::default();

    for row in rows {
        nested.entry(row.owner()).or_default().insert(row.key(), row);
    }

    nested
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Shelf {
        pub(crate) id: u32,
        pub(crate) name: &'static str,
    }

    impl Master for Shelf {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }

        fn same_content(&self, other: &Self) -> bool {
            self.name == other.name
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Stock {
        pub(crate) item: u32,
        pub(crate) shelf: u32,
        pub(crate) quantity: i64,
    }

    impl Association for Stock {
        type Owner = u32;
        type Key = u32;
        type Master = u32;

        fn owner(&self) -> u32 {
            self.item
        }

        fn key(&self) -> u32 {
            self.shelf
        }

        fn master(&self) -> u32 {
            self.shelf
        }

        fn same_payload(&self, other: &Self) -> bool {
            self.quantity == other.quantity
        }
    }

    fn shelf(id: u32, name: &'static str) -> Shelf {
        Shelf { id, name }
    }

    fn stock(item: u32, shelf: u32, quantity: i64) -> Stock {
        Stock {
            item,
            shelf,
            quantity,
        }
    }

    fn ids(shelves: &[Shelf]) -> Vec<u32> {
        let mut ids: Vec<u32> = shelves.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn masters_split_into_deletes_inserts_and_updates() {
        let current = vec![shelf(1, "a"), shelf(2, "b"), shelf(3, "c")];
        let desired = vec![shelf(2, "b"), shelf(3, "changed"), shelf(4, "d")];

        let diff = diff_masters(current, desired, DeletePolicy::DeleteMissing);

        assert_eq!(ids(&diff.deletes), vec![1], "missing key should be deleted");
        assert_eq!(ids(&diff.inserts), vec![4], "new key should be inserted");
        assert_eq!(ids(&diff.updates), vec![3], "changed key should be updated");
    }

    #[test]
    fn every_key_lands_in_exactly_one_bucket() {
        let current = vec![shelf(1, "a"), shelf(2, "b"), shelf(3, "c"), shelf(5, "e")];
        let desired = vec![shelf(2, "b"), shelf(3, "x"), shelf(4, "d"), shelf(5, "y")];

        let diff = diff_masters(current.clone(), desired.clone(), DeletePolicy::DeleteMissing);
        let unchanged_current = current.len() - diff.deletes.len() - diff.updates.len();
        let unchanged_desired = desired.len() - diff.inserts.len() - diff.updates.len();

        assert_eq!(unchanged_current, 1, "only shelf 2 is unchanged");
        assert_eq!(unchanged_current, unchanged_desired, "no-ops match on both sides");
        assert_eq!(diff.stats().count_updated, 2, "shelves 3 and 5 changed");
    }

    #[test]
    fn identical_state_produces_empty_diff() {
        let state = vec![shelf(1, "a"), shelf(2, "b")];

        let diff = diff_masters(state.clone(), state, DeletePolicy::DeleteMissing);

        assert!(diff.is_empty(), "resubmitting current state must be a no-op");
    }

    #[test]
    fn keep_missing_never_deletes() {
        let diff = diff_masters(
            vec![shelf(1, "a"), shelf(2, "b")],
            vec![shelf(2, "b")],
            DeletePolicy::KeepMissing,
        );

        assert!(diff.deletes.is_empty(), "keep policy must not delete");
    }

    #[test]
    fn repeated_desired_key_keeps_last_occurrence() {
        let diff = diff_masters(
            Vec::new(),
            vec![shelf(1, "first"), shelf(1, "second")],
            DeletePolicy::DeleteMissing,
        );

        assert_eq!(diff.inserts, vec![shelf(1, "second")]);
    }

    #[test]
    fn unknown_owner_inserts_all_rows() {
        let diff = diff_associations(Vec::new(), vec![stock(1, 10, 5), stock(1, 11, 6)]);

        assert_eq!(diff.inserts.len(), 2, "both rows are new");
        assert!(diff.updates.is_empty(), "nothing to update");
    }

    #[test]
    fn known_owner_inserts_and_updates_per_key() {
        let current = vec![stock(1, 10, 5), stock(1, 11, 6)];
        let desired = vec![stock(1, 10, 5), stock(1, 11, 7), stock(1, 12, 1)];

        let diff = diff_associations(current, desired);

        assert_eq!(diff.inserts, vec![stock(1, 12, 1)]);
        assert_eq!(diff.updates, vec![stock(1, 11, 7)]);
    }

    #[test]
    fn omitted_association_is_not_deleted() {
        let current = vec![stock(1, 10, 5), stock(1, 11, 6)];
        let desired = vec![stock(1, 10, 9)];

        let diff = diff_associations(current, desired);

        assert_eq!(diff.updates, vec![stock(1, 10, 9)]);
        assert!(diff.inserts.is_empty(), "omitted row must not be re-inserted");
        assert_eq!(
            diff.stats(),
            AssociationStats {
                count_inserted: 0,
                count_updated: 1
            }
        );
    }

    #[test]
    fn empty_desired_associations_is_an_empty_diff() {
        let diff = diff_associations(vec![stock(1, 10, 5)], Vec::new());

        assert!(diff.inserts.is_empty() && diff.updates.is_empty());
    }
}

//! Referential pre-check for association inserts.

use rustc_hash::FxHashSet;
use tracing::warn;

use super::Association;

/// Drops inserts whose master is not in `valid`.
///
/// Dropped rows are warn-logged and never reported to the caller. Updates are not passed
/// through here: an existing association already referenced a master when it was inserted.
pub fn retain_known_masters<T: Association>(
    inserts: Vec<T>,
    valid: &FxHashSet<T::Master>,
    entity: &'static str,
) -> Vec<T> {
    inserts
        .into_iter()
        .filter(|row| {
            let known = valid.contains(&row.master());

            if !known {
                warn!(
                    entity,
                    owner = %row.owner(),
                    master = %row.master(),
                    "foreign key constraint violation avoided"
                );
            }

            known
        })
        .collect()
}

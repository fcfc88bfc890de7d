//! Assembling the category tree from its flattened rows.

use rustc_hash::FxHashMap;

use super::{
    models::{CategoryTree, CategoryUuid},
    records::CategoryRecord,
};

/// Nest rows ordered by level then name. Rows at level 1 become roots and keep their order,
/// as do the children under each parent.
pub(crate) fn build_tree(rows: Vec<(CategoryRecord, i32)>) -> Vec<CategoryTree> {
    let mut children: FxHashMap<CategoryUuid, Vec<CategoryTree>> = FxHashMap::default();
    let mut roots = Vec::new();

    // Deepest rows first, so every node's children are complete before the node is built.
    for (category, level) in rows.into_iter().rev() {
        let mut own = children.remove(&category.uuid).unwrap_or_default();
        own.reverse();

        let parent = category.parent_uuid;
        let node = CategoryTree {
            category,
            level,
            children: own,
        };

        match parent {
            Some(parent) if level > 1 => children.entry(parent).or_default().push(node),
            _ => roots.push(node),
        }
    }

    roots.reverse();
    roots
}

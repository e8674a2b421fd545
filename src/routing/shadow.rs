//! Catch-all shadowing detection.
//!
//! # Algorithm
//! ```text
//! for every annotated node N:
//!     current ← N
//!     while current has a parent A:
//!         for every child S of A, S ≠ N, S annotated:
//!             if S collides with N → N is conflicted, stop
//!         current ← A
//! ```
//!
//! # Design Decisions
//! - Runs as a separate pass over a completed tree
//! - Top-level nodes have no parent, so they are never conflicted
//! - A catch-all on N's own ancestor path is checked like any sibling
//! - Flags are reset on every run; the result depends only on the tree

use crate::routing::annotation::RouteAnnotation;
use crate::routing::tree::{NodeId, RouteTree};

/// A node shadowed by a catch-all route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    /// The node whose routes may be intercepted.
    pub node: NodeId,
    /// The catch-all node that intercepts them.
    pub shadowed_by: NodeId,
}

/// Find every shadowed node and flag it on the tree.
pub fn detect_conflicts(tree: &mut RouteTree) -> Vec<Conflict> {
    let conflicts = find_conflicts(tree);

    let ids: Vec<NodeId> = tree.nodes().map(|(id, _)| id).collect();
    for id in ids {
        tree.set_conflicted(id, false);
    }
    for conflict in &conflicts {
        tree.set_conflicted(conflict.node, true);
        tracing::warn!(
            node = %tree[conflict.node].id(),
            shadowed_by = %tree[conflict.shadowed_by].id(),
            "Route shadowed by catch-all"
        );
    }

    tracing::info!(
        checked = tree.annotated().count(),
        conflicts = conflicts.len(),
        "Shadow check complete"
    );
    conflicts
}

/// Compute conflicts without touching the tree.
pub fn find_conflicts(tree: &RouteTree) -> Vec<Conflict> {
    tree.annotated()
        .filter_map(|(id, node)| {
            let annotation = node.annotation()?;
            find_shadowing(tree, id, annotation).map(|shadowed_by| Conflict {
                node: id,
                shadowed_by,
            })
        })
        .collect()
}

fn find_shadowing(tree: &RouteTree, target: NodeId, annotation: &RouteAnnotation) -> Option<NodeId> {
    let mut current = target;

    while let Some(ancestor) = tree.parent(current) {
        let hit = tree
            .children(ancestor)
            .iter()
            .copied()
            .filter(|&sibling| sibling != target)
            .find(|&sibling| {
                tree[sibling]
                    .annotation()
                    .is_some_and(|candidate| candidate.collides_with(annotation))
            });

        if hit.is_some() {
            return hit;
        }
        current = ancestor;
    }

    None
}

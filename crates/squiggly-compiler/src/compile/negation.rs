//! Base-view injection for all-negated children.
//!
//! A node whose children are all negated would otherwise select nothing, so
//! it and its dot-pathed ancestors receive a synthetic `base` child. Rewrites
//! are collected during the walk and applied afterwards.

use indexmap::IndexMap;
use squiggly_core::{BASE_VIEW, Name};

use super::tree::{Detached, NodeId, SelectionTree};

pub(crate) fn analyze(tree: &mut SelectionTree) {
    let mut staged: IndexMap<NodeId, Detached> = IndexMap::new();
    visit(tree, tree.root(), &mut staged);

    tracing::trace!(injections = staged.len(), "negation analysis");

    for (id, base) in staged {
        tree.add_child(id, base);
    }
}

fn visit(tree: &SelectionTree, id: NodeId, staged: &mut IndexMap<NodeId, Detached>) {
    let children = tree.children(id);
    if children.is_empty() {
        return;
    }

    if !children.iter().all(|child| tree.is_negated(*child)) {
        for child in children {
            visit(tree, child, staged);
        }
        return;
    }

    stage(tree, id, staged);
    let mut ancestor = tree.parent(id);
    while let Some(parent) = ancestor {
        stage(tree, parent, staged);
        if !tree.is_dot_pathed(parent) {
            break;
        }
        ancestor = tree.parent(parent);
    }
}

fn stage(tree: &SelectionTree, id: NodeId, staged: &mut IndexMap<NodeId, Detached>) {
    let base = Detached::new(Name::exact(BASE_VIEW)).dot_pathed(tree.is_dot_pathed(id));
    staged.insert(id, base);
}

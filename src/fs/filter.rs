//! Search-driven visibility marking.
//!
//! [`apply_visibility`] walks an existing tree and flags each node
//! visible or hidden for a search string. Matches pull their whole
//! ancestor chain open so a deeply nested hit is reachable in a collapsed
//! tree; deferred folders are materialized on the way down when the walk
//! is recursive, and skipped entirely when it is not.

use crate::fs::tree::{FolderTree, NodeId, NodeKind, TreeBuilder};

/// Mark the subtree under `node` visible/hidden for `search_text`.
///
/// An empty (or all-matching) search marks every child visible and
/// collapsed. A non-empty search is matched case-insensitively against
/// each node's display name; matching nodes become visible and every
/// ancestor becomes visible and expanded. Non-matching nodes only lose
/// visibility — their expansion flag is left alone.
///
/// The synthetic ".." row is always visible and collapsed.
pub fn apply_visibility(
    tree: &mut FolderTree,
    builder: &TreeBuilder,
    search_text: &str,
    node: NodeId,
    recursive: bool,
) {
    let search = search_text.to_lowercase();
    walk(tree, builder, &search, node, recursive);
}

fn walk(tree: &mut FolderTree, builder: &TreeBuilder, search: &str, node: NodeId, recursive: bool) {
    if tree.node(node).is_deferred() {
        // A non-recursive pass never loads deferred subtrees.
        if !recursive {
            return;
        }
        builder.materialize(tree, node);
    }

    let child_ids: Vec<NodeId> = tree.children(node).to_vec();
    for child in child_ids {
        let always_shown =
            search.is_empty() || tree.node(child).kind == NodeKind::ParentLink;
        if always_shown {
            let n = tree.node_mut(child);
            n.is_visible = true;
            n.is_expanded = false;
        } else if tree
            .node(child)
            .display_name()
            .to_lowercase()
            .contains(search)
        {
            tree.node_mut(child).is_visible = true;
            expand_ancestors(tree, child);
        } else {
            tree.node_mut(child).is_visible = false;
        }

        if tree.node(child).kind == NodeKind::Folder && recursive {
            walk(tree, builder, search, child, recursive);
        }
    }
}

/// Open and reveal every ancestor of a matched node.
fn expand_ancestors(tree: &mut FolderTree, node: NodeId) {
    let mut current = tree.node(node).parent;
    while let Some(id) = current {
        let n = tree.node_mut(id);
        n.is_expanded = true;
        n.is_visible = true;
        current = n.parent;
    }
}

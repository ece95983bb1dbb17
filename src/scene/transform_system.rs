//! Transform System
//!
//! Resolves world matrices down the scene hierarchy. Decoupled from `Scene`
//! so it only borrows the node arena and the root list.

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::Node;

/// Updates world matrices for every subtree under `roots`.
///
/// Uses an explicit stack instead of recursion so deep skeletons cannot
/// overflow the call stack. A node's world matrix is recomputed when its own
/// local matrix changed or any ancestor's world matrix did.
pub fn update_hierarchy_iterative(nodes: &mut SlotMap<NodeHandle, Node>, roots: &[NodeHandle]) {
    // (node, parent world matrix, parent changed)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);

    for &root_handle in roots.iter().rev() {
        stack.push((root_handle, Affine3A::IDENTITY, false));
    }

    while let Some((node_handle, parent_world_matrix, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(node_handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let new_world = parent_world_matrix * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);
        }

        let current_world = node.transform.world_matrix;

        // Reverse order keeps children processed first-to-last.
        for &child_handle in node.children.iter().rev() {
            stack.push((child_handle, current_world, world_needs_update));
        }
    }
}

/// Updates a single subtree, taking the parent's current world matrix as the
/// starting point.
pub fn update_subtree(nodes: &mut SlotMap<NodeHandle, Node>, root_handle: NodeHandle) {
    let Some(root) = nodes.get_mut(root_handle) else {
        return;
    };
    root.transform.mark_dirty();
    let parent = root.parent;

    let parent_world = parent
        .and_then(|p| nodes.get(p))
        .map_or(Affine3A::IDENTITY, |p| p.transform.world_matrix);

    let mut stack: Vec<(NodeHandle, Affine3A)> = vec![(root_handle, parent_world)];
    while let Some((node_handle, parent_world_matrix)) = stack.pop() {
        let Some(node) = nodes.get_mut(node_handle) else {
            continue;
        };
        node.transform.update_local_matrix();
        let world = parent_world_matrix * *node.transform.local_matrix();
        node.transform.set_world_matrix(world);

        for &child_handle in node.children.iter().rev() {
            stack.push((child_handle, world));
        }
    }
}

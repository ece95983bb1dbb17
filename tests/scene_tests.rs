//! Scene Integration Tests
//!
//! Tests for:
//! - Scene: create/remove nodes, attach/detach hierarchy
//! - Name lookup used by clip binding
//! - Component management: mesh and bone attachment
//! - Transform dirty checks and world-matrix propagation

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::sync::Arc;

use glam::{Affine3A, Quat, Vec3};

use tabula::resources::bone::Bone;
use tabula::resources::mesh::{Mesh, MeshData};
use tabula::scene::{Node, NodeHandle, Scene, Transform};

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn world_position(scene: &Scene, handle: NodeHandle) -> Vec3 {
    scene.world_matrix(handle).unwrap().translation.into()
}

// ============================================================================
// Node Creation & Removal
// ============================================================================

#[test]
fn scene_create_node_with_name() {
    let mut scene = Scene::new();
    let handle = scene.create_node_with_name("TestNode");
    assert_eq!(scene.get_name(handle), Some("TestNode"));
    assert!(scene.root_nodes.contains(&handle));
}

#[test]
fn scene_set_name() {
    let mut scene = Scene::new();
    let handle = scene.create_node();
    scene.set_name(handle, "Renamed");
    assert_eq!(scene.get_name(handle), Some("Renamed"));
}

#[test]
fn scene_remove_node_removes_subtree_and_components() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("parent"));
    let child = scene.add_to_parent(Node::new("child"), parent);
    let grandchild = scene.add_to_parent(Node::new("grandchild"), child);
    scene.set_mesh(child, Mesh::new("m", Arc::new(MeshData::default())));
    scene.set_bone(grandchild, Bone::new("b", Affine3A::IDENTITY, Vec::new()));

    scene.remove_node(parent);

    assert!(scene.get_node(parent).is_none());
    assert!(scene.get_node(child).is_none());
    assert!(scene.get_node(grandchild).is_none());
    assert!(scene.root_nodes.is_empty());
    assert!(scene.meshes.is_empty());
    assert!(scene.bones.is_empty());
}

#[test]
fn scene_remove_child_unlinks_from_parent() {
    let mut scene = Scene::new();
    let parent = scene.create_node();
    let child = scene.add_to_parent(Node::default(), parent);

    scene.remove_node(child);

    assert!(scene.get_node(parent).unwrap().children().is_empty());
}

#[test]
fn scene_clear() {
    let mut scene = Scene::new();
    let root = scene.create_node();
    scene.add_to_parent(Node::new("a"), root);
    scene.clear();
    assert!(scene.nodes.is_empty());
    assert!(scene.root_nodes.is_empty());
}

// ============================================================================
// Hierarchy: Attach / Detach
// ============================================================================

#[test]
fn scene_attach_moves_between_parents() {
    let mut scene = Scene::new();
    let parent1 = scene.create_node();
    let parent2 = scene.create_node();
    let child = scene.create_node();

    scene.attach(child, parent1);
    assert!(!scene.root_nodes.contains(&child));
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent1));

    scene.attach(child, parent2);
    assert!(
        !scene.get_node(parent1).unwrap().children().contains(&child),
        "Child should be removed from old parent"
    );
    assert!(scene.get_node(parent2).unwrap().children().contains(&child));
}

#[test]
fn scene_attach_to_self_is_noop() {
    let mut scene = Scene::new();
    let node = scene.create_node();
    scene.attach(node, node);
    assert_eq!(scene.get_node(node).unwrap().parent(), None);
}

#[test]
fn scene_add_to_missing_parent_becomes_root() {
    let mut scene = Scene::new();
    let ghost = scene.create_node();
    scene.remove_node(ghost);

    let orphan = scene.add_to_parent(Node::new("orphan"), ghost);
    assert!(scene.root_nodes.contains(&orphan));
}

// ============================================================================
// Name Lookup
// ============================================================================

#[test]
fn find_node_by_name_is_preorder_first_match() {
    let mut scene = Scene::new();
    let root = scene.create_node_with_name("root");
    let a = scene.add_to_parent(Node::new("a"), root);
    let deep = scene.add_to_parent(Node::new("twin"), a);
    let shallow = scene.add_to_parent(Node::new("twin"), root);

    // Pre-order visits a's subtree before root's second child.
    assert_eq!(scene.find_node_by_name(root, "twin"), Some(deep));
    assert_eq!(scene.find_node_by_name(a, "a"), Some(a));
    assert_eq!(scene.find_node_by_name(a, "root"), None);
    assert_ne!(deep, shallow);
}

#[test]
fn find_node_searches_all_roots() {
    let mut scene = Scene::new();
    scene.create_node_with_name("first");
    let second = scene.create_node_with_name("second");
    let leaf = scene.add_to_parent(Node::new("leaf"), second);

    assert_eq!(scene.find_node("leaf"), Some(leaf));
    assert_eq!(scene.find_node("missing"), None);
}

#[test]
fn find_node_handles_deep_chains() {
    let mut scene = Scene::new();
    let root = scene.create_node_with_name("bone_0");
    let mut tip = root;
    for i in 1..10_000 {
        tip = scene.add_to_parent(Node::new(&format!("bone_{i}")), tip);
    }
    assert_eq!(scene.find_node_by_name(root, "bone_9999"), Some(tip));
}

// ============================================================================
// Component Management
// ============================================================================

#[test]
fn set_mesh_links_node_and_replaces_previous() {
    let mut scene = Scene::new();
    let node = scene.create_node();

    let first = scene.set_mesh(node, Mesh::new("first", Arc::new(MeshData::default()))).unwrap();
    assert_eq!(scene.mesh_of(node).unwrap().node_id, Some(node));

    let second = scene.set_mesh(node, Mesh::new("second", Arc::new(MeshData::default()))).unwrap();
    assert_ne!(first, second);
    assert_eq!(scene.meshes.len(), 1);
    assert_eq!(scene.mesh_of(node).unwrap().name, "second");
    assert_eq!(scene.get_node(node).unwrap().mesh(), Some(second));
}

#[test]
fn set_component_on_missing_node_is_none() {
    let mut scene = Scene::new();
    let node = scene.create_node();
    scene.remove_node(node);

    assert!(scene.set_bone(node, Bone::new("b", Affine3A::IDENTITY, Vec::new())).is_none());
    assert!(scene.bone_of(node).is_none());
}

// ============================================================================
// Transform Unit Tests
// ============================================================================

#[test]
fn transform_update_local_matrix_dirty_check() {
    let mut t = Transform::new();

    // First call always updates
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.position = Vec3::new(1.0, 2.0, 3.0);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.rotation = Quat::from_rotation_y(FRAC_PI_2);
    assert!(t.update_local_matrix());

    t.mark_dirty();
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());
}

#[test]
fn transform_apply_local_matrix_decomposition() {
    let expected_pos = Vec3::new(5.0, -3.0, 7.0);
    let expected_rot = Quat::from_rotation_y(FRAC_PI_4);
    let expected_scale = Vec3::new(2.0, 3.0, 1.5);

    let mat = Affine3A::from_scale_rotation_translation(expected_scale, expected_rot, expected_pos);

    let mut t = Transform::new();
    t.apply_local_matrix(mat);

    assert!(vec3_approx(t.position, expected_pos));
    assert!(vec3_approx(t.scale, expected_scale));
    // Quaternion may differ in sign, but represent the same rotation
    assert!(t.rotation.dot(expected_rot).abs() > 1.0 - 1e-5);
}

// ============================================================================
// World Matrix Propagation
// ============================================================================

#[test]
fn hierarchy_chain_world_positions() {
    let mut scene = Scene::new();
    let root = scene.create_node();
    let mut chain = vec![root];
    for _ in 0..4 {
        let parent = *chain.last().unwrap();
        chain.push(scene.add_to_parent(Node::default(), parent));
    }
    for &node in &chain {
        scene.get_node_mut(node).unwrap().transform.position = Vec3::new(1.0, 0.0, 0.0);
    }

    scene.update_matrix_world();

    for (depth, &node) in chain.iter().enumerate() {
        let expected = Vec3::new((depth + 1) as f32, 0.0, 0.0);
        assert!(vec3_approx(world_position(&scene, node), expected));
    }
}

#[test]
fn hierarchy_with_rotation_and_scale() {
    let mut scene = Scene::new();
    let parent = scene.create_node();
    let child = scene.add_to_parent(Node::default(), parent);

    scene.set_local_transform(parent, Vec3::ZERO, Quat::from_rotation_z(FRAC_PI_2), Vec3::splat(2.0));
    scene.set_local_transform(child, Vec3::X, Quat::IDENTITY, Vec3::ONE);
    scene.update_matrix_world();

    // X rotated to Y, then doubled.
    assert!(vec3_approx(world_position(&scene, child), Vec3::new(0.0, 2.0, 0.0)));
}

#[test]
fn parent_change_propagates_to_unchanged_children() {
    let mut scene = Scene::new();
    let parent = scene.create_node();
    let child = scene.add_to_parent(Node::default(), parent);
    scene.set_local_transform(child, Vec3::Y, Quat::IDENTITY, Vec3::ONE);
    scene.update_matrix_world();

    scene.get_node_mut(parent).unwrap().transform.position = Vec3::new(0.0, 0.0, 5.0);
    scene.update_matrix_world();

    assert!(vec3_approx(world_position(&scene, child), Vec3::new(0.0, 1.0, 5.0)));
}

#[test]
fn subtree_update_uses_parent_world() {
    let mut scene = Scene::new();
    let parent = scene.create_node();
    let child = scene.add_to_parent(Node::default(), parent);
    scene.set_local_transform(parent, Vec3::X, Quat::IDENTITY, Vec3::ONE);
    scene.update_matrix_world();

    scene.set_local_transform(child, Vec3::Z, Quat::IDENTITY, Vec3::ONE);
    scene.update_subtree(child);

    assert!(vec3_approx(world_position(&scene, child), Vec3::new(1.0, 0.0, 1.0)));
}

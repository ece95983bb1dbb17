//! Skinning & Frame Pipeline Tests
//!
//! Tests for:
//! - Reset-then-accumulate of skinned vertex buffers
//! - Bone transform composition (bone world, inverse mesh local, offset)
//! - Meshes and bones outside the animated set
//! - AnimationSystem::update end to end

use std::sync::Arc;

use glam::{Affine3A, Vec3};

use tabula::animation::clip::{AnimationClip, BoneTransformTrack};
use tabula::animation::player::AnimationPlayer;
use tabula::animation::skinning::SkinningSystem;
use tabula::animation::system::AnimationSystem;
use tabula::animation::tracks::{KeyframeTrack, TrackKind};
use tabula::resources::bone::{Bone, VertexWeight};
use tabula::resources::mesh::{Mesh, MeshData, SkinVertexBuffer};
use tabula::scene::{Node, NodeHandle, Scene};

const EPSILON: f32 = 1e-3;

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn two_vertex_mesh() -> Arc<MeshData> {
    Arc::new(MeshData {
        indices: vec![0, 1, 0],
        vertices: vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        uvs: Vec::new(),
        normals: Vec::new(),
    })
}

struct Rig {
    scene: Scene,
    root: NodeHandle,
    body: NodeHandle,
    arm: NodeHandle,
}

/// root ─┬─ body (mesh)
///       └─ arm  (bone weighting vertex 0 of body)
fn rig(weights: Vec<VertexWeight>) -> Rig {
    let mut scene = Scene::new();
    let root = scene.create_node_with_name("root");
    let body = scene.add_to_parent(Node::new("body"), root);
    let arm = scene.add_to_parent(Node::new("arm"), root);

    scene.set_mesh(body, Mesh::new("body", two_vertex_mesh()));
    scene.set_bone(arm, Bone::new("arm", Affine3A::IDENTITY, weights).attached_to(body));

    Rig {
        scene,
        root,
        body,
        arm,
    }
}

fn skin_vertex(scene: &Scene, node: NodeHandle, index: usize) -> Vec3 {
    scene.mesh_of(node).unwrap().skin.vertex(index).unwrap()
}

// ============================================================================
// SkinVertexBuffer
// ============================================================================

#[test]
fn skin_buffer_accumulate_and_reset() {
    let mut buffer = SkinVertexBuffer::new(6);
    assert_eq!(buffer.len(), 6);

    assert!(buffer.accumulate(1, Vec3::new(1.0, 2.0, 3.0), 2.0));
    assert!(buffer.accumulate(1, Vec3::ONE, 1.0));
    assert_eq!(buffer.vertex(1), Some(Vec3::new(3.0, 5.0, 7.0)));

    assert!(!buffer.accumulate(2, Vec3::ONE, 1.0));

    buffer.reset();
    assert!(buffer.as_slice().iter().all(|&f| f == 0.0));
}

// ============================================================================
// SkinningSystem
// ============================================================================

#[test]
fn single_bone_full_weight_scales_transformed_vertex() {
    let mut rig = rig(vec![VertexWeight::new(0, 1.0)]);
    rig.scene.get_node_mut(rig.arm).unwrap().transform.position = Vec3::new(1.0, 2.0, 3.0);
    rig.scene.update_matrix_world();

    let touched = SkinningSystem::deform(&mut rig.scene, &[rig.arm], 100.0);

    assert_eq!(touched, 1);
    assert!(approx_vec3(skin_vertex(&rig.scene, rig.body, 0), Vec3::new(200.0, 200.0, 300.0)));
    // Vertex 1 has no weights and is left at zero by the reset pass.
    assert_eq!(skin_vertex(&rig.scene, rig.body, 1), Vec3::ZERO);
}

#[test]
fn reset_happens_every_pass() {
    let mut rig = rig(vec![VertexWeight::new(0, 1.0)]);
    rig.scene.update_matrix_world();

    SkinningSystem::deform(&mut rig.scene, &[rig.arm], 1.0);
    SkinningSystem::deform(&mut rig.scene, &[rig.arm], 1.0);

    assert!(approx_vec3(skin_vertex(&rig.scene, rig.body, 0), Vec3::new(1.0, 0.0, 0.0)));
}

#[test]
fn two_bones_accumulate_on_shared_vertex() {
    let mut rig = rig(vec![VertexWeight::new(0, 0.5)]);
    let hand = rig.scene.add_to_parent(Node::new("hand"), rig.root);
    rig.scene.set_bone(
        hand,
        Bone::new("hand", Affine3A::IDENTITY, vec![VertexWeight::new(0, 0.5)]).attached_to(rig.body),
    );
    rig.scene.get_node_mut(rig.arm).unwrap().transform.position = Vec3::new(2.0, 0.0, 0.0);
    rig.scene.update_matrix_world();

    let touched = SkinningSystem::deform(&mut rig.scene, &[rig.arm, hand], 100.0);

    // (3,0,0) * 50 + (1,0,0) * 50
    assert_eq!(touched, 1);
    assert!(approx_vec3(skin_vertex(&rig.scene, rig.body, 0), Vec3::new(200.0, 0.0, 0.0)));
}

#[test]
fn mesh_local_transform_is_inverted() {
    let mut rig = rig(vec![VertexWeight::new(0, 1.0)]);
    rig.scene.get_node_mut(rig.body).unwrap().transform.position = Vec3::new(5.0, 0.0, 0.0);
    rig.scene.get_node_mut(rig.arm).unwrap().transform.position = Vec3::new(1.0, 0.0, 0.0);
    rig.scene.update_matrix_world();

    SkinningSystem::deform(&mut rig.scene, &[rig.arm], 100.0);

    // T(1) * T(-5) * (1,0,0) = (-3,0,0)
    assert!(approx_vec3(skin_vertex(&rig.scene, rig.body, 0), Vec3::new(-300.0, 0.0, 0.0)));
}

#[test]
fn offset_matrix_is_applied_first() {
    let mut rig = rig(Vec::new());
    let offset = Affine3A::from_translation(Vec3::new(0.0, -1.0, 0.0));
    rig.scene.set_bone(
        rig.arm,
        Bone::new("arm", offset, vec![VertexWeight::new(1, 1.0)]).attached_to(rig.body),
    );
    rig.scene.update_matrix_world();

    SkinningSystem::deform(&mut rig.scene, &[rig.arm], 1.0);

    assert!(approx_vec3(skin_vertex(&rig.scene, rig.body, 1), Vec3::ZERO));
}

#[test]
fn out_of_range_weights_are_skipped() {
    let mut rig = rig(vec![VertexWeight::new(99, 1.0), VertexWeight::new(1, 1.0)]);
    rig.scene.update_matrix_world();

    SkinningSystem::deform(&mut rig.scene, &[rig.arm], 1.0);

    assert!(approx_vec3(skin_vertex(&rig.scene, rig.body, 1), Vec3::new(0.0, 1.0, 0.0)));
}

#[test]
fn bone_without_mesh_contributes_nothing() {
    let mut scene = Scene::new();
    let root = scene.create_node_with_name("root");
    let arm = scene.add_to_parent(Node::new("arm"), root);
    scene.set_bone(arm, Bone::new("arm", Affine3A::IDENTITY, vec![VertexWeight::new(0, 1.0)]));
    scene.update_matrix_world();

    assert_eq!(SkinningSystem::deform(&mut scene, &[arm], 100.0), 0);
}

#[test]
fn untouched_mesh_keeps_previous_contents() {
    let mut rig = rig(vec![VertexWeight::new(0, 1.0)]);
    let prop = rig.scene.add_to_parent(Node::new("prop"), rig.root);
    rig.scene.set_mesh(prop, Mesh::new("prop", two_vertex_mesh()));
    rig.scene
        .mesh_of_mut(prop)
        .unwrap()
        .skin
        .accumulate(0, Vec3::splat(7.0), 1.0);
    rig.scene.update_matrix_world();

    SkinningSystem::deform(&mut rig.scene, &[rig.arm], 100.0);

    assert_eq!(skin_vertex(&rig.scene, prop, 0), Vec3::splat(7.0));
}

// ============================================================================
// AnimationSystem
// ============================================================================

#[test]
fn end_to_end_tick_moves_bone_and_skins_mesh() {
    let mut rig = rig(vec![VertexWeight::new(0, 1.0)]);

    let mut positions = KeyframeTrack::init(TrackKind::Position, 2);
    positions.set(0, 0.0, &[0.0, 0.0, 0.0]);
    positions.set(1, 2.0, &[10.0, 0.0, 0.0]);
    let clip = AnimationClip::new(
        "reach",
        24.0,
        2.0,
        vec![BoneTransformTrack::new("arm").with_positions(positions)],
    );

    let mut player = AnimationPlayer::default();
    player.add_clip(Arc::new(clip), &rig.scene, rig.root);

    AnimationSystem::update(&mut player, &mut rig.scene, 1.0);

    let arm = rig.scene.local_transform(rig.arm).unwrap().position;
    assert!(approx_vec3(arm, Vec3::new(5.0, 0.0, 0.0)));

    // (1,0,0) moved by the bone's (5,0,0), times the default scale of 100.
    assert!(approx_vec3(skin_vertex(&rig.scene, rig.body, 0), Vec3::new(600.0, 0.0, 0.0)));
    assert_eq!(player.animated_nodes(), vec![rig.arm]);
}

use glam::Affine3A;
use rustc_hash::FxHashSet;

use crate::scene::{BoneKey, MeshKey, NodeHandle, Scene};

/// One bone's contribution to one mesh for the current frame.
struct Influence {
    bone: BoneKey,
    mesh: MeshKey,
    transform: Affine3A,
}

/// CPU linear blend skinning.
///
/// Each frame, every mesh influenced by an animated bone has its deformed
/// buffer zeroed, then each bone adds
/// `(bone_world * mesh_local⁻¹ * offset) * vertex * weight * scale`
/// for every vertex it weights. Meshes no animated bone touches keep their
/// previous contents.
pub struct SkinningSystem;

impl SkinningSystem {
    /// Deforms the meshes influenced by the bones on `bone_nodes`.
    ///
    /// World matrices must be up to date. Returns the number of meshes
    /// rewritten.
    pub fn deform(scene: &mut Scene, bone_nodes: &[NodeHandle], skin_scale: f32) -> usize {
        let influences = Self::collect_influences(scene, bone_nodes);
        if influences.is_empty() {
            return 0;
        }

        let Scene { meshes, bones, .. } = scene;

        // Pass 1: zero every affected mesh exactly once
        let mut touched: FxHashSet<MeshKey> = FxHashSet::default();
        for influence in &influences {
            if touched.insert(influence.mesh)
                && let Some(mesh) = meshes.get_mut(influence.mesh)
            {
                mesh.skin.reset();
            }
        }

        // Pass 2: accumulate
        for influence in &influences {
            let (Some(bone), Some(mesh)) = (bones.get(influence.bone), meshes.get_mut(influence.mesh))
            else {
                continue;
            };

            for w in &bone.weights {
                let index = w.vertex as usize;
                let Some(rest) = mesh.data.vertex(index) else {
                    log::debug!(
                        "Bone '{}' weights vertex {index} outside mesh '{}'",
                        bone.name,
                        mesh.name
                    );
                    continue;
                };
                let deformed = influence.transform.transform_point3(rest);
                mesh.skin.accumulate(index, deformed, w.weight * skin_scale);
            }
        }

        log::trace!("Skinned {} meshes from {} bones", touched.len(), influences.len());
        touched.len()
    }

    fn collect_influences(scene: &Scene, bone_nodes: &[NodeHandle]) -> Vec<Influence> {
        let mut influences = Vec::new();

        for &bone_node in bone_nodes {
            let Some(node) = scene.get_node(bone_node) else {
                continue;
            };
            let Some(bone_key) = node.bone() else {
                continue;
            };
            let Some(bone) = scene.bones.get(bone_key) else {
                continue;
            };
            let Some(mesh_node_handle) = bone.mesh_node else {
                continue;
            };
            let Some(mesh_node) = scene.get_node(mesh_node_handle) else {
                continue;
            };
            let Some(mesh_key) = mesh_node.mesh() else {
                continue;
            };

            let mesh_local = mesh_node.transform.compose_local();
            let transform = *node.world_matrix() * mesh_local.inverse() * bone.offset_matrix;

            influences.push(Influence {
                bone: bone_key,
                mesh: mesh_key,
                transform,
            });
        }

        influences
    }
}

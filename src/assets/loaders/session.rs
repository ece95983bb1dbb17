use rustc_hash::FxHashMap;

use crate::assets::server::{ClipHandle, MeshDataHandle};
use crate::scene::NodeHandle;

/// Where a pipeline bone lives: the mesh that declares it and the scene node
/// that mesh was attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoneSource {
    pub mesh_index: usize,
    pub bone_index: usize,
    pub mesh_node: NodeHandle,
}

/// Per-import lookup tables, threaded through one import call chain.
#[derive(Debug, Default)]
pub struct ImportSession {
    /// External node index -> scene node.
    pub nodes: FxHashMap<usize, NodeHandle>,
    /// External mesh index -> registered geometry.
    pub meshes: FxHashMap<usize, MeshDataHandle>,
    /// Bone name -> declaring mesh.
    pub bones: FxHashMap<String, BoneSource>,
    pub clips: Vec<ClipHandle>,
    take_count: u32,
}

impl ImportSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `Take001`, `Take002`, ...
    pub fn next_take_name(&mut self) -> String {
        self.take_count += 1;
        format!("Take{:03}", self.take_count)
    }

    #[must_use]
    pub fn take_count(&self) -> u32 {
        self.take_count
    }
}

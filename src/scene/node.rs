use crate::scene::transform::Transform;
use crate::scene::{BoneKey, MeshKey, NodeHandle};
use glam::Affine3A;

/// A scene node: name, hierarchy links, transform and component slots.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child handles into the scene's arena:
/// - `parent`: handle of the parent node (None for roots)
/// - `children`: handles of the child nodes
///
/// # Components
///
/// A node may carry a mesh instance and/or a bone. The component data lives
/// in the scene's maps; the node only stores keys.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Core Spatial Data ===
    pub transform: Transform,

    // === Components ===
    pub(crate) mesh: Option<MeshKey>,
    pub(crate) bone: Option<BoneKey>,
}

impl Node {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            mesh: None,
            bone: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn mesh(&self) -> Option<MeshKey> {
        self.mesh
    }

    #[inline]
    #[must_use]
    pub fn bone(&self) -> Option<BoneKey> {
        self.bone
    }

    /// World matrix, updated by [`Scene::update_matrix_world`](crate::scene::Scene::update_matrix_world).
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("")
    }
}

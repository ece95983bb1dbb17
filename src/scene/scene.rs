use glam::{Affine3A, Quat, Vec3};
use slotmap::SlotMap;

use crate::resources::bone::Bone;
use crate::resources::mesh::Mesh;
use crate::scene::node::Node;
use crate::scene::transform::Transform;
use crate::scene::transform_system;
use crate::scene::{BoneKey, MeshKey, NodeHandle};

/// Scene graph
///
/// Pure data: the node arena, the root list and the component pools for
/// mesh instances and bones. Nodes reference components by key.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ==== Component pools ====
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub bones: SlotMap<BoneKey, Bone>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            bones: SlotMap::with_key(),
        }
    }

    // ========================================================================
    // Node management
    // ========================================================================

    /// Creates an unnamed root node.
    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::default())
    }

    /// Creates a named root node.
    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::new(name))
    }

    /// Adds a node as a root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node under `parent`. Falls back to a root node if the parent
    /// does not exist.
    pub fn add_to_parent(&mut self, mut child: Node, parent: NodeHandle) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            log::warn!("Parent node not found, adding '{}' as a root", child.name);
            return self.add_node(child);
        }
        child.parent = Some(parent);
        let handle = self.nodes.insert(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        handle
    }

    /// Re-parents `child` under `parent`.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            return;
        }

        // 1. Detach from old
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        // 2. Attach to new
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }

        // 3. Update child
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    /// Removes a node, its whole subtree and their components.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let Some(node) = self.nodes.get(handle) else {
            return;
        };

        // Unlink from the parent (or the root list).
        if let Some(parent) = node.parent {
            if let Some(p) = self.nodes.get_mut(parent)
                && let Some(pos) = p.children.iter().position(|&x| x == handle)
            {
                p.children.remove(pos);
            }
        } else if let Some(pos) = self.root_nodes.iter().position(|&x| x == handle) {
            self.root_nodes.remove(pos);
        }

        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.remove(current) else {
                continue;
            };
            if let Some(mesh) = node.mesh {
                self.meshes.remove(mesh);
            }
            if let Some(bone) = node.bone {
                self.bones.remove(bone);
            }
            stack.extend(node.children);
        }
    }

    /// Drops every node and component.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root_nodes.clear();
        self.meshes.clear();
        self.bones.clear();
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle).map(|n| n.name.as_str())
    }

    pub fn set_name(&mut self, handle: NodeHandle, name: &str) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.name = name.to_string();
        }
    }

    // ========================================================================
    // Name lookup
    // ========================================================================

    /// Depth-first, pre-order search for the first node named `name` in the
    /// subtree rooted at `root` (inclusive).
    #[must_use]
    pub fn find_node_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if node.name == name {
                return Some(current);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Searches every root subtree in order.
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<NodeHandle> {
        self.root_nodes
            .iter()
            .find_map(|&root| self.find_node_by_name(root, name))
    }

    // ========================================================================
    // Transform access
    // ========================================================================

    #[must_use]
    pub fn local_transform(&self, handle: NodeHandle) -> Option<&Transform> {
        self.nodes.get(handle).map(|n| &n.transform)
    }

    pub fn set_local_transform(
        &mut self,
        handle: NodeHandle,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.transform.set_local(position, rotation, scale);
        }
    }

    #[must_use]
    pub fn world_matrix(&self, handle: NodeHandle) -> Option<Affine3A> {
        self.nodes.get(handle).map(|n| n.transform.world_matrix)
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Attaches a mesh instance to `node`, replacing any previous one.
    pub fn set_mesh(&mut self, node: NodeHandle, mut mesh: Mesh) -> Option<MeshKey> {
        if !self.nodes.contains_key(node) {
            return None;
        }
        mesh.node_id = Some(node);
        let key = self.meshes.insert(mesh);
        if let Some(old) = self.nodes[node].mesh.replace(key) {
            self.meshes.remove(old);
        }
        Some(key)
    }

    /// Attaches a bone to `node`, replacing any previous one.
    pub fn set_bone(&mut self, node: NodeHandle, bone: Bone) -> Option<BoneKey> {
        if !self.nodes.contains_key(node) {
            return None;
        }
        let key = self.bones.insert(bone);
        if let Some(old) = self.nodes[node].bone.replace(key) {
            self.bones.remove(old);
        }
        Some(key)
    }

    /// The mesh instance attached to `node`.
    #[must_use]
    pub fn mesh_of(&self, node: NodeHandle) -> Option<&Mesh> {
        let key = self.nodes.get(node)?.mesh?;
        self.meshes.get(key)
    }

    pub fn mesh_of_mut(&mut self, node: NodeHandle) -> Option<&mut Mesh> {
        let key = self.nodes.get(node)?.mesh?;
        self.meshes.get_mut(key)
    }

    /// The bone attached to `node`.
    #[must_use]
    pub fn bone_of(&self, node: NodeHandle) -> Option<&Bone> {
        let key = self.nodes.get(node)?.bone?;
        self.bones.get(key)
    }

    // ========================================================================
    // Matrix update pipeline
    // ========================================================================

    /// Refreshes every world matrix. Call once per frame after animation
    /// writes local transforms.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(&mut self.nodes, &self.root_nodes);
    }

    /// Refreshes world matrices of one subtree.
    pub fn update_subtree(&mut self, root: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, root);
    }
}

use glam::Affine3A;

use crate::scene::NodeHandle;

/// Influence of one bone on one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexWeight {
    pub vertex: u32,
    pub weight: f32,
}

impl VertexWeight {
    #[must_use]
    pub const fn new(vertex: u32, weight: f32) -> Self {
        Self { vertex, weight }
    }
}

/// Skinning data of one bone, attached to the node the bone animates.
#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,

    /// Node carrying the mesh this bone deforms. `None` makes the bone inert.
    pub mesh_node: Option<NodeHandle>,

    /// Bind-pose offset: mesh space to bone rest space.
    pub offset_matrix: Affine3A,

    pub weights: Vec<VertexWeight>,
}

impl Bone {
    #[must_use]
    pub fn new(name: &str, offset_matrix: Affine3A, weights: Vec<VertexWeight>) -> Self {
        Self {
            name: name.to_string(),
            mesh_node: None,
            offset_matrix,
            weights,
        }
    }

    #[must_use]
    pub fn attached_to(mut self, mesh_node: NodeHandle) -> Self {
        self.mesh_node = Some(mesh_node);
        self
    }
}

use std::sync::Arc;

use glam::Vec3;

use crate::assets::MeshDataHandle;
use crate::scene::NodeHandle;

/// Immutable mesh geometry, shared between every instance of the mesh.
///
/// Vertices and normals are flat `xyz` triplets, uvs flat `uv` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub indices: Vec<u32>,
    pub vertices: Vec<f32>,
    pub uvs: Vec<f32>,
    pub normals: Vec<f32>,
}

impl MeshData {
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Position of vertex `index`, if it exists.
    #[inline]
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        let v = self.vertices.get(index * 3..index * 3 + 3)?;
        Some(Vec3::new(v[0], v[1], v[2]))
    }
}

/// Deformed vertex positions of one mesh instance.
///
/// Written only by the skinning pass (reset, then accumulate) and read by
/// the renderer. Has the same `xyz` layout as [`MeshData::vertices`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkinVertexBuffer {
    data: Vec<f32>,
}

impl SkinVertexBuffer {
    #[must_use]
    pub fn new(float_count: usize) -> Self {
        Self {
            data: vec![0.0; float_count],
        }
    }

    /// Zeroes every component.
    pub fn reset(&mut self) {
        self.data.fill(0.0);
    }

    /// Adds `value * factor` into vertex `index`. Returns `false` and leaves
    /// the buffer untouched when the index is out of range.
    pub fn accumulate(&mut self, index: usize, value: Vec3, factor: f32) -> bool {
        let Some(slot) = self.data.get_mut(index * 3..index * 3 + 3) else {
            return false;
        };
        slot[0] += value.x * factor;
        slot[1] += value.y * factor;
        slot[2] += value.z * factor;
        true
    }

    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        let v = self.data.get(index * 3..index * 3 + 3)?;
        Some(Vec3::new(v[0], v[1], v[2]))
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A mesh instance attached to a scene node.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,

    // === Scene graph node ===
    pub node_id: Option<NodeHandle>,

    // === Resource reference ===
    pub handle: Option<MeshDataHandle>,
    pub data: Arc<MeshData>,

    // === Instance state ===
    pub skin: SkinVertexBuffer,
}

impl Mesh {
    #[must_use]
    pub fn new(name: &str, data: Arc<MeshData>) -> Self {
        let skin = SkinVertexBuffer::new(data.vertices.len());
        Self {
            name: name.to_string(),
            node_id: None,
            handle: None,
            data,
            skin,
        }
    }

    #[must_use]
    pub fn with_handle(mut self, handle: MeshDataHandle) -> Self {
        self.handle = Some(handle);
        self
    }
}

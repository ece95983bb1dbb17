//! In-memory form of the data handed over by the asset pipeline.
//!
//! These types mirror what a scene-import library reports: a node tree with
//! local matrices, triangle meshes with per-bone vertex weights, and
//! animations made of per-node key lists timed in ticks.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::resources::bone::VertexWeight;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorKey {
    pub time: f64,
    pub value: Vec3,
}

impl VectorKey {
    #[must_use]
    pub const fn new(time: f64, value: Vec3) -> Self {
        Self { time, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuatKey {
    pub time: f64,
    pub value: Quat,
}

impl QuatKey {
    #[must_use]
    pub const fn new(time: f64, value: Quat) -> Self {
        Self { time, value }
    }
}

/// Keys driving one node.
#[derive(Debug, Clone, Default)]
pub struct ExternalChannel {
    pub node_name: String,
    pub position_keys: Vec<VectorKey>,
    pub rotation_keys: Vec<QuatKey>,
    pub scaling_keys: Vec<VectorKey>,
}

#[derive(Debug, Clone, Default)]
pub struct ExternalAnimation {
    /// May be empty; the importer then names the clip after the take.
    pub name: String,
    pub duration_ticks: f64,
    /// Zero when the source file does not say.
    pub ticks_per_second: f64,
    pub channels: Vec<ExternalChannel>,
}

#[derive(Debug, Clone)]
pub struct ExternalBone {
    pub name: String,
    /// Mesh space to bone space in bind pose.
    pub offset_matrix: Mat4,
    pub weights: Vec<VertexWeight>,
}

#[derive(Debug, Clone, Default)]
pub struct ExternalMesh {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub faces: Vec<Vec<u32>>,
    pub bones: Vec<ExternalBone>,
}

impl ExternalMesh {
    /// True when every face has exactly three corners.
    #[must_use]
    pub fn is_triangulated(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 3)
    }
}

#[derive(Debug, Clone)]
pub struct ExternalNode {
    pub name: String,
    pub transform: Mat4,
    /// Indices into [`ExternalScene::meshes`].
    pub meshes: Vec<usize>,
    /// Indices into [`ExternalScene::nodes`].
    pub children: Vec<usize>,
}

impl ExternalNode {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transform: Mat4::IDENTITY,
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// A flattened node tree. Node 0 is the root.
#[derive(Debug, Clone, Default)]
pub struct ExternalScene {
    pub nodes: Vec<ExternalNode>,
    pub meshes: Vec<ExternalMesh>,
    pub animations: Vec<ExternalAnimation>,
}

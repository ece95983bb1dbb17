//! Core resource definitions
//!
//! Plain data consumed by the animation core, independent of any renderer:
//! - Mesh: shared geometry plus the per-instance skinned vertex buffer
//! - Bone: offset matrix and vertex weights of one skeleton bone

pub mod bone;
pub mod mesh;

pub use bone::{Bone, VertexWeight};
pub use mesh::{Mesh, MeshData, SkinVertexBuffer};

//! Scene graph module
//!
//! The minimal hierarchy the animation core drives:
//! - Node: scene node (name, parent/children, transform, component keys)
//! - Transform: local TRS with cached matrices
//! - Scene: node arena plus mesh and bone component pools
//! - transform_system: iterative world-matrix propagation

pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct BoneKey;
}

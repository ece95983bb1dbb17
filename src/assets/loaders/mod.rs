//! Importers from the asset pipeline's in-memory scene into engine data.

pub mod animation;
pub mod scene;
pub mod session;
pub mod source;

pub use animation::{
    build_clip, import_animation, import_channel, track_from_quat_keys, track_from_scale_keys,
    track_from_vector_keys,
};
pub use scene::{ImportedScene, SceneImporter};
pub use session::{BoneSource, ImportSession};
pub use source::{
    ExternalAnimation, ExternalBone, ExternalChannel, ExternalMesh, ExternalNode, ExternalScene,
    QuatKey, VectorKey,
};

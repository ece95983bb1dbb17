#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod assets;
pub mod errors;
pub mod resources;
pub mod scene;
pub mod settings;

pub use animation::{
    AnimationAction, AnimationClip, AnimationPlayer, AnimationSystem, Binder, BoneTransformTrack,
    KeyframeTrack, PlayerState, SkinningSystem, TrackKind,
};
pub use assets::{AssetServer, ClipHandle, MeshDataHandle, SceneImporter};
pub use errors::{Error, Result};
pub use resources::{Bone, Mesh, MeshData, VertexWeight};
pub use scene::{Node, NodeHandle, Scene, Transform};
pub use settings::AnimationSettings;

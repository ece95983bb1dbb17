mod values;
pub mod tracks;
pub mod clip;
pub mod pose;
pub mod action;
pub mod binding;
pub mod binder;
pub mod player;
pub mod skinning;
pub mod system;

pub use values::Interpolatable;
pub use tracks::{KeyframeBracket, KeyframeTrack, TrackKind};
pub use clip::{AnimationClip, BoneTransformTrack};
pub use pose::{BonePose, LocalPose};
pub use action::{AdvanceOutcome, AnimationAction};
pub use binder::Binder;
pub use binding::TrackBinding;
pub use player::{AnimationPlayer, PlayerState};
pub use skinning::SkinningSystem;
pub use system::AnimationSystem;

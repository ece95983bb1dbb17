//! Animation Settings
//!
//! Tunables shared by the importer, the player and the skinning pass.
//!
//! ```rust,ignore
//! use tabula::settings::AnimationSettings;
//!
//! // Defaults match the asset pipeline conventions
//! let settings = AnimationSettings::default();
//!
//! // Slower crossfades, no implicit looping
//! let settings = AnimationSettings {
//!     blend_duration: 2.0,
//!     loop_by_default: false,
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

/// Crossfade window between two clips, in seconds.
pub const DEFAULT_BLEND_DURATION: f64 = 1.0;

/// FBX/DAE exports carry a 0.01 unit scale; skinned output undoes it.
pub const DEFAULT_SKIN_SCALE: f32 = 100.0;

/// Fallback sample rate when the pipeline reports zero ticks per second.
pub const DEFAULT_TICKS_PER_SECOND: f64 = 24.0;

/// Scale components closer than this to 1.0 are snapped to exactly 1.0.
pub const DEFAULT_SCALE_SNAP_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Length of a clip-switch crossfade, in seconds.
    pub blend_duration: f64,
    /// Global factor applied to every skinned vertex contribution.
    pub skin_scale: f32,
    /// Used by the importer when the source reports a zero sample rate.
    pub default_ticks_per_second: f64,
    /// Snap window for imported scale keys.
    pub scale_snap_epsilon: f32,
    /// Loop flag given to newly attached clips.
    pub loop_by_default: bool,
    /// Interpolation flag given to newly attached clips.
    pub interpolate_by_default: bool,
    /// File extension for persisted clips.
    pub clip_extension: String,
    /// File extension for persisted meshes.
    pub mesh_extension: String,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            blend_duration: DEFAULT_BLEND_DURATION,
            skin_scale: DEFAULT_SKIN_SCALE,
            default_ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            scale_snap_epsilon: DEFAULT_SCALE_SNAP_EPSILON,
            loop_by_default: true,
            interpolate_by_default: true,
            clip_extension: "trAnimation".to_string(),
            mesh_extension: "trMesh".to_string(),
        }
    }
}

use glam::{Quat, Vec3};

use crate::animation::clip::BoneTransformTrack;
use crate::animation::values::Interpolatable;
use crate::scene::transform::Transform;

/// Per-channel samples of one bone at one instant.
///
/// A channel is `None` when its track holds no samples; the bound node keeps
/// its current value for that channel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BonePose {
    pub position: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub scale: Option<Vec3>,
}

impl BonePose {
    /// Evaluates the three tracks of `bone` independently at `time`.
    #[must_use]
    pub fn sample(bone: &BoneTransformTrack, time: f64, interpolate: bool) -> Self {
        Self {
            position: bone.positions.sample(time, interpolate),
            rotation: bone.rotations.sample(time, interpolate),
            scale: bone.scales.sample(time, interpolate),
        }
    }

    /// Fills the channels this pose lacks from `base`.
    #[must_use]
    pub fn resolve(&self, base: &LocalPose) -> LocalPose {
        LocalPose {
            position: self.position.unwrap_or(base.position),
            rotation: self.rotation.unwrap_or(base.rotation),
            scale: self.scale.unwrap_or(base.scale),
        }
    }
}

/// A fully defined local TRS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for LocalPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalPose {
    #[must_use]
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            position: transform.position,
            rotation: transform.rotation,
            scale: transform.scale,
        }
    }

    /// Crossfades from `from` to `to`. At `fraction >= 1` the result is `to`
    /// exactly.
    #[must_use]
    pub fn blend(from: &Self, to: &Self, fraction: f32) -> Self {
        if fraction >= 1.0 {
            return *to;
        }
        let fraction = fraction.max(0.0);
        Self {
            position: Vec3::interpolate_linear(from.position, to.position, fraction),
            rotation: Quat::interpolate_linear(from.rotation, to.rotation, fraction),
            scale: Vec3::interpolate_linear(from.scale, to.scale, fraction),
        }
    }

    /// Writes the pose onto a node's local transform.
    pub fn apply(&self, transform: &mut Transform) {
        transform.position = self.position;
        transform.rotation = self.rotation;
        transform.scale = self.scale;
        transform.mark_dirty();
    }
}

use crate::animation::tracks::{KeyframeTrack, TrackKind};

/// Position, rotation and scale tracks of one animated bone.
#[derive(Debug, Clone, PartialEq)]
pub struct BoneTransformTrack {
    pub bone_name: String,
    pub positions: KeyframeTrack,
    pub rotations: KeyframeTrack,
    pub scales: KeyframeTrack,
}

impl BoneTransformTrack {
    /// A bone with three empty tracks.
    #[must_use]
    pub fn new(bone_name: impl Into<String>) -> Self {
        Self {
            bone_name: bone_name.into(),
            positions: KeyframeTrack::empty(TrackKind::Position),
            rotations: KeyframeTrack::empty(TrackKind::Rotation),
            scales: KeyframeTrack::empty(TrackKind::Scale),
        }
    }

    #[must_use]
    pub fn with_positions(mut self, track: KeyframeTrack) -> Self {
        debug_assert_eq!(track.kind(), TrackKind::Position);
        self.positions = track;
        self
    }

    #[must_use]
    pub fn with_rotations(mut self, track: KeyframeTrack) -> Self {
        debug_assert_eq!(track.kind(), TrackKind::Rotation);
        self.rotations = track;
        self
    }

    #[must_use]
    pub fn with_scales(mut self, track: KeyframeTrack) -> Self {
        debug_assert_eq!(track.kind(), TrackKind::Scale);
        self.scales = track;
        self
    }

    /// The track animating `kind`.
    #[must_use]
    pub fn track(&self, kind: TrackKind) -> &KeyframeTrack {
        match kind {
            TrackKind::Position => &self.positions,
            TrackKind::Rotation => &self.rotations,
            TrackKind::Scale => &self.scales,
        }
    }
}

/// A complete named animation. Immutable once built; shared by `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub ticks_per_second: f64,
    /// Length in seconds.
    pub duration: f64,
    pub bones: Vec<BoneTransformTrack>,
}

impl AnimationClip {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        ticks_per_second: f64,
        duration: f64,
        bones: Vec<BoneTransformTrack>,
    ) -> Self {
        Self {
            name: name.into(),
            ticks_per_second,
            duration,
            bones,
        }
    }

    /// Builds a clip from a pipeline duration expressed in ticks.
    ///
    /// A zero sample rate falls back to `default_ticks_per_second`.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn from_ticks(
        name: impl Into<String>,
        duration_ticks: f64,
        ticks_per_second: f64,
        default_ticks_per_second: f64,
        bones: Vec<BoneTransformTrack>,
    ) -> Self {
        let ticks_per_second = if ticks_per_second == 0.0 {
            default_ticks_per_second
        } else {
            ticks_per_second
        };
        Self::new(name, ticks_per_second, duration_ticks / ticks_per_second, bones)
    }

    /// Finds the tracks animating `bone_name`.
    #[must_use]
    pub fn bone(&self, bone_name: &str) -> Option<&BoneTransformTrack> {
        self.bones.iter().find(|b| b.bone_name == bone_name)
    }

    #[inline]
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }
}

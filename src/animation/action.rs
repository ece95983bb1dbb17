use std::sync::Arc;

use crate::animation::binding::TrackBinding;
use crate::animation::clip::AnimationClip;
use crate::animation::pose::{BonePose, LocalPose};
use crate::scene::{NodeHandle, Scene};

/// What happened to the timer during [`AnimationAction::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Still inside `[0, duration]`.
    Running,
    /// Ran off an end and wrapped back to the start.
    Wrapped,
    /// Ran off an end of a non-looping clip and was clamped to it.
    Finished,
}

/// A clip attached to a player: its bindings plus per-clip playback state.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    /// Clip timer in seconds.
    pub time: f64,
    /// Playback speed multiplier.
    pub time_scale: f64,
    pub looping: bool,
    pub interpolate: bool,

    pub(crate) bindings: Vec<TrackBinding>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>, bindings: Vec<TrackBinding>) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            looping: true,
            interpolate: true,
            bindings,
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.clip.duration
    }

    #[must_use]
    pub fn bindings(&self) -> &[TrackBinding] {
        &self.bindings
    }

    /// Nodes driven by this action.
    pub fn bound_nodes(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.bindings.iter().map(|b| b.node)
    }

    /// Advances the timer by `dt * time_scale`.
    ///
    /// Passing the end wraps to 0 when looping, otherwise clamps to the end.
    /// Clips without a positive duration never wrap.
    pub fn advance(&mut self, dt: f64) -> AdvanceOutcome {
        self.time += dt * self.time_scale;

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return AdvanceOutcome::Running;
        }

        if self.time > duration {
            if self.looping {
                self.time = 0.0;
                return AdvanceOutcome::Wrapped;
            }
            self.time = duration;
            return AdvanceOutcome::Finished;
        }

        if self.time < 0.0 {
            if self.looping {
                self.time = duration;
                return AdvanceOutcome::Wrapped;
            }
            self.time = 0.0;
            return AdvanceOutcome::Finished;
        }

        AdvanceOutcome::Running
    }

    /// Samples every bound bone at the current time.
    pub fn sample_poses(&self) -> impl Iterator<Item = (NodeHandle, BonePose)> + '_ {
        self.bindings.iter().filter_map(move |binding| {
            let bone = self.clip.bones.get(binding.bone_index)?;
            Some((
                binding.node,
                BonePose::sample(bone, self.time, self.interpolate),
            ))
        })
    }

    /// Writes the pose at the current time onto the bound nodes.
    pub fn apply(&self, scene: &mut Scene) {
        for (node_handle, pose) in self.sample_poses() {
            if let Some(node) = scene.get_node_mut(node_handle) {
                let base = LocalPose::from_transform(&node.transform);
                pose.resolve(&base).apply(&mut node.transform);
            }
        }
    }
}

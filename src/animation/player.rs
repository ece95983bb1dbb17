use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::animation::action::{AdvanceOutcome, AnimationAction};
use crate::animation::binder::Binder;
use crate::animation::clip::AnimationClip;
use crate::animation::pose::{BonePose, LocalPose};
use crate::errors::{Error, Result};
use crate::scene::{NodeHandle, Scene};
use crate::settings::AnimationSettings;

/// Playback state of an [`AnimationPlayer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerState {
    Playing,
    Paused,
    /// Set when a non-looping clip reaches its end. The next tick rewinds to
    /// the start and pauses.
    Stopped,
    /// Crossfading from the clip at `previous` into the current clip.
    Blending { previous: usize, blend_timer: f64 },
}

/// Drives a set of clips over one skeleton.
///
/// Every clip keeps its own timer and flags. At most one clip is current;
/// during a switch the outgoing clip keeps advancing until the crossfade
/// completes.
pub struct AnimationPlayer {
    actions: Vec<AnimationAction>,
    current: Option<usize>,
    state: PlayerState,
    settings: AnimationSettings,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new(AnimationSettings::default())
    }
}

impl AnimationPlayer {
    #[must_use]
    pub fn new(settings: AnimationSettings) -> Self {
        Self {
            actions: Vec::new(),
            current: None,
            state: PlayerState::Playing,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    // ========================================================================
    // Clip list
    // ========================================================================

    /// Binds `clip` to the hierarchy under `root` and appends it.
    ///
    /// The first clip added becomes current. Returns the clip's index.
    pub fn add_clip(&mut self, clip: Arc<AnimationClip>, scene: &Scene, root: NodeHandle) -> usize {
        let bindings = Binder::bind(scene, root, &clip);
        let mut action = AnimationAction::new(clip, bindings);
        action.looping = self.settings.loop_by_default;
        action.interpolate = self.settings.interpolate_by_default;
        self.add_action(action)
    }

    /// Appends an already bound action.
    pub fn add_action(&mut self, action: AnimationAction) -> usize {
        let index = self.actions.len();
        log::debug!(
            "Attached clip '{}' at index {index} ({} bound bones)",
            action.clip().name,
            action.bindings.len()
        );
        self.actions.push(action);
        if self.current.is_none() {
            self.current = Some(index);
        }
        index
    }

    /// Drops every clip. Used when the owning scene is torn down or
    /// re-imported.
    pub fn clear(&mut self) {
        self.actions.clear();
        self.current = None;
        self.state = PlayerState::Playing;
    }

    #[must_use]
    pub fn clip_count(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn clip_name(&self, index: usize) -> Option<&str> {
        self.actions.get(index).map(|a| a.clip().name.as_str())
    }

    #[must_use]
    pub fn action(&self, index: usize) -> Option<&AnimationAction> {
        self.actions.get(index)
    }

    pub fn action_mut(&mut self, index: usize) -> Option<&mut AnimationAction> {
        self.actions.get_mut(index)
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn current_action(&self) -> Option<&AnimationAction> {
        self.actions.get(self.current?)
    }

    pub fn current_action_mut(&mut self) -> Option<&mut AnimationAction> {
        self.actions.get_mut(self.current?)
    }

    #[must_use]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Timer of the current clip, in seconds.
    #[must_use]
    pub fn current_time(&self) -> Option<f64> {
        self.current_action().map(|a| a.time)
    }

    // ========================================================================
    // Per-clip settings
    // ========================================================================

    pub fn set_looping(&mut self, looping: bool) {
        if let Some(action) = self.current_action_mut() {
            action.looping = looping;
        }
    }

    pub fn set_interpolate(&mut self, interpolate: bool) {
        if let Some(action) = self.current_action_mut() {
            action.interpolate = interpolate;
        }
    }

    pub fn set_time_scale(&mut self, time_scale: f64) {
        if let Some(action) = self.current_action_mut() {
            action.time_scale = time_scale;
        }
    }

    // ========================================================================
    // Transport
    // ========================================================================

    pub fn play(&mut self) {
        self.state = PlayerState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = PlayerState::Paused;
    }

    pub fn stop(&mut self) {
        self.state = PlayerState::Stopped;
    }

    /// Makes the clip at `index` current and starts a crossfade from the
    /// clip that was playing.
    ///
    /// The incoming clip restarts at 0 and its pose is written immediately.
    /// With no current clip, or when `index` is already current, playback
    /// restarts without a crossfade.
    pub fn switch_clip(&mut self, index: usize, scene: &mut Scene) -> Result<()> {
        if index >= self.actions.len() {
            return Err(Error::ClipIndexOutOfBounds {
                index,
                count: self.actions.len(),
            });
        }

        let previous = self.current.replace(index);
        self.actions[index].time = 0.0;
        self.actions[index].apply(scene);

        self.state = match previous {
            Some(previous) if previous != index => {
                log::debug!(
                    "Blending '{}' -> '{}'",
                    self.actions[previous].clip().name,
                    self.actions[index].clip().name
                );
                PlayerState::Blending {
                    previous,
                    blend_timer: 0.0,
                }
            }
            _ => PlayerState::Playing,
        };

        Ok(())
    }

    /// Sets the current clip's timer (clamped to its duration) and writes
    /// the pose at that time.
    pub fn scrub(&mut self, time: f64, scene: &mut Scene) {
        let Some(action) = self.current_action_mut() else {
            return;
        };
        action.time = time.clamp(0.0, action.duration().max(0.0));
        action.apply(scene);
    }

    /// Moves the current clip forward by `dt * time_scale` and pauses.
    ///
    /// Does nothing once the timer has reached the clip's duration. Passing
    /// the end wraps to 0.
    pub fn step_forward(&mut self, dt: f64, scene: &mut Scene) {
        let Some(action) = self.current_action_mut() else {
            return;
        };
        if action.time >= action.duration() {
            return;
        }
        action.time += dt * action.time_scale;
        if action.time > action.duration() {
            action.time = 0.0;
        }
        action.apply(scene);
        self.state = PlayerState::Paused;
    }

    /// Moves the current clip backward by `dt * time_scale`, stopping at 0,
    /// and pauses.
    ///
    /// Does nothing while the timer is already at 0.
    pub fn step_backward(&mut self, dt: f64, scene: &mut Scene) {
        let Some(action) = self.current_action_mut() else {
            return;
        };
        if action.time <= 0.0 {
            return;
        }
        action.time = (action.time - dt * action.time_scale).max(0.0);
        action.apply(scene);
        self.state = PlayerState::Paused;
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Advances the active clip(s) by `dt` seconds and writes the resulting
    /// pose onto the bound nodes.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) {
        let Some(current) = self.current else {
            return;
        };
        let dt = f64::from(dt);

        match self.state {
            PlayerState::Paused => {}
            PlayerState::Playing => {
                let action = &mut self.actions[current];
                if action.advance(dt) == AdvanceOutcome::Finished {
                    self.state = PlayerState::Stopped;
                }
                action.apply(scene);
            }
            PlayerState::Stopped => {
                let action = &mut self.actions[current];
                action.time = 0.0;
                action.apply(scene);
                self.state = PlayerState::Paused;
            }
            PlayerState::Blending {
                previous,
                blend_timer,
            } => {
                self.actions[previous].advance(dt);
                self.actions[current].advance(dt);

                let blend_timer = blend_timer + dt;
                let fraction = if self.settings.blend_duration > 0.0 {
                    blend_timer / self.settings.blend_duration
                } else {
                    1.0
                };

                log::trace!("Blend {previous} -> {current}: {fraction:.3}");
                self.apply_blended(previous, current, fraction as f32, scene);

                self.state = if fraction >= 1.0 {
                    PlayerState::Playing
                } else {
                    PlayerState::Blending {
                        previous,
                        blend_timer,
                    }
                };
            }
        }
    }

    /// Writes `lerp(outgoing, incoming, fraction)` onto the nodes bound by
    /// the incoming clip.
    fn apply_blended(&self, previous: usize, current: usize, fraction: f32, scene: &mut Scene) {
        let incoming = &self.actions[current];
        if fraction >= 1.0 {
            incoming.apply(scene);
            return;
        }

        let mut outgoing: FxHashMap<NodeHandle, BonePose> = FxHashMap::default();
        for (node, pose) in self.actions[previous].sample_poses() {
            outgoing.entry(node).or_insert(pose);
        }

        for (node_handle, pose) in incoming.sample_poses() {
            let Some(node) = scene.get_node_mut(node_handle) else {
                continue;
            };
            let base = LocalPose::from_transform(&node.transform);
            let to = pose.resolve(&base);
            let from = outgoing
                .get(&node_handle)
                .map_or(base, |p| p.resolve(&base));
            LocalPose::blend(&from, &to, fraction).apply(&mut node.transform);
        }
    }

    /// Nodes written by the clips that are currently active.
    #[must_use]
    pub fn animated_nodes(&self) -> Vec<NodeHandle> {
        let Some(current) = self.current else {
            return Vec::new();
        };

        let mut seen = FxHashSet::default();
        let mut nodes = Vec::new();
        let mut collect = |action: &AnimationAction| {
            for node in action.bound_nodes() {
                if seen.insert(node) {
                    nodes.push(node);
                }
            }
        };

        collect(&self.actions[current]);
        if let PlayerState::Blending { previous, .. } = self.state {
            collect(&self.actions[previous]);
        }
        nodes
    }
}

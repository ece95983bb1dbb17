use crate::animation::player::AnimationPlayer;
use crate::animation::skinning::SkinningSystem;
use crate::scene::Scene;

/// Animation system.
///
/// Runs one frame of the pipeline in order: player tick, world matrix
/// propagation, skinning.
pub struct AnimationSystem;

impl AnimationSystem {
    /// Advances `player` by `dt` seconds and brings `scene` up to date.
    ///
    /// # Arguments
    /// * `player` - Player driving the scene's skeleton
    /// * `scene` - Scene reference
    /// * `dt` - Delta time per frame (in seconds)
    #[inline]
    pub fn update(player: &mut AnimationPlayer, scene: &mut Scene, dt: f32) {
        player.tick(dt, scene);
        scene.update_matrix_world();

        let bone_nodes = player.animated_nodes();
        SkinningSystem::deform(scene, &bone_nodes, player.settings().skin_scale);
    }
}

use crate::animation::binding::TrackBinding;
use crate::animation::clip::AnimationClip;
use crate::scene::{NodeHandle, Scene};

pub struct Binder;

impl Binder {
    /// Resolves every bone of `clip` to the first node with the same name in
    /// the subtree under `root`. Bones without a matching node stay unbound.
    #[must_use]
    pub fn bind(scene: &Scene, root: NodeHandle, clip: &AnimationClip) -> Vec<TrackBinding> {
        let mut bindings = Vec::with_capacity(clip.bones.len());

        for (bone_index, bone) in clip.bones.iter().enumerate() {
            if let Some(node) = scene.find_node_by_name(root, &bone.bone_name) {
                bindings.push(TrackBinding { bone_index, node });
            } else {
                log::debug!(
                    "Clip '{}': no node named '{}', bone left unbound",
                    clip.name,
                    bone.bone_name
                );
            }
        }

        bindings
    }
}

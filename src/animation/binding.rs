use crate::scene::NodeHandle;

/// Binds the tracks of bone `bone_index` in a clip to the scene node whose
/// local transform they drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackBinding {
    pub bone_index: usize,
    pub node: NodeHandle,
}

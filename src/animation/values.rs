use glam::{Quat, Vec3};

/// A keyframe value that can be rebuilt from a track's flat float storage and
/// blended towards another value of the same type.
pub trait Interpolatable: Copy + Sized {
    /// Number of `f32` components per sample.
    const DIM: usize;

    /// Builds a value from exactly `DIM` components.
    fn from_components(components: &[f32]) -> Self;

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for Vec3 {
    const DIM: usize = 3;

    fn from_components(components: &[f32]) -> Self {
        Vec3::new(components[0], components[1], components[2])
    }

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    const DIM: usize = 4;

    // Stored as x, y, z, w.
    fn from_components(components: &[f32]) -> Self {
        Quat::from_xyzw(components[0], components[1], components[2], components[3])
    }

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }
}

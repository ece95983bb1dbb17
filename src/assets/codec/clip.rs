//! Animation clip asset layout
//!
//! ```text
//! [name: 128 bytes, NUL-padded]
//! [duration: f64][ticks_per_second: f64][bone_count: u32]
//! repeat bone_count:
//!   [name_len: u32][name: name_len + 1 bytes, NUL-terminated]
//!   [position track][rotation track][scale track]
//! ```
//!
//! All numbers are little-endian, with no padding between fields.

use crate::animation::clip::{AnimationClip, BoneTransformTrack};
use crate::animation::tracks::TrackKind;
use crate::assets::codec::bytes::{ByteReader, ByteWriter};
use crate::assets::codec::track::{encoded_track_size, read_track, write_track};
use crate::errors::Result;

/// Size of the fixed clip-name field, terminator included.
pub const CLIP_NAME_SIZE: usize = 128;

/// Smallest possible encoded bone: empty name plus three empty tracks.
const MIN_BONE_SIZE: usize = 4 + 1 + 3 * 4;

/// Cuts `name` to at most `max` bytes without splitting a character.
fn truncate_utf8(name: &str, max: usize) -> &str {
    if name.len() <= max {
        return name;
    }
    let mut end = max;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// Encoded size of `clip` in bytes.
#[must_use]
pub fn encoded_clip_size(clip: &AnimationClip) -> usize {
    let header = CLIP_NAME_SIZE + 8 + 8 + 4;
    clip.bones.iter().fold(header, |size, bone| {
        size + 4
            + bone.bone_name.len()
            + 1
            + encoded_track_size(&bone.positions)
            + encoded_track_size(&bone.rotations)
            + encoded_track_size(&bone.scales)
    })
}

#[must_use]
pub fn encode_clip(clip: &AnimationClip) -> Vec<u8> {
    let mut writer = ByteWriter::with_capacity(encoded_clip_size(clip));

    let mut name_field = [0u8; CLIP_NAME_SIZE];
    let name = truncate_utf8(&clip.name, CLIP_NAME_SIZE - 1);
    if name.len() < clip.name.len() {
        log::warn!(
            "Clip name '{}' truncated to {} bytes",
            clip.name,
            CLIP_NAME_SIZE - 1
        );
    }
    name_field[..name.len()].copy_from_slice(name.as_bytes());
    writer.write_bytes(&name_field);

    writer.write_f64_le(clip.duration);
    writer.write_f64_le(clip.ticks_per_second);
    writer.write_u32_le(clip.bones.len() as u32);

    for bone in &clip.bones {
        writer.write_u32_le(bone.bone_name.len() as u32);
        writer.write_bytes(bone.bone_name.as_bytes());
        writer.write_bytes(&[0]);

        write_track(&mut writer, &bone.positions);
        write_track(&mut writer, &bone.rotations);
        write_track(&mut writer, &bone.scales);
    }

    writer.into_inner()
}

pub fn decode_clip(bytes: &[u8]) -> Result<AnimationClip> {
    let mut reader = ByteReader::new(bytes);

    let name_field = reader.read_bytes(CLIP_NAME_SIZE, "clip name")?;
    let name_len = name_field
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(CLIP_NAME_SIZE);
    let name = String::from_utf8_lossy(&name_field[..name_len]).into_owned();

    let duration = reader.read_f64_le("clip duration")?;
    let ticks_per_second = reader.read_f64_le("clip ticks per second")?;
    let bone_count = reader.read_u32_le("clip bone count")? as usize;

    reader.ensure(bone_count.saturating_mul(MIN_BONE_SIZE), "clip bones")?;

    let mut bones = Vec::with_capacity(bone_count);
    for _ in 0..bone_count {
        let bone_name_len = reader.read_u32_le("bone name length")? as usize;
        let raw_name = reader.read_bytes(bone_name_len.saturating_add(1), "bone name")?;
        let bone_name = String::from_utf8_lossy(&raw_name[..bone_name_len]).into_owned();

        let positions = read_track(&mut reader, TrackKind::Position)?;
        let rotations = read_track(&mut reader, TrackKind::Rotation)?;
        let scales = read_track(&mut reader, TrackKind::Scale)?;

        bones.push(
            BoneTransformTrack::new(bone_name)
                .with_positions(positions)
                .with_rotations(rotations)
                .with_scales(scales),
        );
    }

    if reader.remaining() > 0 {
        log::debug!(
            "Clip '{name}' decoded with {} trailing bytes",
            reader.remaining()
        );
    }

    Ok(AnimationClip::new(name, ticks_per_second, duration, bones))
}

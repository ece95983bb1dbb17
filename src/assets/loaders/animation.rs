use std::path::Path;

use crate::animation::clip::{AnimationClip, BoneTransformTrack};
use crate::animation::tracks::{KeyframeTrack, TrackKind};
use crate::assets::loaders::session::ImportSession;
use crate::assets::loaders::source::{ExternalAnimation, ExternalChannel, QuatKey, VectorKey};
use crate::assets::server::{AssetServer, ClipHandle};
use crate::errors::{Error, Result};
use crate::settings::AnimationSettings;

/// Copies vector keys verbatim into a position or scale track.
#[must_use]
pub fn track_from_vector_keys(kind: TrackKind, keys: &[VectorKey]) -> KeyframeTrack {
    let mut track = KeyframeTrack::init(kind, keys.len());
    for (i, key) in keys.iter().enumerate() {
        track.set(i, key.time, &key.value.to_array());
    }
    track
}

/// Copies rotation keys verbatim, components stored `x, y, z, w`.
#[must_use]
pub fn track_from_quat_keys(keys: &[QuatKey]) -> KeyframeTrack {
    let mut track = KeyframeTrack::init(TrackKind::Rotation, keys.len());
    for (i, key) in keys.iter().enumerate() {
        track.set(i, key.time, &key.value.to_array());
    }
    track
}

/// Like [`track_from_vector_keys`], but components within `epsilon` of 1.0
/// are stored as exactly 1.0.
#[must_use]
pub fn track_from_scale_keys(keys: &[VectorKey], epsilon: f32) -> KeyframeTrack {
    let snap = |c: f32| if (c - 1.0).abs() < epsilon { 1.0 } else { c };

    let mut track = KeyframeTrack::init(TrackKind::Scale, keys.len());
    for (i, key) in keys.iter().enumerate() {
        track.set(i, key.time, &key.value.to_array().map(snap));
    }
    track
}

/// Builds the three tracks of one bone from a pipeline channel.
#[must_use]
pub fn import_channel(channel: &ExternalChannel, settings: &AnimationSettings) -> BoneTransformTrack {
    BoneTransformTrack::new(channel.node_name.clone())
        .with_positions(track_from_vector_keys(TrackKind::Position, &channel.position_keys))
        .with_rotations(track_from_quat_keys(&channel.rotation_keys))
        .with_scales(track_from_scale_keys(&channel.scaling_keys, settings.scale_snap_epsilon))
}

/// Converts a pipeline animation into a clip without registering it.
///
/// Every call consumes a take number; unnamed animations are named after it.
pub fn build_clip(
    source: &ExternalAnimation,
    session: &mut ImportSession,
    settings: &AnimationSettings,
) -> Result<AnimationClip> {
    if source.channels.is_empty() {
        return Err(Error::ImportEmpty {
            name: source.name.clone(),
        });
    }

    let take = session.next_take_name();
    let name = if source.name.is_empty() {
        take
    } else {
        source.name.clone()
    };

    let bones = source
        .channels
        .iter()
        .map(|channel| import_channel(channel, settings))
        .collect();

    Ok(AnimationClip::from_ticks(
        name,
        source.duration_ticks,
        source.ticks_per_second,
        settings.default_ticks_per_second,
        bones,
    ))
}

/// Builds a clip, writes it under `dir`, then registers it.
///
/// On any failure nothing is registered.
pub fn import_animation(
    assets: &AssetServer,
    source: &ExternalAnimation,
    session: &mut ImportSession,
    settings: &AnimationSettings,
    dir: &Path,
) -> Result<ClipHandle> {
    let clip = build_clip(source, session, settings)?;
    log::info!(
        "Importing animation '{}': {} bones, {:.3}s at {} ticks/s",
        clip.name,
        clip.bone_count(),
        clip.duration,
        clip.ticks_per_second
    );

    let handle = assets.persist_clip(clip, dir)?;
    session.clips.push(handle);
    Ok(handle)
}

//! Keyframe track layout: `count:u32 | times:f64[count] | values:f32[count * dim]`.

use crate::animation::tracks::{KeyframeTrack, TrackKind};
use crate::assets::codec::bytes::{ByteReader, ByteWriter};
use crate::errors::Result;

/// Encoded size of `track` in bytes.
#[must_use]
pub fn encoded_track_size(track: &KeyframeTrack) -> usize {
    4 + track.len() * 8 + track.values().len() * 4
}

pub fn write_track(writer: &mut ByteWriter, track: &KeyframeTrack) {
    writer.write_u32_le(track.len() as u32);
    writer.write_f64_slice(track.times());
    writer.write_f32_slice(track.values());
}

#[must_use]
pub fn encode_track(track: &KeyframeTrack) -> Vec<u8> {
    let mut writer = ByteWriter::with_capacity(encoded_track_size(track));
    write_track(&mut writer, track);
    writer.into_inner()
}

/// Reads one track of `kind` at the reader's cursor.
pub fn read_track(reader: &mut ByteReader<'_>, kind: TrackKind) -> Result<KeyframeTrack> {
    let count = reader.read_u32_le("track sample count")? as usize;

    // Check the whole declared span before allocating anything.
    let needed = count
        .saturating_mul(8)
        .saturating_add(count.saturating_mul(kind.dim() * 4));
    reader.ensure(needed, "track samples")?;

    let times = reader.read_f64_vec(count, "track times")?;
    let values = reader.read_f32_vec(count * kind.dim(), "track values")?;

    let mut track = KeyframeTrack::init(kind, 0);
    track.times = times;
    track.values = values;
    Ok(track)
}

/// Decodes a track starting at byte `cursor`; returns it with the cursor just
/// past its last byte.
pub fn decode_track(bytes: &[u8], cursor: usize, kind: TrackKind) -> Result<(KeyframeTrack, usize)> {
    let mut reader = ByteReader::at(bytes, cursor);
    let track = read_track(&mut reader, kind)?;
    Ok((track, reader.cursor()))
}

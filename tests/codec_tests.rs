//! Binary Codec Tests
//!
//! Tests for:
//! - Keyframe track layout and cursor handling
//! - Clip file round trip, name truncation and header layout
//! - Mesh file layout
//! - FormatMismatch on truncated or lying buffers

use glam::{Quat, Vec3};

use tabula::animation::clip::{AnimationClip, BoneTransformTrack};
use tabula::animation::tracks::{KeyframeTrack, TrackKind};
use tabula::assets::codec::{
    ByteReader, CLIP_NAME_SIZE, decode_clip, decode_mesh, decode_track, encode_clip, encode_mesh,
    encode_track,
};
use tabula::errors::Error;
use tabula::resources::mesh::MeshData;

fn sample_track(kind: TrackKind, count: usize) -> KeyframeTrack {
    let dim = kind.dim();
    let times = (0..count).map(|i| i as f64 * 0.5).collect();
    let values = (0..count * dim).map(|i| i as f32 * 1.25 - 3.0).collect();
    KeyframeTrack::from_samples(kind, times, values).unwrap()
}

fn sample_clip(name: &str) -> AnimationClip {
    let mut rotations = KeyframeTrack::init(TrackKind::Rotation, 2);
    rotations.set(0, 0.0, &Quat::IDENTITY.to_array());
    rotations.set(1, 12.0, &Quat::from_rotation_z(0.7).to_array());

    let hip = BoneTransformTrack::new("hip")
        .with_positions(sample_track(TrackKind::Position, 3))
        .with_rotations(rotations)
        .with_scales(sample_track(TrackKind::Scale, 1));
    let spine = BoneTransformTrack::new("spine_01").with_positions(sample_track(TrackKind::Position, 2));

    AnimationClip::new(name, 30.0, 1.2345, vec![hip, spine])
}

// ============================================================================
// Track Layout
// ============================================================================

#[test]
fn track_layout_is_count_times_values() {
    let track = sample_track(TrackKind::Position, 2);
    let bytes = encode_track(&track);

    assert_eq!(bytes.len(), 4 + 2 * 8 + 2 * 3 * 4);
    assert_eq!(&bytes[0..4], &2u32.to_le_bytes());
    assert_eq!(&bytes[4..12], &0.0f64.to_le_bytes());
    assert_eq!(&bytes[12..20], &0.5f64.to_le_bytes());
    assert_eq!(&bytes[20..24], &(-3.0f32).to_le_bytes());
}

#[test]
fn track_decode_advances_cursor() {
    let a = sample_track(TrackKind::Rotation, 3);
    let b = sample_track(TrackKind::Scale, 1);
    let mut bytes = vec![0xAA; 5];
    bytes.extend(encode_track(&a));
    bytes.extend(encode_track(&b));

    let (decoded_a, cursor) = decode_track(&bytes, 5, TrackKind::Rotation).unwrap();
    let (decoded_b, end) = decode_track(&bytes, cursor, TrackKind::Scale).unwrap();

    assert_eq!(decoded_a, a);
    assert_eq!(decoded_b, b);
    assert_eq!(end, bytes.len());
}

#[test]
fn empty_track_round_trips() {
    let track = KeyframeTrack::empty(TrackKind::Scale);
    let bytes = encode_track(&track);
    assert_eq!(bytes, 0u32.to_le_bytes());

    let (decoded, cursor) = decode_track(&bytes, 0, TrackKind::Scale).unwrap();
    assert!(decoded.is_empty());
    assert_eq!(cursor, 4);
}

#[test]
fn track_count_past_end_is_format_mismatch() {
    let mut bytes = encode_track(&sample_track(TrackKind::Position, 4));
    bytes[0..4].copy_from_slice(&1_000_000u32.to_le_bytes());

    let err = decode_track(&bytes, 0, TrackKind::Position).unwrap_err();
    assert!(matches!(err, Error::FormatMismatch { .. }), "got {err:?}");
}

#[test]
fn byte_reader_never_reads_past_end() {
    let data = [1u8, 0, 0];
    let mut reader = ByteReader::new(&data);
    assert!(reader.read_u32_le("header").is_err());
    assert_eq!(reader.cursor(), 0);
    assert_eq!(reader.remaining(), 3);
}

#[test]
fn byte_reader_decodes_vectors_at_unaligned_offsets() {
    let times = [0.0f64, 0.5, 1.25];
    let values = [1.0f32, -2.0, 3.5];

    // One leading byte so neither vector starts on its natural alignment.
    let mut data = vec![0xAAu8];
    for t in times {
        data.extend_from_slice(&t.to_le_bytes());
    }
    for v in values {
        data.extend_from_slice(&v.to_le_bytes());
    }
    data.extend_from_slice(&7u32.to_le_bytes());

    let mut reader = ByteReader::at(&data, 1);
    assert_eq!(reader.read_f64_vec(3, "times").unwrap(), times);
    assert_eq!(reader.read_f32_vec(3, "values").unwrap(), values);
    assert_eq!(reader.read_u32_vec(1, "tail").unwrap(), vec![7]);
    assert_eq!(reader.remaining(), 0);

    assert!(reader.read_f32_vec(1, "values").is_err());
}

// ============================================================================
// Clip Round Trip
// ============================================================================

#[test]
fn clip_round_trip_is_bit_exact() {
    let clip = sample_clip("Take001");
    let decoded = decode_clip(&encode_clip(&clip)).unwrap();

    assert_eq!(decoded.name, clip.name);
    assert_eq!(decoded.duration.to_bits(), clip.duration.to_bits());
    assert_eq!(decoded.ticks_per_second.to_bits(), clip.ticks_per_second.to_bits());
    assert_eq!(decoded, clip);
}

#[test]
fn clip_header_layout() {
    let clip = sample_clip("walk");
    let bytes = encode_clip(&clip);

    assert_eq!(&bytes[..4], b"walk");
    assert!(bytes[4..CLIP_NAME_SIZE].iter().all(|&b| b == 0));
    assert_eq!(&bytes[CLIP_NAME_SIZE..CLIP_NAME_SIZE + 8], &1.2345f64.to_le_bytes());
    assert_eq!(&bytes[CLIP_NAME_SIZE + 8..CLIP_NAME_SIZE + 16], &30.0f64.to_le_bytes());
    assert_eq!(&bytes[CLIP_NAME_SIZE + 16..CLIP_NAME_SIZE + 20], &2u32.to_le_bytes());

    // First bone: name length, then the name with its terminator.
    let bone = CLIP_NAME_SIZE + 20;
    assert_eq!(&bytes[bone..bone + 4], &3u32.to_le_bytes());
    assert_eq!(&bytes[bone + 4..bone + 8], b"hip\0");
}

#[test]
fn clip_with_no_bones_round_trips() {
    let clip = AnimationClip::new("empty", 24.0, 0.0, Vec::new());
    let bytes = encode_clip(&clip);
    assert_eq!(bytes.len(), CLIP_NAME_SIZE + 20);
    assert_eq!(decode_clip(&bytes).unwrap(), clip);
}

#[test]
fn long_clip_name_is_truncated_to_127_bytes() {
    let name = "x".repeat(300);
    let decoded = decode_clip(&encode_clip(&sample_clip(&name))).unwrap();

    assert_eq!(decoded.name.len(), CLIP_NAME_SIZE - 1);
    assert!(name.starts_with(&decoded.name));
}

#[test]
fn multibyte_name_is_not_split() {
    // Exactly 127 bytes: kept whole.
    let name = format!("{}é", "a".repeat(CLIP_NAME_SIZE - 3));
    let decoded = decode_clip(&encode_clip(&sample_clip(&name))).unwrap();
    assert_eq!(decoded.name, name);

    // The 2-byte character straddles the limit and is dropped.
    let name = format!("{}é", "a".repeat(CLIP_NAME_SIZE - 2));
    let decoded = decode_clip(&encode_clip(&sample_clip(&name))).unwrap();
    assert_eq!(decoded.name, "a".repeat(CLIP_NAME_SIZE - 2));
}

// ============================================================================
// Clip Format Errors
// ============================================================================

#[test]
fn truncated_clip_is_format_mismatch() {
    let bytes = encode_clip(&sample_clip("walk"));
    for cut in [0, 10, CLIP_NAME_SIZE + 5, bytes.len() - 1] {
        let err = decode_clip(&bytes[..cut]).unwrap_err();
        assert!(matches!(err, Error::FormatMismatch { .. }), "cut {cut}: {err:?}");
    }
}

#[test]
fn huge_bone_count_is_format_mismatch() {
    let mut bytes = encode_clip(&sample_clip("walk"));
    let at = CLIP_NAME_SIZE + 16;
    bytes[at..at + 4].copy_from_slice(&u32::MAX.to_le_bytes());

    let err = decode_clip(&bytes).unwrap_err();
    assert!(matches!(err, Error::FormatMismatch { .. }));
}

#[test]
fn huge_bone_name_length_is_format_mismatch() {
    let mut bytes = encode_clip(&sample_clip("walk"));
    let at = CLIP_NAME_SIZE + 20;
    bytes[at..at + 4].copy_from_slice(&u32::MAX.to_le_bytes());

    let err = decode_clip(&bytes).unwrap_err();
    assert!(matches!(err, Error::FormatMismatch { .. }));
}

// ============================================================================
// Mesh Layout
// ============================================================================

fn triangle() -> MeshData {
    MeshData {
        indices: vec![0, 1, 2],
        vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        uvs: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
    }
}

#[test]
fn mesh_header_holds_element_counts() {
    let bytes = encode_mesh(&triangle());

    assert_eq!(&bytes[0..4], &3u32.to_le_bytes());
    assert_eq!(&bytes[4..8], &9u32.to_le_bytes());
    assert_eq!(&bytes[8..12], &6u32.to_le_bytes());
    assert_eq!(&bytes[12..16], &9u32.to_le_bytes());
    assert_eq!(bytes.len(), 16 + 4 * (3 + 9 + 6 + 9));
}

#[test]
fn mesh_round_trip() {
    let mesh = triangle();
    let decoded = decode_mesh(&encode_mesh(&mesh)).unwrap();
    assert_eq!(decoded, mesh);
    assert_eq!(decoded.vertex_count(), 3);
    assert_eq!(decoded.vertex(1), Some(Vec3::X));
}

#[test]
fn truncated_mesh_is_format_mismatch() {
    let bytes = encode_mesh(&triangle());
    let err = decode_mesh(&bytes[..bytes.len() - 2]).unwrap_err();
    assert!(matches!(err, Error::FormatMismatch { .. }));
}

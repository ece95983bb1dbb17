//! Binary asset codecs
//!
//! Fixed little-endian layouts for the engine-native clip and mesh files.
//! Decoders validate every declared count against the remaining buffer and
//! fail with [`Error::FormatMismatch`](crate::errors::Error::FormatMismatch)
//! rather than reading out of bounds.

pub mod bytes;
pub mod clip;
pub mod mesh;
pub mod track;

pub use bytes::{ByteReader, ByteWriter};
pub use clip::{CLIP_NAME_SIZE, decode_clip, encode_clip};
pub use mesh::{decode_mesh, encode_mesh};
pub use track::{decode_track, encode_track};

//! Mesh asset layout
//!
//! ```text
//! [index_count, vertex_count, uv_count, normal_count: u32]
//! [indices: u32[index_count]][vertices: f32[vertex_count]]
//! [uvs: f32[uv_count]][normals: f32[normal_count]]
//! ```
//!
//! Counts are element counts, not bytes.

use crate::assets::codec::bytes::{ByteReader, ByteWriter};
use crate::errors::Result;
use crate::resources::mesh::MeshData;

#[must_use]
pub fn encode_mesh(mesh: &MeshData) -> Vec<u8> {
    let size = 16 + 4 * (mesh.indices.len() + mesh.vertices.len() + mesh.uvs.len() + mesh.normals.len());
    let mut writer = ByteWriter::with_capacity(size);

    writer.write_u32_le(mesh.indices.len() as u32);
    writer.write_u32_le(mesh.vertices.len() as u32);
    writer.write_u32_le(mesh.uvs.len() as u32);
    writer.write_u32_le(mesh.normals.len() as u32);

    writer.write_u32_slice(&mesh.indices);
    writer.write_f32_slice(&mesh.vertices);
    writer.write_f32_slice(&mesh.uvs);
    writer.write_f32_slice(&mesh.normals);

    writer.into_inner()
}

pub fn decode_mesh(bytes: &[u8]) -> Result<MeshData> {
    let mut reader = ByteReader::new(bytes);

    let index_count = reader.read_u32_le("mesh index count")? as usize;
    let vertex_count = reader.read_u32_le("mesh vertex count")? as usize;
    let uv_count = reader.read_u32_le("mesh uv count")? as usize;
    let normal_count = reader.read_u32_le("mesh normal count")? as usize;

    let total = index_count
        .saturating_add(vertex_count)
        .saturating_add(uv_count)
        .saturating_add(normal_count);
    reader.ensure(total.saturating_mul(4), "mesh data")?;

    Ok(MeshData {
        indices: reader.read_u32_vec(index_count, "mesh indices")?,
        vertices: reader.read_f32_vec(vertex_count, "mesh vertices")?,
        uvs: reader.read_f32_vec(uv_count, "mesh uvs")?,
        normals: reader.read_f32_vec(normal_count, "mesh normals")?,
    })
}

//! Geometry buffer packing
//!
//! Packs indexed triangle geometry into the raw little-endian payloads the
//! runtime loader consumes: a mesh-data buffer per detail level and a
//! mesh-reference record pointing back into the library by name.

use cmp_core::Geometry;
use glam::Vec3;

/// Width of fixed name fields inside binary records
pub const NAME_FIELD_LEN: usize = 64;

/// Library entry name for one detail level of one part
pub fn buffer_name(model: &str, part: &str, level: usize, fvf: u32) -> String {
    format!("{model}-{part}.lod{level}.{fvf}.vms")
}

/// Encode a name into a fixed-width NUL-padded field
///
/// Names longer than the field are truncated at a character boundary; the
/// final byte is always NUL.
pub fn fixed_name_field(name: &str) -> [u8; NAME_FIELD_LEN] {
    let mut field = [0u8; NAME_FIELD_LEN];
    let mut len = name.len().min(NAME_FIELD_LEN - 1);
    while !name.is_char_boundary(len) {
        len -= 1;
    }
    field[..len].copy_from_slice(&name.as_bytes()[..len]);
    field
}

/// Pack a mesh-data buffer
///
/// Layout: header (group count, vertex count, index count, vertex-format
/// code, `u32` each), per-group records (64-byte material name, start index,
/// index count), the `u32` index array, then interleaved vertex floats in
/// the order the format code declares.
pub fn pack_mesh_data(geometry: &Geometry) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&(geometry.groups.len() as u32).to_le_bytes());
    buf.extend_from_slice(&(geometry.vertices.len() as u32).to_le_bytes());
    buf.extend_from_slice(&(geometry.indices.len() as u32).to_le_bytes());
    buf.extend_from_slice(&geometry.vertex_format().to_le_bytes());

    for group in &geometry.groups {
        buf.extend_from_slice(&fixed_name_field(&group.material.name));
        buf.extend_from_slice(&group.start_index.to_le_bytes());
        buf.extend_from_slice(&group.index_count.to_le_bytes());
    }

    buf.extend_from_slice(bytemuck::cast_slice(&geometry.indices));

    let mut floats: Vec<f32> = Vec::new();
    for vertex in &geometry.vertices {
        floats.extend_from_slice(&vertex.position.to_array());
        if geometry.has_normals {
            floats.extend_from_slice(&vertex.normal.to_array());
        }
        if geometry.has_texture_coords {
            floats.extend_from_slice(&vertex.texture.to_array());
        }
    }
    buf.extend_from_slice(bytemuck::cast_slice(&floats));
    buf
}

/// Pack a mesh-reference record naming a library buffer
///
/// Layout: 64-byte buffer name, vertex extent, index extent (start and
/// count, `u32` each), bounding box min/max, center and bounding-sphere
/// radius as floats.
pub fn pack_mesh_ref(geometry: &Geometry, buffer_name: &str) -> Vec<u8> {
    let (min, max) = geometry.bounds();
    let center = (min + max) * 0.5;
    let radius = bounding_radius(geometry, center);

    let mut buf = Vec::new();
    buf.extend_from_slice(&fixed_name_field(buffer_name));
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&(geometry.vertices.len() as u32).to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&(geometry.indices.len() as u32).to_le_bytes());
    let floats = [
        min.x, min.y, min.z, max.x, max.y, max.z, center.x, center.y, center.z, radius,
    ];
    buf.extend_from_slice(bytemuck::cast_slice(&floats));
    buf
}

fn bounding_radius(geometry: &Geometry, center: Vec3) -> f32 {
    geometry
        .vertices
        .iter()
        .map(|v| v.position.distance(center))
        .fold(0.0, f32::max)
}

//! Material and texture library emission
//!
//! Optional stage gated by the caller. Collects the distinct materials the
//! tree references and emits one descriptor per material plus one texture
//! per distinct diffuse-texture name. Missing imagery degrades to a
//! built-in placeholder, never an error.

use std::collections::{HashMap, HashSet};

use cmp_core::{ContainerNode, ImageData, Material, ModelNode};
use tracing::warn;

/// Fixed flags value stored with every emitted material
const MATERIAL_FLAGS: u32 = 64;

/// 4x4 RGBA8 checkerboard embedded when no source image is available
const PLACEHOLDER_TEXTURE: [u8; 64] = [
    0x80, 0x80, 0x80, 0xFF, 0x80, 0x80, 0x80, 0xFF, 0xC0, 0xC0, 0xC0, 0xFF, 0xC0, 0xC0, 0xC0,
    0xFF, 0x80, 0x80, 0x80, 0xFF, 0x80, 0x80, 0x80, 0xFF, 0xC0, 0xC0, 0xC0, 0xFF, 0xC0, 0xC0,
    0xC0, 0xFF, 0xC0, 0xC0, 0xC0, 0xFF, 0xC0, 0xC0, 0xC0, 0xFF, 0x80, 0x80, 0x80, 0xFF, 0x80,
    0x80, 0x80, 0xFF, 0xC0, 0xC0, 0xC0, 0xFF, 0xC0, 0xC0, 0xC0, 0xFF, 0x80, 0x80, 0x80, 0xFF,
    0x80, 0x80, 0x80, 0xFF,
];

/// Distinct materials referenced by the tree, first-seen pre-order,
/// de-duplicated by name
pub fn collect_materials<'s>(root: &ModelNode<'s>) -> Vec<&'s Material> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    iterate(root, &mut seen, &mut out);
    out
}

fn iterate<'s>(node: &ModelNode<'s>, seen: &mut HashSet<String>, out: &mut Vec<&'s Material>) {
    for lod in &node.lods {
        for group in &lod.groups {
            if seen.insert(group.material.name.clone()) {
                out.push(&group.material);
            }
        }
    }
    for child in &node.children {
        iterate(child, seen, out);
    }
}

/// `material library` block with one descriptor per material
pub fn material_library(materials: &[&Material]) -> ContainerNode {
    let children = materials.iter().map(|mat| material_node(mat)).collect();
    ContainerNode::branch("material library", children)
}

fn material_node(material: &Material) -> ContainerNode {
    let color = material.diffuse_color.to_array();
    let texture = material
        .diffuse_texture
        .as_deref()
        .unwrap_or(&material.name);
    ContainerNode::branch(
        material.name.clone(),
        vec![
            ContainerNode::leaf_str("Type", "DcDt"),
            ContainerNode::leaf("Dc", bytemuck::cast_slice(&color).to_vec()),
            ContainerNode::leaf_str("Dt_name", &format!("{texture}.dds")),
            ContainerNode::leaf("Dt_flags", MATERIAL_FLAGS.to_le_bytes().to_vec()),
        ],
    )
}

/// `texture library` block with one entry per distinct diffuse-texture name
///
/// Embeds decoded bytes from the image side table when available, the
/// placeholder otherwise.
pub fn texture_library(
    materials: &[&Material],
    images: &HashMap<String, ImageData>,
) -> ContainerNode {
    let mut created = HashSet::new();
    let mut children = Vec::new();
    for material in materials {
        let texture = material
            .diffuse_texture
            .as_deref()
            .unwrap_or(&material.name);
        if !created.insert(texture.to_string()) {
            continue;
        }
        let data = match images.get(texture) {
            Some(image) => image.data.clone(),
            None => {
                warn!(texture, "no image data, embedding placeholder texture");
                PLACEHOLDER_TEXTURE.to_vec()
            }
        };
        children.push(ContainerNode::branch(
            format!("{texture}.dds"),
            vec![ContainerNode::leaf("MIPS", data)],
        ));
    }
    ContainerNode::branch("texture library", children)
}

//! Material validation
//!
//! Pure predicate run before any export: every polygon group of every
//! detail level, recursively, must name a material.

use cmp_core::{Geometry, ModelNode};

/// True when every geometry group in the tree has a non-blank material name
pub fn verify_materials(node: &ModelNode<'_>) -> bool {
    node.lods.iter().all(|lod| geometry_materials_ok(lod))
        && node.children.iter().all(verify_materials)
}

fn geometry_materials_ok(geometry: &Geometry) -> bool {
    geometry
        .groups
        .iter()
        .all(|group| !group.material.name.trim().is_empty())
}

//! Construct resolution
//!
//! Derives exactly one mechanical-construct variant from a node's property
//! bag and local transform. Never fails: an absent or unrecognized
//! `construct` property yields a fixed construct.

use cmp_core::{Construct, ConstructKind, SceneNode};
use glam::Vec3;

/// Resolve the construct connecting `child_name` to `parent_name`
///
/// Property conventions and defaults:
/// - `rev`: `axis_rotation` (+Y), `min`/`max` in degrees (-90/90, swapped
///   when inverted, stored in radians), `offset` (zero)
/// - `pris`: `axis_translation` (+Y), `min`/`max` in linear units (0/1,
///   swapped when inverted), `offset` (zero)
/// - `sphere`: `min`/`max` vectors (-PI/PI per axis, stored verbatim),
///   `offset` (zero)
/// - `fix` or anything else: no parameters
pub fn construct(node: &SceneNode, child_name: &str, parent_name: &str) -> Construct {
    let rotation = node.rotation();
    let origin = node.origin();
    let props = &node.properties;

    let Some(contype) = props.string("construct") else {
        return Construct::fixed(rotation, origin, parent_name, child_name);
    };

    let kind = match contype.to_ascii_lowercase().as_str() {
        "rev" => {
            let axis = props.vec3_or("axis_rotation", Vec3::Y);
            let offset = props.vec3_or("offset", Vec3::ZERO);
            let mut min = props.float_or("min", -90.0);
            let mut max = props.float_or("max", 90.0);
            if min > max {
                std::mem::swap(&mut min, &mut max);
            }
            ConstructKind::Rev {
                axis,
                min: min.to_radians(),
                max: max.to_radians(),
                offset,
            }
        }
        "pris" => {
            let axis = props.vec3_or("axis_translation", Vec3::Y);
            let offset = props.vec3_or("offset", Vec3::ZERO);
            let mut min = props.float_or("min", 0.0);
            let mut max = props.float_or("max", 1.0);
            if min > max {
                std::mem::swap(&mut min, &mut max);
            }
            ConstructKind::Pris {
                axis,
                min,
                max,
                offset,
            }
        }
        "sphere" => {
            let offset = props.vec3_or("offset", Vec3::ZERO);
            let min = props.vec3_or("min", Vec3::splat(-std::f32::consts::PI));
            let max = props.vec3_or("max", Vec3::splat(std::f32::consts::PI));
            ConstructKind::Sphere { min, max, offset }
        }
        _ => ConstructKind::Fix,
    };

    Construct {
        rotation,
        origin,
        parent: parent_name.to_string(),
        child: child_name.to_string(),
        kind,
    }
}

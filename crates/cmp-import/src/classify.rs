//! LOD, hull and hardpoint classification
//!
//! Single pass over the raw input tree. Semantics are recovered purely from
//! naming conventions and node properties; everything downstream operates on
//! the typed results produced here.

use std::collections::HashMap;

use cmp_core::{Geometry, Hardpoint, HardpointKind, SceneNode};
use glam::Vec3;
use tracing::debug;

/// Number of detail-level slots per logical part
pub const LOD_SLOTS: usize = 10;

/// Classification of one node against the `$lod<digit>` naming convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LodSlot<'s> {
    /// Logical base name, suffix stripped
    pub base: &'s str,
    /// Detail level, 0 = highest
    pub level: usize,
}

/// Classify a node as an LOD candidate
///
/// Only nodes owning geometry qualify. A name ending `$lod<digit>` (suffix
/// exactly five characters, compared case-insensitively) selects that slot
/// under the stripped base name; any other name occupies slot 0 in full.
pub fn lod_slot(node: &SceneNode) -> Option<LodSlot<'_>> {
    node.geometry.as_ref()?;
    let name = node.name.as_str();
    let bytes = name.as_bytes();
    if bytes.len() >= 6 {
        let tail = &bytes[bytes.len() - 5..];
        if tail[..4].eq_ignore_ascii_case(b"$lod") && tail[4].is_ascii_digit() {
            return Some(LodSlot {
                base: &name[..name.len() - 5],
                level: (tail[4] - b'0') as usize,
            });
        }
    }
    Some(LodSlot {
        base: name,
        level: 0,
    })
}

/// Strip a trailing `$lod0` (case-insensitive) from a display name
pub fn strip_lod0(name: &str) -> &str {
    let bytes = name.as_bytes();
    if bytes.len() >= 5 && bytes[bytes.len() - 5..].eq_ignore_ascii_case(b"$lod0") {
        &name[..name.len() - 5]
    } else {
        name
    }
}

/// True for nodes marking a collision hull
pub fn is_hull(node: &SceneNode) -> bool {
    node.properties.flag("hull") || node.name.ends_with("$hull")
}

/// Resolve a node as a hardpoint definition, if it is one
///
/// Requires a truthy `hardpoint` property. An `hptype` of `rev`
/// (case-insensitive) yields a revolute hardpoint with `axis`/`min`/`max`
/// pulled from the properties (defaults +Y, -45 and 45 degrees, swapped when
/// inverted); any other value yields a fixed hardpoint.
pub fn hardpoint(node: &SceneNode) -> Option<Hardpoint> {
    if !node.properties.flag("hardpoint") {
        return None;
    }
    let kind = match node.properties.string("hptype") {
        Some(hptype) if hptype.eq_ignore_ascii_case("rev") => {
            let axis = node.properties.vec3_or("axis", Vec3::Y);
            let mut min = node.properties.float_or("min", -45.0);
            let mut max = node.properties.float_or("max", 45.0);
            if min > max {
                std::mem::swap(&mut min, &mut max);
            }
            HardpointKind::Revolute { axis, min, max }
        }
        _ => HardpointKind::Fixed,
    };
    Some(Hardpoint {
        name: node.name.clone(),
        orientation: node.rotation(),
        position: node.origin(),
        kind,
    })
}

/// Per-part detail levels gathered from the whole raw tree
///
/// Keys are logical base names, compared case-insensitively. Built before
/// tree construction so autodetection resolves a part's full LOD set in
/// one lookup.
#[derive(Debug, Default)]
pub struct LodTable<'s> {
    entries: HashMap<String, [Option<&'s SceneNode>; LOD_SLOTS]>,
}

impl<'s> LodTable<'s> {
    /// Scan the raw tree in pre-order and gather every LOD candidate
    pub fn build(roots: &'s [SceneNode]) -> Self {
        let mut table = Self::default();
        for root in roots {
            table.scan(root);
        }
        debug!(parts = table.entries.len(), "built LOD table");
        table
    }

    fn scan(&mut self, node: &'s SceneNode) {
        // Hulls are auxiliary geometry, never detail levels
        if let Some(slot) = lod_slot(node)
            && !is_hull(node)
        {
            let levels = self
                .entries
                .entry(slot.base.to_ascii_lowercase())
                .or_default();
            // level is a single digit, always within the slot array
            levels[slot.level] = Some(node);
        }
        for child in &node.children {
            self.scan(child);
        }
    }

    /// Detail-level geometry for a logical part, ascending, gaps skipped
    pub fn levels(&self, name: &str) -> Vec<&'s Geometry> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|levels| {
                levels
                    .iter()
                    .flatten()
                    .filter_map(|node| node.geometry.as_ref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

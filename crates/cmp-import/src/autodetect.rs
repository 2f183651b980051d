//! Canonical compound-model tree construction
//!
//! Recursive walk over the raw scene graph using the classification table.
//! Lower-detail LOD duplicates and hulls never become parts of their own;
//! they are captured by the part that owns them.

use cmp_core::{ModelNode, SceneNode};

use crate::classify::{self, LodTable};
use crate::resolve;

/// Turn one raw node into a canonical part and append it to `siblings`
///
/// Skips nodes classified into a non-zero LOD slot (captured through the
/// table by their logical part) and hull nodes (captured by their parent).
/// Direct children partition into hulls, hardpoints and nested parts.
pub fn autodetect_tree<'s>(
    node: &'s SceneNode,
    siblings: &mut Vec<ModelNode<'s>>,
    parent_name: Option<&str>,
    table: &LodTable<'s>,
) {
    if let Some(slot) = classify::lod_slot(node)
        && slot.level != 0
    {
        return;
    }
    if classify::is_hull(node) {
        return;
    }

    let name = classify::strip_lod0(&node.name);
    let mut part = ModelNode::new(name);
    part.construct = Some(resolve::construct(
        node,
        name,
        parent_name.unwrap_or(""),
    ));
    part.lods = table.levels(name);

    for child in &node.children {
        if classify::is_hull(child) {
            part.hulls.push(child);
        } else if let Some(hp) = classify::hardpoint(child) {
            part.hardpoints.push(hp);
        } else {
            autodetect_tree(child, &mut part.children, Some(name), table);
        }
    }

    siblings.push(part);
}

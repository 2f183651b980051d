//! Canonical compound-model tree
//!
//! Built once per import from the raw scene graph, validated, exported and
//! then discarded. Nodes borrow geometry and hull nodes from the raw tree;
//! nothing here owns scene data.

use crate::{Construct, Geometry, Hardpoint, SceneNode};

/// One named rigid part of the compound model
#[derive(Debug, Clone)]
pub struct ModelNode<'s> {
    /// Logical part name with LOD/root suffixes stripped
    pub name: String,
    /// Connection to the parent part; None only for the tree root
    pub construct: Option<Construct>,
    /// Geometry per detail level, index 0 = highest detail
    pub lods: Vec<&'s Geometry>,
    /// Collision hull nodes captured from direct children, passed through
    pub hulls: Vec<&'s SceneNode>,
    /// Attachment points local to this part
    pub hardpoints: Vec<Hardpoint>,
    pub children: Vec<ModelNode<'s>>,
}

impl<'s> ModelNode<'s> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            construct: None,
            lods: Vec::new(),
            hulls: Vec::new(),
            hardpoints: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Number of parts in this subtree, this node included
    pub fn part_count(&self) -> usize {
        1 + self.children.iter().map(ModelNode::part_count).sum::<usize>()
    }
}

//! Hardpoint definitions
//!
//! Hardpoints are named attachment points on a part, consumed by external
//! systems to mount other objects. They are detected from node properties
//! and carried through to the exported part.

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// A named attachment point local to one part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hardpoint {
    pub name: String,
    /// Rotation component of the defining node's local transform
    pub orientation: Mat3,
    /// Local transform applied to the origin point
    pub position: Vec3,
    pub kind: HardpointKind,
}

/// Hardpoint type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HardpointKind {
    Fixed,
    /// Rotation about an axis; limits are in degrees at this boundary and
    /// converted to radians when the document is written
    Revolute { axis: Vec3, min: f32, max: f32 },
}

impl Hardpoint {
    /// True for revolute hardpoints
    pub fn is_revolute(&self) -> bool {
        matches!(self.kind, HardpointKind::Revolute { .. })
    }
}

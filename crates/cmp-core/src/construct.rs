//! Mechanical construct definitions
//!
//! A construct describes how a child part is positioned and articulated
//! relative to its parent. Parent/child names are used only for addressing
//! in the exported document, never for runtime lookup.

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// A mechanical joint connecting a part to its parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Construct {
    /// Rotation component of the part's local transform
    pub rotation: Mat3,
    /// Local transform applied to the origin point
    pub origin: Vec3,
    /// Name of the parent part (addressing only)
    pub parent: String,
    /// Name of this part (addressing only)
    pub child: String,
    pub kind: ConstructKind,
}

impl Construct {
    /// Fixed construct with no articulation parameters
    pub fn fixed(
        rotation: Mat3,
        origin: Vec3,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self {
            rotation,
            origin,
            parent: parent.into(),
            child: child.into(),
            kind: ConstructKind::Fix,
        }
    }
}

/// Construct type with per-type articulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstructKind {
    /// Rigid attachment
    Fix,
    /// Rotation about an axis, limits in radians
    Rev {
        axis: Vec3,
        min: f32,
        max: f32,
        offset: Vec3,
    },
    /// Translation along an axis, limits in linear units
    Pris {
        axis: Vec3,
        min: f32,
        max: f32,
        offset: Vec3,
    },
    /// Three independent rotation ranges in radians, stored verbatim
    Sphere {
        min: Vec3,
        max: Vec3,
        offset: Vec3,
    },
}

impl ConstructKind {
    /// Name of the construct table this entry belongs to
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstructKind::Fix => "Fix",
            ConstructKind::Rev { .. } => "Rev",
            ConstructKind::Pris { .. } => "Pris",
            ConstructKind::Sphere { .. } => "Sphere",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert_eq!(ConstructKind::Fix.table_name(), "Fix");
        let rev = ConstructKind::Rev {
            axis: Vec3::Y,
            min: -1.0,
            max: 1.0,
            offset: Vec3::ZERO,
        };
        assert_eq!(rev.table_name(), "Rev");
    }
}

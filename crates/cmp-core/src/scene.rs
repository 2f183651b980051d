//! Normalized input scene graph
//!
//! The importer collaborator hands the pipeline a tree of [`SceneNode`]s plus
//! a side table of decoded images. Nothing in this crate mutates them; the
//! canonical model tree borrows geometry and hull nodes from here.

use std::collections::HashMap;

use glam::{Mat3, Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Vertex-format bit: position is always present
pub const FVF_POSITION: u32 = 0x002;
/// Vertex-format bit: per-vertex normal
pub const FVF_NORMAL: u32 = 0x010;
/// Vertex-format bit: one texture coordinate channel
pub const FVF_TEX1: u32 = 0x100;

/// A normalized scene handed in for import
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Top-level nodes in source order
    pub roots: Vec<SceneNode>,
    /// Decoded source images keyed by texture name
    pub images: HashMap<String, ImageData>,
}

/// Decoded image bytes from the source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    pub data: Vec<u8>,
}

/// One node of the input scene graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    /// Local transform relative to the parent node
    pub transform: Mat4,
    pub properties: crate::PropertyBag,
    pub geometry: Option<Geometry>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::IDENTITY,
            properties: crate::PropertyBag::new(),
            geometry: None,
            children: Vec::new(),
        }
    }

    /// Rotation component of the local transform
    pub fn rotation(&self) -> Mat3 {
        let (_, rotation, _) = self.transform.to_scale_rotation_translation();
        Mat3::from_quat(rotation)
    }

    /// Local transform applied to the origin point
    pub fn origin(&self) -> Vec3 {
        self.transform.transform_point3(Vec3::ZERO)
    }
}

/// Indexed triangle geometry owned by a scene node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Ordered polygon groups, each drawing a contiguous index range
    pub groups: Vec<PolygonGroup>,
    /// Whether [`Vertex::normal`] carries meaningful data
    pub has_normals: bool,
    /// Whether [`Vertex::texture`] carries meaningful data
    pub has_texture_coords: bool,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertex-format code describing which attributes are populated
    pub fn vertex_format(&self) -> u32 {
        let mut fvf = FVF_POSITION;
        if self.has_normals {
            fvf |= FVF_NORMAL;
        }
        if self.has_texture_coords {
            fvf |= FVF_TEX1;
        }
        fvf
    }

    /// Axis-aligned bounding box over vertex positions
    pub fn bounds(&self) -> (Vec3, Vec3) {
        if self.vertices.is_empty() {
            return (Vec3::ZERO, Vec3::ZERO);
        }
        let mut min = Vec3::MAX;
        let mut max = Vec3::MIN;
        for v in &self.vertices {
            min = min.min(v.position);
            max = max.max(v.position);
        }
        (min, max)
    }
}

/// One vertex; unpopulated attributes are zeroed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub texture: Vec2,
}

/// A contiguous index range drawn with one material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonGroup {
    pub material: Material,
    pub start_index: u32,
    pub index_count: u32,
}

/// Surface material referenced by polygon groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub diffuse_color: Vec3,
    /// Texture name resolving into the scene's image side table
    pub diffuse_texture: Option<String>,
}

impl Material {
    pub fn new(name: impl Into<String>, diffuse_color: Vec3) -> Self {
        Self {
            name: name.into(),
            diffuse_color,
            diffuse_texture: None,
        }
    }
}

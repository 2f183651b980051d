//! Model import and compound export pipeline
//!
//! Converts a generically-annotated scene graph into a compound model (named
//! rigid parts connected by typed mechanical constructs, each with optional
//! LOD chain, collision hulls and hardpoints) and serializes it into a
//! hierarchical binary node-container document.
//!
//! Stages run strictly forward:
//! 1. [`classify`]: LOD/hull/hardpoint detection over the raw tree
//! 2. [`resolve`]: construct resolution from node properties
//! 3. [`autodetect`]: canonical compound-model tree construction
//! 4. [`validate`]: material verification
//! 5. [`export`]: node-container document emission
//! 6. [`materials`]: optional material/texture library emission

pub mod autodetect;
pub mod classify;
pub mod export;
pub mod geometry;
pub mod materials;
pub mod resolve;
pub mod validate;

use std::collections::HashMap;

use cmp_core::{ContainerNode, ImageData, ModelNode, Scene};
use tracing::info;

pub use export::ExportError;

/// Errors detecting the compound-model structure of a scene
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImportError {
    #[error("Could not find root model")]
    NoRootModel,

    #[error("More than one root model ({0} found)")]
    MultipleRootModels(usize),
}

/// Options for document generation
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Emit material and texture library blocks
    pub generate_materials: bool,
    /// Per-run part-file suffix; generated from a UUID when absent.
    /// Inject a fixed value for reproducible output.
    pub filename_suffix: Option<String>,
}

/// A compound model detected from an input scene, ready for export
#[derive(Debug, Clone)]
pub struct ImportedModel<'s> {
    pub name: String,
    pub root: ModelNode<'s>,
    /// Decoded source images keyed by texture name, read-only
    pub images: &'s HashMap<String, ImageData>,
}

impl<'s> ImportedModel<'s> {
    /// Detect the compound-model tree of a scene
    ///
    /// Fails when the scene does not resolve to exactly one root part.
    pub fn from_scene(name: impl Into<String>, scene: &'s Scene) -> Result<Self, ImportError> {
        let table = classify::LodTable::build(&scene.roots);
        let mut roots = Vec::new();
        for node in &scene.roots {
            autodetect::autodetect_tree(node, &mut roots, None, &table);
        }
        if roots.len() > 1 {
            return Err(ImportError::MultipleRootModels(roots.len()));
        }
        let mut root = roots.pop().ok_or(ImportError::NoRootModel)?;
        // The root is positioned by the consumer, never by a construct
        root.construct = None;

        let model = Self {
            name: name.into(),
            root,
            images: &scene.images,
        };
        info!(
            name = %model.name,
            parts = model.root.part_count(),
            "detected compound model"
        );
        Ok(model)
    }

    /// Export the model as a node-container document
    pub fn export(&self, options: &ExportOptions) -> Result<ContainerNode, ExportError> {
        export::export_model(self, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmp_core::{Geometry, Material, PolygonGroup, SceneNode, Vertex};
    use glam::Vec3;

    fn meshed_node(name: &str) -> SceneNode {
        let mut node = SceneNode::new(name);
        let mut geom = Geometry::new();
        geom.vertices = vec![Vertex::default(); 3];
        geom.indices = vec![0, 1, 2];
        geom.groups = vec![PolygonGroup {
            material: Material::new("hull_plate", Vec3::ONE),
            start_index: 0,
            index_count: 3,
        }];
        node.geometry = Some(geom);
        node
    }

    #[test]
    fn test_single_root_detected() {
        let mut scene = Scene::default();
        scene.roots.push(meshed_node("Ship"));

        let model = ImportedModel::from_scene("ship", &scene).unwrap();
        assert_eq!(model.root.name, "Ship");
        assert!(model.root.construct.is_none());
    }

    #[test]
    fn test_multiple_roots_rejected() {
        let mut scene = Scene::default();
        scene.roots.push(meshed_node("A"));
        scene.roots.push(meshed_node("B"));

        let err = ImportedModel::from_scene("ship", &scene).unwrap_err();
        assert!(matches!(err, ImportError::MultipleRootModels(2)));
    }

    #[test]
    fn test_empty_scene_rejected() {
        let scene = Scene::default();
        let err = ImportedModel::from_scene("ship", &scene).unwrap_err();
        assert!(matches!(err, ImportError::NoRootModel));
    }

    #[test]
    fn test_root_construct_cleared() {
        let mut scene = Scene::default();
        let mut root = meshed_node("Ship");
        root.properties.set("construct", "rev");
        scene.roots.push(root);

        let model = ImportedModel::from_scene("ship", &scene).unwrap();
        assert!(model.root.construct.is_none());
    }
}

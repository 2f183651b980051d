//! Compound Model Core Data Structures
//!
//! This crate contains the core data structures for the model import
//! and compound export pipeline:
//! - SceneNode/Scene: the normalized scene graph handed in by the importer
//! - PropertyBag: typed property lookup with documented defaults
//! - Construct: mechanical joints connecting parts (fix/rev/pris/sphere)
//! - Hardpoint: attachment points on parts
//! - ModelNode: the canonical compound-model tree
//! - ContainerNode: the hierarchical binary node-container document

pub mod construct;
pub mod container;
pub mod hardpoint;
pub mod model;
pub mod props;
pub mod scene;
pub mod writer;

pub use construct::*;
pub use container::*;
pub use hardpoint::*;
pub use model::*;
pub use props::*;
pub use scene::*;
pub use writer::*;

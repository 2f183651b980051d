//! Node-container document emission
//!
//! Walks the validated canonical tree and emits the complete document:
//! single-part form for a leaf-only model, or compound form with per-part
//! reference entries, per-type construct tables and a shared geometry
//! library. Nothing is emitted on failure.

use cmp_core::{
    Construct, ConstructKind, ContainerNode, Hardpoint, HardpointKind, ModelNode,
};
use glam::{Mat3, Vec3};
use tracing::info;
use uuid::Uuid;

use crate::geometry::{buffer_name, fixed_name_field, pack_mesh_data, pack_mesh_ref};
use crate::{ExportOptions, ImportedModel, materials, validate};

/// Switch distance for detail level 1; doubles for each further level
const SWITCH_BASE_DISTANCE: f32 = 2250.0;
/// Sentinel pinning the final detail level to maximum range
const SWITCH_MAX_DISTANCE: f32 = 1_000_000.0;

/// Errors aborting document generation
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("Model name cannot be empty")]
    EmptyModelName,

    #[error("Model root must have a mesh")]
    RootWithoutGeometry,

    #[error("Material name cannot be empty")]
    BlankMaterialName,
}

/// Emit the node-container document for a detected model
pub fn export_model(
    model: &ImportedModel<'_>,
    options: &ExportOptions,
) -> Result<ContainerNode, ExportError> {
    if model.name.trim().is_empty() {
        return Err(ExportError::EmptyModelName);
    }
    if model.root.lods.is_empty() {
        return Err(ExportError::RootWithoutGeometry);
    }
    if !validate::verify_materials(&model.root) {
        return Err(ExportError::BlankMaterialName);
    }

    let mut children = vec![ContainerNode::leaf_str(
        "Exporter Version",
        concat!("cmp-import ", env!("CARGO_PKG_VERSION")),
    )];

    let compound = !model.root.children.is_empty();
    if compound {
        children.extend(export_compound(model, options));
    } else {
        let mut library = Vec::new();
        let entries = part_entries(&model.name, &model.root, &mut library);
        children.push(ContainerNode::branch("VMeshLibrary", library));
        children.extend(entries);
    }

    if options.generate_materials {
        let mats = materials::collect_materials(&model.root);
        children.push(materials::material_library(&mats));
        children.push(materials::texture_library(&mats, model.images));
    }

    info!(
        name = %model.name,
        parts = model.root.part_count(),
        compound,
        "exported model document"
    );
    Ok(ContainerNode::branch(model.name.clone(), children))
}

/// Compound form: shared geometry library, per-part reference entries with
/// the construct tables, then one part subtree per canonical node
fn export_compound(model: &ImportedModel<'_>, options: &ExportOptions) -> Vec<ContainerNode> {
    let suffix = options
        .filename_suffix
        .clone()
        .unwrap_or_else(generate_suffix);

    let mut library = Vec::new();
    let mut part_nodes = Vec::new();
    export_parts(&model.name, &suffix, &model.root, &mut library, &mut part_nodes);

    let mut cmpnd = vec![part_reference(
        "Root",
        &format!("{}{}", model.root.name, suffix),
        "Root",
        0,
    )];
    let mut cons = ConsTables::default();
    let mut index = 1u32;
    for child in &model.root.children {
        process_construct(child, &mut cmpnd, &mut cons, &suffix, &mut index);
    }
    cmpnd.push(cons.into_node());

    let mut out = vec![
        ContainerNode::branch("VMeshLibrary", library),
        ContainerNode::branch("Cmpnd", cmpnd),
    ];
    out.extend(part_nodes);
    out
}

/// Per-run part-file suffix when the caller injects none
fn generate_suffix() -> String {
    format!("{}.3db", Uuid::new_v4().as_u128() as u32)
}

/// Emit part subtrees in pre-order, filling the shared geometry library
fn export_parts(
    model_name: &str,
    suffix: &str,
    part: &ModelNode<'_>,
    library: &mut Vec<ContainerNode>,
    out: &mut Vec<ContainerNode>,
) {
    let entries = part_entries(model_name, part, library);
    out.push(ContainerNode::branch(
        format!("{}{}", part.name, suffix),
        entries,
    ));
    for child in &part.children {
        export_parts(model_name, suffix, child, library, out);
    }
}

/// Emit one part's entries: geometry buffers into the library, then the
/// detail-switch block (or a single unconditional reference) and hardpoints
fn part_entries(
    model_name: &str,
    part: &ModelNode<'_>,
    library: &mut Vec<ContainerNode>,
) -> Vec<ContainerNode> {
    let names: Vec<String> = part
        .lods
        .iter()
        .enumerate()
        .map(|(i, lod)| buffer_name(model_name, &part.name, i, lod.vertex_format()))
        .collect();
    for (name, lod) in names.iter().zip(&part.lods) {
        library.push(ContainerNode::branch(
            name.clone(),
            vec![ContainerNode::leaf("VMeshData", pack_mesh_data(lod))],
        ));
    }

    let mut entries = Vec::new();
    if part.lods.len() > 1 {
        let distances = switch_distances(part.lods.len());
        let mut ml_children = vec![ContainerNode::leaf(
            "Switch2",
            cast_floats(&distances),
        )];
        for (i, (name, lod)) in names.iter().zip(&part.lods).enumerate() {
            ml_children.push(ContainerNode::branch(
                format!("Level{i}"),
                vec![mesh_part(lod, name)],
            ));
        }
        entries.push(ContainerNode::branch("MultiLevel", ml_children));
    } else if let Some((name, lod)) = names.first().zip(part.lods.first()) {
        entries.push(mesh_part(lod, name));
    }

    if let Some(hardpoints) = hardpoints_node(&part.hardpoints) {
        entries.push(hardpoints);
    }
    entries
}

fn mesh_part(lod: &cmp_core::Geometry, buffer: &str) -> ContainerNode {
    ContainerNode::branch(
        "VMeshPart",
        vec![ContainerNode::leaf("VMeshRef", pack_mesh_ref(lod, buffer))],
    )
}

/// Ascending switch distances, one more entry than there are levels
///
/// Level 0 switches at 0; each further level doubles from the baseline; the
/// final entry is pinned to the maximum-range sentinel. The doubling policy
/// is a behavioral contract consumed by existing model data.
fn switch_distances(levels: usize) -> Vec<f32> {
    let mut distances = vec![0.0; levels + 1];
    let mut cutoff = SWITCH_BASE_DISTANCE;
    for d in distances.iter_mut().take(levels).skip(1) {
        *d = cutoff;
        cutoff *= 2.0;
    }
    distances[levels] = SWITCH_MAX_DISTANCE;
    distances
}

/// Hardpoints block: `Fixed` and `Revolute` sub-blocks, one named child per
/// hardpoint. Angles convert from degrees to radians here.
fn hardpoints_node(hardpoints: &[Hardpoint]) -> Option<ContainerNode> {
    if hardpoints.is_empty() {
        return None;
    }
    let mut fixed = Vec::new();
    let mut revolute = Vec::new();
    for hp in hardpoints {
        let mut entries = vec![
            ContainerNode::leaf("Orientation", mat3_bytes(&hp.orientation)),
            ContainerNode::leaf("Position", cast_floats(&hp.position.to_array())),
        ];
        match &hp.kind {
            HardpointKind::Fixed => fixed.push(ContainerNode::branch(hp.name.clone(), entries)),
            HardpointKind::Revolute { axis, min, max } => {
                entries.push(ContainerNode::leaf("Axis", cast_floats(&axis.to_array())));
                entries.push(ContainerNode::leaf("Min", min.to_radians().to_le_bytes().to_vec()));
                entries.push(ContainerNode::leaf("Max", max.to_radians().to_le_bytes().to_vec()));
                revolute.push(ContainerNode::branch(hp.name.clone(), entries));
            }
        }
    }
    let mut children = Vec::new();
    if !fixed.is_empty() {
        children.push(ContainerNode::branch("Fixed", fixed));
    }
    if !revolute.is_empty() {
        children.push(ContainerNode::branch("Revolute", revolute));
    }
    Some(ContainerNode::branch("Hardpoints", children))
}

/// `File Name` / `Object Name` / `Index` triple addressing one part
fn part_reference(name: &str, filename: &str, object_name: &str, index: u32) -> ContainerNode {
    ContainerNode::branch(
        name,
        vec![
            ContainerNode::leaf_str("File Name", filename),
            ContainerNode::leaf_str("Object Name", object_name),
            ContainerNode::leaf("Index", index.to_le_bytes().to_vec()),
        ],
    )
}

/// Append one reference entry and one construct-table entry per part,
/// pre-order, threading the running part index through the walk
fn process_construct(
    part: &ModelNode<'_>,
    cmpnd: &mut Vec<ContainerNode>,
    cons: &mut ConsTables,
    suffix: &str,
    index: &mut u32,
) {
    cmpnd.push(part_reference(
        &format!("PART_{}", part.name),
        &format!("{}{}", part.name, suffix),
        &part.name,
        *index,
    ));
    *index += 1;
    if let Some(construct) = &part.construct {
        cons.add(construct);
    }
    for child in &part.children {
        process_construct(child, cmpnd, cons, suffix, index);
    }
}

/// Construct tables partitioned by type, filled in traversal order
#[derive(Debug, Default)]
struct ConsTables {
    fix: Vec<u8>,
    rev: Vec<u8>,
    pris: Vec<u8>,
    sphere: Vec<u8>,
}

impl ConsTables {
    fn add(&mut self, construct: &Construct) {
        let mut entry = Vec::new();
        entry.extend_from_slice(&fixed_name_field(&construct.parent));
        entry.extend_from_slice(&fixed_name_field(&construct.child));
        push_vec3(&mut entry, construct.origin);
        match &construct.kind {
            ConstructKind::Fix => {
                push_mat3(&mut entry, &construct.rotation);
                self.fix.extend_from_slice(&entry);
            }
            ConstructKind::Rev { axis, min, max, offset } => {
                push_vec3(&mut entry, *offset);
                push_mat3(&mut entry, &construct.rotation);
                push_vec3(&mut entry, *axis);
                entry.extend_from_slice(&min.to_le_bytes());
                entry.extend_from_slice(&max.to_le_bytes());
                self.rev.extend_from_slice(&entry);
            }
            ConstructKind::Pris { axis, min, max, offset } => {
                push_vec3(&mut entry, *offset);
                push_mat3(&mut entry, &construct.rotation);
                push_vec3(&mut entry, *axis);
                entry.extend_from_slice(&min.to_le_bytes());
                entry.extend_from_slice(&max.to_le_bytes());
                self.pris.extend_from_slice(&entry);
            }
            ConstructKind::Sphere { min, max, offset } => {
                push_vec3(&mut entry, *offset);
                push_mat3(&mut entry, &construct.rotation);
                let pairs = [min.x, max.x, min.y, max.y, min.z, max.z];
                entry.extend_from_slice(&cast_floats(&pairs));
                self.sphere.extend_from_slice(&entry);
            }
        }
    }

    /// `Cons` block with non-empty sub-tables in fixed order
    fn into_node(self) -> ContainerNode {
        let mut children = Vec::new();
        if !self.fix.is_empty() {
            children.push(ContainerNode::leaf("Fix", self.fix));
        }
        if !self.rev.is_empty() {
            children.push(ContainerNode::leaf("Rev", self.rev));
        }
        if !self.pris.is_empty() {
            children.push(ContainerNode::leaf("Pris", self.pris));
        }
        if !self.sphere.is_empty() {
            children.push(ContainerNode::leaf("Sphere", self.sphere));
        }
        ContainerNode::branch("Cons", children)
    }
}

fn cast_floats(floats: &[f32]) -> Vec<u8> {
    bytemuck::cast_slice(floats).to_vec()
}

fn push_vec3(buf: &mut Vec<u8>, v: Vec3) {
    buf.extend_from_slice(&cast_floats(&v.to_array()));
}

/// Rotation written as a 3x3 row-major float block
fn push_mat3(buf: &mut Vec<u8>, m: &Mat3) {
    for r in 0..3 {
        push_vec3(buf, m.row(r));
    }
}

fn mat3_bytes(m: &Mat3) -> Vec<u8> {
    let mut buf = Vec::new();
    push_mat3(&mut buf, m);
    buf
}

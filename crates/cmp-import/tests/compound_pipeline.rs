//! End-to-end pipeline tests: scene graph in, node-container document out.

use cmp_core::{
    ContainerNode, Geometry, ImageData, Material, PolygonGroup, Scene, SceneNode, Vertex,
    write_container,
};
use cmp_import::{ExportOptions, ImportedModel};
use glam::{Mat4, Vec3};

fn meshed(name: &str, material: &str) -> SceneNode {
    let mut node = SceneNode::new(name);
    let mut geom = Geometry::new();
    geom.vertices = vec![
        Vertex { position: Vec3::new(0.0, 0.0, 0.0), ..Default::default() },
        Vertex { position: Vec3::new(1.0, 0.0, 0.0), ..Default::default() },
        Vertex { position: Vec3::new(0.0, 1.0, 0.0), ..Default::default() },
    ];
    geom.indices = vec![0, 1, 2];
    geom.groups = vec![PolygonGroup {
        material: Material::new(material, Vec3::new(0.8, 0.8, 0.8)),
        start_index: 0,
        index_count: 3,
    }];
    node.geometry = Some(geom);
    node
}

/// A ship with a two-LOD wing on a revolute construct, a hull, a hardpoint
/// and a textured material.
fn ship_scene() -> Scene {
    let mut scene = Scene::default();

    let mut root = meshed("Ship", "plate");

    let mut wing = meshed("Wing$lod0", "wing_skin");
    wing.geometry.as_mut().unwrap().groups[0].material.diffuse_texture =
        Some("wing_diff".to_string());
    wing.transform = Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0));
    wing.properties.set("construct", "rev");
    wing.properties.set("min", -30.0f32);
    wing.properties.set("max", 30.0f32);

    let mut hull = meshed("Ship$hull", "plate");
    hull.properties.set("hull", true);

    let mut hardpoint = SceneNode::new("hp_gun01");
    hardpoint.properties.set("hardpoint", true);

    root.children.push(wing);
    root.children.push(meshed("Wing$lod1", "wing_skin"));
    root.children.push(hull);
    root.children.push(hardpoint);
    scene.roots.push(root);

    scene.images.insert(
        "wing_diff".to_string(),
        ImageData { data: vec![0xDE, 0xAD, 0xBE, 0xEF] },
    );
    scene
}

fn injected_options() -> ExportOptions {
    ExportOptions {
        generate_materials: true,
        filename_suffix: Some("7.3db".to_string()),
    }
}

#[test]
fn detects_parts_hulls_and_hardpoints() {
    let scene = ship_scene();
    let model = ImportedModel::from_scene("ship", &scene).unwrap();

    let root = &model.root;
    assert_eq!(root.name, "Ship");
    assert!(root.construct.is_none());
    assert_eq!(root.hulls.len(), 1);
    assert_eq!(root.hardpoints.len(), 1);

    // LOD variants collapse into one Wing part with two levels
    assert_eq!(root.children.len(), 1);
    let wing = &root.children[0];
    assert_eq!(wing.name, "Wing");
    assert_eq!(wing.lods.len(), 2);
}

#[test]
fn document_lod_order_matches_detail_levels() {
    let scene = ship_scene();
    let model = ImportedModel::from_scene("ship", &scene).unwrap();
    let doc = model.export(&injected_options()).unwrap();

    let wing_part = doc.child("Wing7.3db").unwrap();
    let multilevel = wing_part.child("MultiLevel").unwrap();

    // Re-derive the LOD order from the document: Level entries ascending,
    // each referencing the matching library buffer by name
    let levels: Vec<&ContainerNode> = multilevel
        .children()
        .iter()
        .filter(|c| c.name.starts_with("Level"))
        .collect();
    assert_eq!(levels.len(), 2);
    for (i, level) in levels.iter().enumerate() {
        assert_eq!(level.name, format!("Level{i}"));
    }

    let library = doc.child("VMeshLibrary").unwrap();
    for i in 0..2 {
        let name = format!("ship-Wing.lod{i}.2.vms");
        assert!(library.child(&name).is_some(), "missing {name}");
    }

    // Switch distances ascend and end at the sentinel
    let switch: Vec<f32> = multilevel
        .child("Switch2")
        .unwrap()
        .data()
        .unwrap()
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes(c.try_into().unwrap()))
        .collect();
    assert_eq!(switch.first(), Some(&0.0));
    assert_eq!(switch.last(), Some(&1_000_000.0));
    for pair in switch.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn compound_block_addresses_every_part_once() {
    let scene = ship_scene();
    let model = ImportedModel::from_scene("ship", &scene).unwrap();
    let doc = model.export(&injected_options()).unwrap();

    let cmpnd = doc.child("Cmpnd").unwrap();
    assert_eq!(
        cmpnd.child("Root").unwrap().child("File Name").unwrap().string_data(),
        Some("Ship7.3db")
    );
    assert!(cmpnd.child("PART_Wing").is_some());

    // One construct from one non-root part, in the Rev table alone
    let cons = cmpnd.child("Cons").unwrap();
    assert_eq!(cons.children().len(), 1);
    assert_eq!(cons.children()[0].name, "Rev");
}

#[test]
fn material_and_texture_libraries_generated() {
    let scene = ship_scene();
    let model = ImportedModel::from_scene("ship", &scene).unwrap();
    let doc = model.export(&injected_options()).unwrap();

    let materials = doc.child("material library").unwrap();
    assert!(materials.child("plate").is_some());
    let skin = materials.child("wing_skin").unwrap();
    assert_eq!(
        skin.child("Dt_name").unwrap().string_data(),
        Some("wing_diff.dds")
    );

    let textures = doc.child("texture library").unwrap();
    // Decoded bytes embedded for the referenced texture
    assert_eq!(
        textures.child("wing_diff.dds").unwrap().child("MIPS").unwrap().data(),
        Some(&[0xDE, 0xAD, 0xBE, 0xEF][..])
    );
    // Untextured material falls back to a placeholder under its own name
    let placeholder = textures.child("plate.dds").unwrap().child("MIPS").unwrap();
    assert!(!placeholder.data().unwrap().is_empty());
}

#[test]
fn repeated_export_is_byte_identical() {
    let scene = ship_scene();
    let model = ImportedModel::from_scene("ship", &scene).unwrap();
    let options = injected_options();

    let a = write_container(&model.export(&options).unwrap()).unwrap();
    let b = write_container(&model.export(&options).unwrap()).unwrap();
    assert_eq!(a, b);
}

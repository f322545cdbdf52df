// Transform graph integration tests
//
// Global transform composition across nested hierarchies, re-parenting and
// scene description loading from disk.

use glam::{Mat4, Quat, Vec3};
use quiver_engine::{
    EngineError, NodeCategory, NodeOptions, SceneDescription, SceneGraph,
};
use std::io::Write;

fn trs(translation: Vec3, rotation: Quat, scale: Vec3) -> NodeOptions {
    NodeOptions {
        translation: Some(translation),
        rotation: Some(rotation),
        scale: Some(scale),
        ..NodeOptions::default()
    }
}

#[test]
fn test_three_level_composition_matches_matrix_product() {
    let mut scene = SceneGraph::new();

    let root = scene
        .add_node(&trs(Vec3::new(1.0, 0.0, 0.0), Quat::from_rotation_y(0.5), Vec3::splat(2.0)))
        .unwrap();
    let middle = scene
        .add_node(&trs(Vec3::new(0.0, 3.0, 0.0), Quat::from_rotation_x(-0.3), Vec3::ONE))
        .unwrap();
    let leaf = scene
        .add_node(&trs(Vec3::new(0.0, 0.0, -4.0), Quat::IDENTITY, Vec3::new(1.0, 0.5, 1.0)))
        .unwrap();
    scene.add_child(root, middle).unwrap();
    scene.add_child(middle, leaf).unwrap();

    let reference = scene.node(root).unwrap().matrix
        * scene.node(middle).unwrap().matrix
        * scene.node(leaf).unwrap().matrix;

    assert!(scene.global_transform(leaf).unwrap().abs_diff_eq(reference, 1e-5));
    assert!(scene
        .global_transform(leaf)
        .unwrap()
        .abs_diff_eq(scene.global_transform(middle).unwrap() * scene.node(leaf).unwrap().matrix, 1e-5));
}

#[test]
fn test_global_transform_tracks_ancestor_edits() {
    let mut scene = SceneGraph::new();
    let parent = scene.add_node(&trs(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)).unwrap();
    let child = scene
        .add_node(&trs(Vec3::new(0.0, 0.0, 2.0), Quat::IDENTITY, Vec3::ONE))
        .unwrap();
    scene.add_child(parent, child).unwrap();

    scene
        .set_local_trs(parent, Vec3::new(5.0, 0.0, 0.0), Quat::IDENTITY, Vec3::ONE)
        .unwrap();

    assert!(scene
        .world_translation(child)
        .unwrap()
        .abs_diff_eq(Vec3::new(5.0, 0.0, 2.0), 1e-6));
}

#[test]
fn test_set_local_matrix_decomposes() {
    let mut scene = SceneGraph::new();
    let node = scene.add_node(&NodeOptions::default()).unwrap();
    let matrix = Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, 2.0, 3.0),
        Quat::from_rotation_z(0.25),
        Vec3::new(-1.0, 0.0, 6.0),
    );

    scene.set_local_matrix(node, matrix).unwrap();

    let stored = scene.node(node).unwrap();
    assert!(stored.translation.abs_diff_eq(Vec3::new(-1.0, 0.0, 6.0), 1e-5));
    assert!(stored.scale.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
}

#[test]
fn test_reparenting_keeps_single_parent() {
    let mut scene = SceneGraph::new();
    let a = scene.add_node(&NodeOptions::default()).unwrap();
    let b = scene.add_node(&NodeOptions::default()).unwrap();
    let c = scene.add_node(&NodeOptions::default()).unwrap();

    scene.add_child(a, c).unwrap();
    scene.add_child(b, c).unwrap();
    scene.add_child(a, c).unwrap();

    let parents: Vec<_> = scene
        .iter()
        .filter(|(_, node)| node.children.contains(&c))
        .map(|(id, _)| id)
        .collect();
    assert_eq!(parents, vec![a]);
    assert_eq!(scene.traversal_order().iter().filter(|&&id| id == c).count(), 1);
}

#[test]
fn test_deep_cycle_is_rejected() {
    let mut scene = SceneGraph::new();
    let a = scene.add_node(&NodeOptions::default()).unwrap();
    let b = scene.add_node(&NodeOptions::default()).unwrap();
    let c = scene.add_node(&NodeOptions::default()).unwrap();
    scene.add_child(a, b).unwrap();
    scene.add_child(b, c).unwrap();

    let result = scene.add_child(c, a);
    assert!(matches!(result, Err(EngineError::InvalidHierarchy { .. })));
    assert!(scene.global_transform(c).is_ok());
}

#[test]
fn test_scene_description_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "nodes": [
                {{ "name": "Camera", "category": "player", "camera": {{}} }},
                {{ "category": "spawn_anchor" }},
                {{ "name": "pickup", "category": "pickup", "translation": [0.0, 0.0, -3.0],
                   "mesh": {{ "min": [-0.5, -0.5, -0.5], "max": [0.5, 0.5, 0.5] }} }}
            ]
        }}"#
    )
    .unwrap();

    let description = SceneDescription::load(file.path()).unwrap();
    let scene = SceneGraph::from_description(&description).unwrap();

    let pickup = scene.find_first(NodeCategory::Pickup).unwrap();
    let node = scene.node(pickup).unwrap();
    assert_eq!(node.aabb.min, Vec3::splat(-0.25));
    assert!(node.visible);
    assert!(!node.picked_up);
}

#[test]
fn test_missing_scene_file_is_io_error() {
    let result = SceneDescription::load("/definitely/not/here.json");
    assert!(matches!(result, Err(EngineError::Io(_))));
}

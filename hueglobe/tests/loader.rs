use hueglobe::assets::{
    AssetSource, FileSource, LoadError, Material, MemorySource, ModelLoader, PendingLoad,
    SceneLoader,
};
use hueglobe::core::{NodeKind, Scene};
use nalgebra::{Matrix4, Vector3};
use std::time::{Duration, Instant};

const TRIANGLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/assets/triangle.gltf");
const TRIANGLE_GLB: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/assets/triangle.glb");
const TRIANGLE_EXTERNAL: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/assets/external/triangle.gltf"
);

#[derive(Debug)]
struct OfflineSource;

impl AssetSource for OfflineSource {
    fn describe(&self) -> String {
        "https://example.invalid/globe.glb".to_string()
    }

    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        Err(LoadError::Unavailable {
            reason: "network is down".to_string(),
        })
    }
}

fn scene_with_one_root() -> Scene {
    let mut scene = Scene::new();
    let light = scene.new_node("Light", NodeKind::Group);
    scene.add_root(light).unwrap();
    scene
}

/// Polls like the render loop does and collects every outcome until the worker is done
fn poll_until_finished(
    pending: &mut PendingLoad,
    scene: &mut Scene,
) -> Vec<Result<hueglobe::core::NodeId, LoadError>> {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut outcomes = Vec::new();

    while !pending.is_finished() && Instant::now() < deadline {
        outcomes.extend(pending.poll(scene));
        std::thread::sleep(Duration::from_millis(1));
    }
    // a few more frames after the load finished
    for _ in 0..5 {
        outcomes.extend(pending.poll(scene));
    }

    outcomes
}

#[test]
fn test_parse_keeps_hierarchy_and_uvs() {
    let bytes = std::fs::read(TRIANGLE).unwrap();
    let model = SceneLoader::parse("triangle", &bytes, None).unwrap();

    assert_eq!(model.nodes.len(), 1);
    assert_eq!(model.mesh_count(), 1);

    let globe = &model.nodes[0];
    assert_eq!(globe.name, "Globe");
    assert!(globe.mesh.is_none());
    assert_eq!(
        globe.transform,
        Matrix4::new_translation(&Vector3::new(0.0, 2.0, 0.0))
    );

    let (mesh, material) = globe.children[0].mesh.as_ref().unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.vertices[2].uv.x, 0.5);
    assert_eq!(material.base_color(), Some(Vector3::new(1.0, 0.0, 0.0)));
}

#[test]
fn test_load_overrides_materials() {
    let mut scene = scene_with_one_root();
    let mut pending = ModelLoader::new(FileSource::new(TRIANGLE))
        .override_material(Material::HueGradient)
        .spawn();

    let root = pending.wait(&mut scene).unwrap().unwrap();

    assert_eq!(scene.child_count(), 2);
    assert!(scene.roots().contains(&root));

    let draws = scene.draw_list();
    assert_eq!(draws.len(), 1);
    assert!(draws[0].material.is_hue_gradient());
    assert_eq!(
        draws[0].world,
        Matrix4::new_translation(&Vector3::new(0.0, 2.0, 0.0))
    );

    assert!(pending.is_finished());
    assert!(pending.poll(&mut scene).is_none());
}

#[test]
fn test_load_without_override_keeps_imported_material() {
    let mut scene = Scene::new();
    let bytes = std::fs::read(TRIANGLE).unwrap();
    let mut pending = ModelLoader::new(MemorySource::new("triangle", bytes)).spawn();

    pending.wait(&mut scene).unwrap().unwrap();

    let draws = scene.draw_list();
    assert_eq!(draws[0].material.base_color(), Some(Vector3::new(1.0, 0.0, 0.0)));
}

#[test]
fn test_failed_load_leaves_scene_untouched() {
    let mut scene = scene_with_one_root();
    let nodes_before = scene.node_count();

    let mut pending = ModelLoader::new(OfflineSource)
        .override_material(Material::HueGradient)
        .spawn();
    let outcomes = poll_until_finished(&mut pending, &mut scene);

    assert_eq!(outcomes.len(), 1, "the error has to be reported exactly once");
    assert!(matches!(outcomes[0], Err(LoadError::Unavailable { .. })));
    assert_eq!(scene.child_count(), 1);
    assert_eq!(scene.node_count(), nodes_before);
}

#[test]
fn test_successful_poll_reports_once() {
    let mut scene = Scene::new();
    let mut pending = ModelLoader::new(FileSource::new(TRIANGLE)).spawn();

    let outcomes = poll_until_finished(&mut pending, &mut scene);

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_ok());
    assert_eq!(scene.child_count(), 1);
}

#[test]
fn test_missing_file_is_a_fetch_error() {
    let mut scene = Scene::new();
    let mut pending = ModelLoader::new(FileSource::new("does/not/exist.glb")).spawn();

    let outcome = pending.wait(&mut scene).unwrap();

    assert!(matches!(outcome, Err(LoadError::Fetch { .. })));
    assert_eq!(scene.child_count(), 0);
    assert_eq!(scene.node_count(), 0);
}

#[test]
fn test_garbage_is_a_parse_error() {
    let mut scene = Scene::new();
    let mut pending = ModelLoader::new(MemorySource::new("garbage", b"not a model".to_vec())).spawn();

    let outcome = pending.wait(&mut scene).unwrap();

    assert!(matches!(outcome, Err(LoadError::Parse { .. })));
    assert_eq!(scene.child_count(), 0);
}

fn assert_loaded_triangle(path: &str) {
    let mut scene = Scene::new();
    let mut pending = ModelLoader::new(FileSource::new(path))
        .override_material(Material::HueGradient)
        .spawn();

    let root = pending.wait(&mut scene).unwrap().unwrap();

    assert_eq!(scene.roots(), &[root]);
    assert_eq!(scene.mesh_count(), 1);

    let draws = scene.draw_list();
    assert_eq!(draws.len(), 1);
    assert!(draws[0].material.is_hue_gradient());
    assert_eq!(scene.mesh(draws[0].mesh).unwrap().vertex_count(), 3);
}

#[test]
fn test_binary_container_loads_from_file() {
    assert_loaded_triangle(TRIANGLE_GLB);
}

#[test]
fn test_sibling_buffer_loads_from_file() {
    assert_loaded_triangle(TRIANGLE_EXTERNAL);
}

#[test]
fn test_sibling_buffer_needs_a_base_dir() {
    let bytes = std::fs::read(TRIANGLE_EXTERNAL).unwrap();

    let detached = SceneLoader::parse("triangle", &bytes, None);
    assert!(matches!(detached, Err(LoadError::Parse { .. })));

    let base = std::path::Path::new(TRIANGLE_EXTERNAL).parent();
    let model = SceneLoader::parse("triangle", &bytes, base).unwrap();
    assert_eq!(model.mesh_count(), 1);
}

#[test]
fn test_binary_container_parses_from_memory() {
    let bytes = std::fs::read(TRIANGLE_GLB).unwrap();
    let model = SceneLoader::parse("globe.glb", &bytes, None).unwrap();

    assert_eq!(model.mesh_count(), 1);
    assert_eq!(model.nodes[0].name, "Globe");
}

use crate::assets::{LoadError, Material, NoSceneSnafu, ParseSnafu};
use crate::core::{Mesh, NodeId, NodeKind, Scene, Vertex3D};
use gltf::buffer::Data as BufferData;
use gltf::{Document, Gltf, Node, mesh};
use itertools::Itertools;
use nalgebra::{Matrix4, Vector2, Vector3};
use snafu::{OptionExt, ResultExt};
use std::path::Path;
use tracing::{trace, warn};

pub struct GltfScene {
    pub doc: Document,
    pub buffers: Vec<BufferData>,
}

impl GltfScene {
    /// Parses `.glb` or `.gltf` bytes. Relative buffer URIs resolve against `base`, the binary
    /// chunk and embedded data URIs always load. Images are skipped, no material samples them.
    pub fn from_slice(bytes: &[u8], base: Option<&Path>) -> Result<Self, LoadError> {
        let Gltf { document, blob } = Gltf::from_slice(bytes).context(ParseSnafu)?;
        let buffers = gltf::import_buffers(&document, base, blob).context(ParseSnafu)?;
        Ok(Self {
            doc: document,
            buffers,
        })
    }
}

/// A parsed model that is not yet part of any [`Scene`]. Built on the loader thread.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub name: String,
    pub nodes: Vec<ModelNode>,
}

#[derive(Debug, Clone)]
pub struct ModelNode {
    pub name: String,
    pub transform: Matrix4<f32>,
    pub mesh: Option<(Mesh, Material)>,
    pub children: Vec<ModelNode>,
}

impl LoadedModel {
    pub fn mesh_count(&self) -> usize {
        fn count(node: &ModelNode) -> usize {
            node.mesh.is_some() as usize + node.children.iter().map(count).sum::<usize>()
        }
        self.nodes.iter().map(count).sum()
    }
}

pub struct SceneLoader;

impl SceneLoader {
    pub fn parse(name: &str, bytes: &[u8], base: Option<&Path>) -> Result<LoadedModel, LoadError> {
        let scene = GltfScene::from_slice(bytes, base)?;
        Self::load_model(name, &scene)
    }

    pub fn load_model(name: &str, gltf_scene: &GltfScene) -> Result<LoadedModel, LoadError> {
        let doc = &gltf_scene.doc;

        let root_scene = doc
            .default_scene()
            .or_else(|| doc.scenes().next())
            .context(NoSceneSnafu)?;

        let nodes = root_scene
            .nodes()
            .map(|node| build_node(gltf_scene, node))
            .collect();

        Ok(LoadedModel {
            name: name.to_string(),
            nodes,
        })
    }

    /// Moves a parsed model into the scene as one detached group node and returns that node.
    pub fn instantiate(scene: &mut Scene, model: LoadedModel) -> NodeId {
        let root = scene.new_node(model.name, NodeKind::Group);
        for node in model.nodes {
            Self::spawn_node(scene, root, node);
        }
        root
    }

    fn spawn_node(scene: &mut Scene, parent: NodeId, node: ModelNode) {
        trace!("Starting to build scene node {:?}", node.name);

        let kind = match node.mesh {
            Some((mesh, material)) => NodeKind::Mesh {
                mesh: scene.add_mesh(mesh),
                material,
            },
            None => NodeKind::Group,
        };

        let id = scene.new_node(node.name, kind);
        if let Some(entry) = scene.node_mut(id) {
            entry.transform = node.transform;
        }

        // both ids were created right here, so attaching can't fail
        if let Err(e) = scene.add_child(parent, id) {
            warn!("Couldn't attach loaded node: {e}");
            return;
        }

        for child in node.children {
            Self::spawn_node(scene, id, child);
        }
    }
}

fn build_node(scene: &GltfScene, node: Node) -> ModelNode {
    let name = node.name().unwrap_or("Unnamed").to_string();
    let transform = Matrix4::from(node.transform().matrix());
    let mesh = load_mesh(scene, &node);
    let children = node
        .children()
        .map(|child| build_node(scene, child))
        .collect();

    ModelNode {
        name,
        transform,
        mesh,
        children,
    }
}

fn load_mesh(scene: &GltfScene, node: &Node) -> Option<(Mesh, Material)> {
    let mesh = node.mesh()?;
    let get_buf = |b: gltf::Buffer| -> Option<&[u8]> { scene.buffers.get(b.index()).map(|d| &d.0[..]) };

    let mut vertices = Vec::new();
    let mut material = None;

    for prim in mesh.primitives() {
        if prim.mode() != mesh::Mode::Triangles {
            warn!("Non-triangle primitive encountered; skipping.");
            continue;
        }

        let reader = prim.reader(get_buf);

        let Some(pos) = reader.read_positions().map(|it| it.collect::<Vec<_>>()) else {
            warn!("Primitive without positions encountered; skipping.");
            continue;
        };
        let uv0 = reader.read_tex_coords(0).map(|tc| tc.into_f32().collect::<Vec<_>>());

        let indices: Vec<u32> = match reader.read_indices() {
            Some(ind) => ind.into_u32().collect(),
            None => (0u32..pos.len() as u32).collect(),
        };

        for (a, b, c) in indices.iter().copied().tuples() {
            let tri = [a, b, c];
            if tri.iter().any(|&vi| vi as usize >= pos.len()) {
                warn!("Triangle {tri:?} indexes past {} positions; skipping.", pos.len());
                continue;
            }

            for vi in tri {
                let p = pos[vi as usize];
                let uv = uv0
                    .as_ref()
                    .and_then(|uv| uv.get(vi as usize))
                    .copied()
                    .unwrap_or([0.0, 0.0]);

                vertices.push(Vertex3D::new(Vector3::from(p), Vector2::from(uv)));
            }
        }

        if material.is_none() {
            material = Some(import_material(&prim.material()));
        }
    }

    if vertices.is_empty() {
        return None;
    }

    let name = mesh.name().unwrap_or("Mesh").to_string();
    Some((
        Mesh::new(name, vertices),
        material.unwrap_or_default(),
    ))
}

fn import_material(material: &gltf::Material) -> Material {
    let name = material.name().unwrap_or("Material");
    let base = material.pbr_metallic_roughness().base_color_factor();
    Material::unlit(name, Vector3::new(base[0], base[1], base[2]))
}

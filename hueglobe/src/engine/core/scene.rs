//! The scene graph the widget renders.
//!
//! Nodes live in a slot map and reference each other by [`NodeId`]. A node only becomes part of
//! the rendered scene once it, or one of its ancestors, is added as a root with
//! [`Scene::add_root`]. Detached subtrees can be built up first and then attached in one step,
//! which is how a finished model load is inserted.

use crate::assets::Material;
use crate::components::Light;
use crate::core::Mesh;
use nalgebra::Matrix4;
use slotmap::{SlotMap, new_key_type};
use snafu::{Snafu, ensure};
use tracing::trace;

new_key_type! {
    pub struct NodeId;
    pub struct MeshId;
}

#[derive(Debug, Snafu)]
pub enum SceneError {
    #[snafu(display("Node {node:?} doesn't exist in this scene"))]
    UnknownNode { node: NodeId },

    #[snafu(display("Node {node:?} already has a parent or is a root"))]
    AlreadyAttached { node: NodeId },

    #[snafu(display("Attaching {child:?} to {parent:?} would create a cycle"))]
    Cycle { parent: NodeId, child: NodeId },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh { mesh: MeshId, material: Material },
    Light(Light),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    /// Transform relative to the parent node
    pub transform: Matrix4<f32>,
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    is_root: bool,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn material(&self) -> Option<&Material> {
        match &self.kind {
            NodeKind::Mesh { material, .. } => Some(material),
            _ => None,
        }
    }
}

/// One mesh that has to be drawn this frame
#[derive(Debug, Clone)]
pub struct DrawItem<'a> {
    pub node: NodeId,
    pub mesh: MeshId,
    pub material: &'a Material,
    pub world: Matrix4<f32>,
}

#[derive(Debug, Default)]
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    meshes: SlotMap<MeshId, Mesh>,
    roots: Vec<NodeId>,
}

impl Scene {
    pub fn new() -> Self {
        Scene::default()
    }

    /// Creates a detached node. It is not rendered until it is attached to a root.
    pub fn new_node(&mut self, name: impl Into<String>, kind: NodeKind) -> NodeId {
        self.nodes.insert(Node {
            name: name.into(),
            transform: Matrix4::identity(),
            kind,
            parent: None,
            children: Vec::new(),
            is_root: false,
        })
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.insert(mesh)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Amount of top level children, like `scene.children.length`
    pub fn child_count(&self) -> usize {
        self.roots.len()
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find_map(|(id, node)| (node.name == name).then_some(id))
    }

    pub fn add_root(&mut self, node: NodeId) -> Result<(), SceneError> {
        let entry = self
            .nodes
            .get_mut(node)
            .ok_or(SceneError::UnknownNode { node })?;
        ensure!(
            entry.parent.is_none() && !entry.is_root,
            AlreadyAttachedSnafu { node }
        );

        entry.is_root = true;
        self.roots.push(node);
        trace!("Added root node {:?}", entry.name);
        Ok(())
    }

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        ensure!(
            self.nodes.contains_key(parent),
            UnknownNodeSnafu { node: parent }
        );
        let entry = self
            .nodes
            .get(child)
            .ok_or(SceneError::UnknownNode { node: child })?;
        ensure!(
            entry.parent.is_none() && !entry.is_root,
            AlreadyAttachedSnafu { node: child }
        );
        ensure!(
            !self.is_ancestor_or_self(child, parent),
            CycleSnafu { parent, child }
        );

        if let Some(entry) = self.nodes.get_mut(child) {
            entry.parent = Some(parent);
        }
        if let Some(entry) = self.nodes.get_mut(parent) {
            entry.children.push(child);
        }
        Ok(())
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes.get(node).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    /// Removes a node and its whole subtree. Meshes stay in the mesh store.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let parent = self.nodes.get(id)?.parent;
        match parent {
            Some(parent) => {
                if let Some(parent) = self.nodes.get_mut(parent) {
                    parent.children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }

        let mut stack = self.nodes.get(id)?.children.clone();
        while let Some(child) = stack.pop() {
            if let Some(node) = self.nodes.remove(child) {
                stack.extend(node.children);
            }
        }
        self.nodes.remove(id)
    }

    /// Visits `root` and all of its descendants depth first
    pub fn traverse_mut(&mut self, root: NodeId, mut visit: impl FnMut(NodeId, &mut Node)) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            visit(id, node);
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Replaces the material of every mesh below and including `root`.
    /// Returns how many meshes were touched.
    pub fn override_materials(&mut self, root: NodeId, material: &Material) -> usize {
        let mut replaced = 0;
        self.traverse_mut(root, |_, node| {
            if let NodeKind::Mesh { material: current, .. } = &mut node.kind {
                *current = material.clone();
                replaced += 1;
            }
        });
        replaced
    }

    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.nodes.values().filter_map(|node| match &node.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        })
    }

    /// All meshes reachable from the roots, with their accumulated world transforms
    pub fn draw_list(&self) -> Vec<DrawItem<'_>> {
        let mut items = Vec::new();
        let mut stack: Vec<(NodeId, Matrix4<f32>)> = self
            .roots
            .iter()
            .rev()
            .map(|&root| (root, Matrix4::identity()))
            .collect();

        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let world = parent_world * node.transform;

            if let NodeKind::Mesh { mesh, material } = &node.kind {
                items.push(DrawItem {
                    node: id,
                    mesh: *mesh,
                    material,
                    world,
                });
            }

            stack.extend(node.children.iter().rev().map(|&child| (child, world)));
        }

        items
    }
}

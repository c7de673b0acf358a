/// Retained scene model handed to render backends
///
/// A [`Scene`] is a flat arena of [`Node`]s addressed by [`NodeId`]. Views
/// keep the ids of the nodes they animate, so nothing ever has to be found
/// again by walking the tree.

use crate::geometry::Mesh;
use crate::light::Light;
use crate::material::PhongMaterial;
use crate::transform::Transform;
use nalgebra::Matrix4;
use std::sync::Arc;

/// Handle to a node inside one [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Group,
    Mesh {
        geometry: Arc<Mesh>,
        material: PhongMaterial,
    },
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn material(&self) -> Option<&PhongMaterial> {
        match &self.kind {
            NodeKind::Mesh { material, .. } => Some(material),
            NodeKind::Group => None,
        }
    }

    pub fn material_mut(&mut self) -> Option<&mut PhongMaterial> {
        match &mut self.kind {
            NodeKind::Mesh { material, .. } => Some(material),
            NodeKind::Group => None,
        }
    }
}

/// A visible mesh resolved to world space
pub struct MeshInstance<'a> {
    pub id: NodeId,
    pub geometry: &'a Mesh,
    pub material: &'a PhongMaterial,
    pub world: Matrix4<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn add_group(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        self.insert(name, parent, NodeKind::Group, Transform::identity())
    }

    pub fn add_mesh(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        geometry: Arc<Mesh>,
        material: PhongMaterial,
        transform: Transform,
    ) -> NodeId {
        self.insert(name, parent, NodeKind::Mesh { geometry, material }, transform)
    }

    fn insert(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        kind: NodeKind,
        transform: Transform,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            transform,
            visible: true,
            kind,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].transform
    }

    /// Material of a mesh node, `None` for groups
    pub fn material_mut(&mut self, id: NodeId) -> Option<&mut PhongMaterial> {
        self.nodes[id.0].material_mut()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes().find(|(_, node)| node.name == name).map(|(id, _)| id)
    }

    /// Local-to-world matrix, composed through every ancestor
    pub fn world_matrix(&self, id: NodeId) -> Matrix4<f32> {
        let node = &self.nodes[id.0];
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    /// Every mesh whose whole ancestor chain is visible
    pub fn meshes(&self) -> Vec<MeshInstance<'_>> {
        let mut out = Vec::new();
        for &root in &self.roots {
            self.collect_meshes(root, Matrix4::identity(), &mut out);
        }
        out
    }

    fn collect_meshes<'a>(&'a self, id: NodeId, parent: Matrix4<f32>, out: &mut Vec<MeshInstance<'a>>) {
        let node = &self.nodes[id.0];
        if !node.visible {
            return;
        }
        let world = parent * node.transform.matrix();
        if let NodeKind::Mesh { geometry, material } = &node.kind {
            out.push(MeshInstance {
                id,
                geometry,
                material,
                world,
            });
        }
        for &child in &node.children {
            self.collect_meshes(child, world, out);
        }
    }
}

/// Turntable product renders: the quantum processor and the neural interface
use super::{light_scene, View, ViewKey, ACCENT};
use crate::animation;
use crate::config::ProductConfig;
use crate::geometry::Mesh;
use crate::input::FrameInput;
use crate::light::Light;
use crate::material::PhongMaterial;
use crate::projection::Camera;
use crate::rng::SceneRng;
use crate::scene::{NodeId, Scene};
use crate::transform::Transform;
use std::sync::Arc;

const NEURAL_GREEN: u32 = 0x00ff41;

/// Handles shared by both products: a base plate, the studs on it and a
/// raised core
#[derive(Debug, Clone)]
pub struct ProductParts {
    pub root: NodeId,
    pub base: NodeId,
    pub studs: Vec<NodeId>,
    pub core: NodeId,
}

pub struct ProductView {
    key: ViewKey,
    scene: Scene,
    camera: Camera,
    parts: ProductParts,
    /// Signed yaw per reference frame
    spin: f32,
}

impl ProductView {
    /// Chip with a 5x5 grid of glowing dots around an icosahedral core
    pub fn processor(config: &ProductConfig, width: u32, height: u32, rng: &mut SceneRng) -> Self {
        let mut scene = Self::studio();
        let root = scene.add_group("quantum-processor", None);

        let base = scene.add_mesh(
            "chip",
            Some(root),
            Arc::new(Mesh::cuboid(2.5, 2.5, 0.3)),
            PhongMaterial::new(0x1a1a2e).with_emissive(0x0f3460, 0.2).with_shininess(100.0),
            Transform::identity(),
        );

        const GRID: usize = 5;
        const SPACING: f32 = 0.5;
        let dot = Arc::new(Mesh::uv_sphere(0.08, 16, 16));
        let mut studs = Vec::with_capacity(GRID * GRID);
        for x in 0..GRID {
            for y in 0..GRID {
                let offset = |i: usize| (i as f32 - GRID as f32 / 2.0) * SPACING;
                let material = PhongMaterial::glowing(ACCENT, 0.5 + rng.next_f32() * 0.3).with_shininess(120.0);
                studs.push(scene.add_mesh(
                    &format!("dot-{x}-{y}"),
                    Some(root),
                    dot.clone(),
                    material,
                    Transform::from_position(offset(x), offset(y), 0.2),
                ));
            }
        }

        let core = scene.add_mesh(
            "core",
            Some(root),
            Arc::new(Mesh::icosahedron(0.35, 4)),
            PhongMaterial::glowing(0x00ffff, 0.8).with_shininess(120.0),
            Transform::from_position(0.0, 0.0, 0.25),
        );

        Self {
            key: ViewKey::Processor,
            scene,
            camera: Camera::at_distance(width, height, config.camera_distance),
            parts: ProductParts {
                root,
                base,
                studs,
                core,
            },
            spin: config.processor_spin,
        }
    }

    /// Board with a 4x6 lattice of neural nodes around a tetrahedral core
    pub fn interface(config: &ProductConfig, width: u32, height: u32, rng: &mut SceneRng) -> Self {
        let mut scene = Self::studio();
        let root = scene.add_group("neural-interface", None);

        let base = scene.add_mesh(
            "board",
            Some(root),
            Arc::new(Mesh::cuboid(2.8, 1.8, 0.15)),
            PhongMaterial::new(0x0d1b2a).with_emissive(ACCENT, 0.05).with_shininess(100.0),
            Transform::identity(),
        );

        let node = Arc::new(Mesh::uv_sphere(0.08, 16, 16));
        let mut studs = Vec::with_capacity(24);
        for row in 0..4 {
            for col in 0..6 {
                let x = (col as f32 - 2.5) * 0.45;
                let y = (row as f32 - 1.5) * 0.4;
                let color = if rng.chance(0.5) { ACCENT } else { NEURAL_GREEN };
                let material = PhongMaterial::glowing(color, 0.4 + rng.next_f32() * 0.3).with_shininess(120.0);
                studs.push(scene.add_mesh(
                    &format!("node-{row}-{col}"),
                    Some(root),
                    node.clone(),
                    material,
                    Transform::from_position(x, y, 0.15),
                ));
            }
        }

        let core = scene.add_mesh(
            "core",
            Some(root),
            Arc::new(Mesh::tetrahedron(0.25, 2)),
            PhongMaterial::glowing(NEURAL_GREEN, 0.6).with_shininess(120.0),
            Transform::from_position(0.0, 0.0, 0.25),
        );

        Self {
            key: ViewKey::Interface,
            scene,
            camera: Camera::at_distance(width, height, config.camera_distance),
            parts: ProductParts {
                root,
                base,
                studs,
                core,
            },
            spin: -config.interface_spin,
        }
    }

    fn studio() -> Scene {
        let mut scene = Scene::new();
        light_scene(&mut scene, 0.6, Light::directional(ACCENT, 1.0, [5.0, 10.0, 5.0]));
        scene
    }

    pub fn parts(&self) -> &ProductParts {
        &self.parts
    }
}

impl View for ProductView {
    fn key(&self) -> ViewKey {
        self.key
    }

    fn update(&mut self, input: &FrameInput) {
        self.scene.transform_mut(self.parts.root).rotation.y = animation::spin(0.0, self.spin, input.time);
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}

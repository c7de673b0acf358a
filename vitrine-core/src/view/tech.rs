/// Circuit board for the technology section
use super::{light_scene, View, ViewKey, ACCENT};
use crate::animation;
use crate::color::Color;
use crate::config::TechConfig;
use crate::geometry::Mesh;
use crate::input::FrameInput;
use crate::light::Light;
use crate::material::PhongMaterial;
use crate::projection::Camera;
use crate::rng::SceneRng;
use crate::scene::{NodeId, Scene};
use crate::transform::{RotationState, Transform};
use std::f32::consts::PI;
use std::sync::Arc;

const GOLD: u32 = 0xffd700;

#[derive(Debug, Clone)]
pub struct CircuitBoard {
    pub root: NodeId,
    pub substrate: NodeId,
    pub traces: Vec<NodeId>,
    pub components: Vec<NodeId>,
}

pub struct TechView {
    scene: Scene,
    camera: Camera,
    board: CircuitBoard,
}

impl TechView {
    pub fn new(config: &TechConfig, width: u32, height: u32, rng: &mut SceneRng) -> Self {
        let mut scene = Scene::new();
        light_scene(&mut scene, 0.6, Light::spot(ACCENT, 1.0, [10.0, 10.0, 10.0]));

        let root = scene.add_group("circuit-board", None);
        let substrate = scene.add_mesh(
            "substrate",
            Some(root),
            Arc::new(Mesh::cuboid(6.0, 0.2, 4.0)),
            PhongMaterial::new(0x1a4d2a).with_shininess(30.0),
            Transform::identity(),
        );

        let traces = (0..config.trace_count)
            .map(|i| {
                let geometry = Mesh::cuboid(rng.next_f32() * 2.0 + 0.5, 0.01, 0.1);
                let material = PhongMaterial::new(GOLD).with_emissive(GOLD, 0.1);
                let transform = Transform::from_position(rng.centered(2.5), 0.11, rng.centered(1.5))
                    .with_rotation(RotationState::new(0.0, 0.0, rng.next_f32() * PI));
                scene.add_mesh(&format!("trace-{i}"), Some(root), Arc::new(geometry), material, transform)
            })
            .collect();

        let components = (0..config.component_count)
            .map(|i| {
                let geometry = Mesh::cuboid(
                    rng.next_f32() * 0.3 + 0.1,
                    rng.next_f32() * 0.2 + 0.1,
                    rng.next_f32() * 0.3 + 0.1,
                );
                let material = PhongMaterial::default()
                    .with_color(Color::from_hsl(rng.next_f32(), 0.5, 0.5))
                    .with_shininess(80.0);
                let transform = Transform::from_position(rng.centered(2.5), 0.2, rng.centered(1.5));
                scene.add_mesh(&format!("component-{i}"), Some(root), Arc::new(geometry), material, transform)
            })
            .collect();

        Self {
            scene,
            camera: Camera::at_distance(width, height, config.camera_distance),
            board: CircuitBoard {
                root,
                substrate,
                traces,
                components,
            },
        }
    }

    pub fn board(&self) -> &CircuitBoard {
        &self.board
    }
}

impl View for TechView {
    fn key(&self) -> ViewKey {
        ViewKey::Tech
    }

    fn update(&mut self, input: &FrameInput) {
        let (tilt_x, tilt_y) = animation::board_tilt(input.time);
        let root = self.scene.transform_mut(self.board.root);
        root.rotation.x = tilt_x;
        root.rotation.y = tilt_y;
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

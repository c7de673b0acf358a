/// Ring of translucent cubes floating behind the page
use super::{light_scene, View, ViewKey, ACCENT};
use crate::animation;
use crate::config::BackgroundConfig;
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

/// One cube and the parameters that drive it
#[derive(Debug, Clone)]
pub struct FloatingCube {
    pub node: NodeId,
    pub base_y: f32,
    pub initial_rotation: RotationState,
    /// Radians per reference frame
    pub rotation_speed: RotationState,
    pub float_speed: f32,
    pub float_amount: f32,
}

pub struct BackgroundView {
    scene: Scene,
    camera: Camera,
    group: NodeId,
    cubes: Vec<FloatingCube>,
}

impl BackgroundView {
    pub fn new(config: &BackgroundConfig, width: u32, height: u32, rng: &mut SceneRng) -> Self {
        let mut scene = Scene::new();
        light_scene(&mut scene, 0.5, Light::directional(ACCENT, 1.0, [5.0, 10.0, 5.0]));

        let group = scene.add_group("cubes", None);
        let count = config.cube_count;
        let cubes = (0..count)
            .map(|i| {
                let size = 0.8 + rng.next_f32() * 1.2;
                let color = config.palette[i % config.palette.len()];
                let material = PhongMaterial::emitting(color, 0.2 + rng.next_f32() * 0.1)
                    .with_shininess(100.0)
                    .with_opacity(0.7);

                let angle = i as f32 / count as f32 * PI * 2.0;
                let radius = 8.0 + rng.next_f32() * 4.0;
                let base_y = rng.centered(3.0);
                let initial_rotation = RotationState::new(
                    rng.next_f32() * 0.3,
                    rng.next_f32() * 0.3,
                    rng.next_f32() * 0.3,
                );
                let transform = Transform::from_position(angle.cos() * radius, base_y, angle.sin() * radius)
                    .with_rotation(initial_rotation);

                let node = scene.add_mesh(
                    &format!("cube-{i}"),
                    Some(group),
                    Arc::new(Mesh::cube(size)),
                    material,
                    transform,
                );

                let rotation_speed = RotationState::new(
                    rng.centered(0.001),
                    rng.centered(0.0015),
                    rng.centered(0.0005),
                );
                FloatingCube {
                    node,
                    base_y,
                    initial_rotation,
                    rotation_speed,
                    float_speed: 0.5 + rng.next_f32() * 0.5,
                    float_amount: 0.5 + rng.next_f32() * 0.5,
                }
            })
            .collect();

        Self {
            scene,
            camera: Camera::at_distance(width, height, config.camera_distance),
            group,
            cubes,
        }
    }

    pub fn cubes(&self) -> &[FloatingCube] {
        &self.cubes
    }

    pub fn group(&self) -> NodeId {
        self.group
    }
}

impl View for BackgroundView {
    fn key(&self) -> ViewKey {
        ViewKey::Background
    }

    fn update(&mut self, input: &FrameInput) {
        let t = input.time;
        for (i, cube) in self.cubes.iter().enumerate() {
            let transform = self.scene.transform_mut(cube.node);
            transform.rotation.x = animation::spin(cube.initial_rotation.x, cube.rotation_speed.x, t);
            transform.rotation.y = animation::spin(cube.initial_rotation.y, cube.rotation_speed.y, t);
            transform.position.y = animation::float_offset(cube.base_y, t, cube.float_speed, cube.float_amount, i);
            transform.position.z = animation::parallax_depth(input.scroll_y, i);
            transform.set_uniform_scale(animation::breathing_scale(t, i));

            if let Some(material) = self.scene.material_mut(cube.node) {
                material.opacity = animation::opacity_pulse(t, i);
            }
        }

        let (sway_x, sway_y) = animation::group_sway(t);
        let group = self.scene.transform_mut(self.group);
        group.rotation.x = sway_x;
        group.rotation.y = sway_y;
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

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> BackgroundView {
        BackgroundView::new(&BackgroundConfig::default(), 1280, 720, &mut SceneRng::new(11))
    }

    #[test]
    fn test_cube_layout() {
        let view = view();
        assert_eq!(view.cubes().len(), 6);
        assert_eq!(view.scene().node(view.group()).children().len(), 6);
        assert_eq!(view.camera().position.z, 20.0);

        for (i, cube) in view.cubes().iter().enumerate() {
            let node = view.scene().node(cube.node);
            let position = node.transform.position;
            let radius = position.x.hypot(position.z);
            assert!((7.999..12.001).contains(&radius));
            assert!((-3.0..3.0).contains(&cube.base_y));
            assert!((0.5..1.0).contains(&cube.float_speed));
            assert!((0.5..1.0).contains(&cube.float_amount));

            let material = node.material().unwrap();
            let palette = BackgroundConfig::default().palette;
            assert_eq!(material.color, palette[i % palette.len()]);
            assert_eq!(material.emissive, material.color);
            assert!(material.transparent);
            assert_eq!(material.opacity, 0.7);
        }
    }

    #[test]
    fn test_update_follows_curves() {
        let mut view = view();
        let input = FrameInput::at(3.7).with_scroll(420.0);
        view.update(&input);

        for (i, cube) in view.cubes().iter().enumerate() {
            let node = view.scene().node(cube.node);
            let expected_y = cube.base_y + (3.7 * cube.float_speed + i as f32).sin() * cube.float_amount * 0.3;
            assert!((node.transform.position.y - expected_y).abs() < 1e-5);
            assert!((node.transform.position.z - (-420.0 * 0.005 + i as f32 * 0.3)).abs() < 1e-5);

            let opacity = node.material().unwrap().opacity;
            assert!((opacity - (0.6 + (3.7 * 0.8 + i as f32).sin() * 0.15)).abs() < 1e-5);
            assert!((node.transform.scale.x - node.transform.scale.z).abs() < 1e-9);
        }

        let group = view.scene().node(view.group()).transform;
        assert!((group.rotation.y - (3.7_f32 * 0.1).sin() * 0.02).abs() < 1e-5);
        assert!((group.rotation.x - (3.7_f32 * 0.08).cos() * 0.01).abs() < 1e-5);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = view();
        let b = view();
        for (ca, cb) in a.cubes().iter().zip(b.cubes()) {
            assert_eq!(ca.base_y, cb.base_y);
            assert_eq!(ca.rotation_speed, cb.rotation_speed);
        }
    }
}

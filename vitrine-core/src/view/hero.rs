/// Robot mascot shown in the hero section
use super::{light_scene, View, ViewKey, ACCENT};
use crate::animation;
use crate::config::HeroConfig;
use crate::geometry::Mesh;
use crate::input::FrameInput;
use crate::light::Light;
use crate::material::PhongMaterial;
use crate::projection::Camera;
use crate::scene::{NodeId, Scene};
use crate::transform::{RotationState, Transform};
use std::sync::Arc;

const TRIM: u32 = 0x2a2a2a;
const GLOW: u32 = 0x00ffff;

/// Handles to every robot part, captured while building
#[derive(Debug, Clone, Copy)]
pub struct RobotParts {
    pub root: NodeId,
    pub head: NodeId,
    pub left_eye: NodeId,
    pub right_eye: NodeId,
    pub body: NodeId,
    pub left_arm: NodeId,
    pub right_arm: NodeId,
    pub chest: NodeId,
    pub antenna: NodeId,
    pub antenna_tip: NodeId,
}

impl RobotParts {
    /// Parts that roll back and forth, each with its own phase offset
    pub fn swinging(&self) -> [(NodeId, f32); 4] {
        [
            (self.body, 3.0),
            (self.left_arm, 4.0),
            (self.right_arm, 5.0),
            (self.chest, 6.0),
        ]
    }

    fn eyes(&self) -> [NodeId; 2] {
        [self.left_eye, self.right_eye]
    }
}

pub struct HeroView {
    scene: Scene,
    camera: Camera,
    parts: RobotParts,
    parallax: f32,
}

impl HeroView {
    pub fn new(config: &HeroConfig, width: u32, height: u32) -> Self {
        let mut scene = Scene::new();
        light_scene(&mut scene, 0.6, Light::point(ACCENT, 1.0, [10.0, 10.0, 10.0]));
        let parts = build_robot(&mut scene);

        Self {
            scene,
            camera: Camera::at_distance(width, height, config.camera_distance),
            parts,
            parallax: config.parallax,
        }
    }

    pub fn parts(&self) -> &RobotParts {
        &self.parts
    }
}

fn build_robot(scene: &mut Scene) -> RobotParts {
    let root = scene.add_group("robot", None);
    let mut part = |name: &str, geometry: Arc<Mesh>, material: PhongMaterial, transform: Transform| {
        scene.add_mesh(name, Some(root), geometry, material, transform)
    };

    let head = part(
        "head",
        Arc::new(Mesh::cuboid(1.5, 1.2, 1.0)),
        PhongMaterial::new(TRIM).with_emissive(ACCENT, 0.1).with_shininess(100.0),
        Transform::from_position(0.0, 1.5, 0.0),
    );

    let eye = Arc::new(Mesh::uv_sphere(0.15, 16, 16));
    let eye_material = PhongMaterial::glowing(GLOW, 0.8).with_shininess(120.0);
    let left_eye = part(
        "left-eye",
        eye.clone(),
        eye_material.clone(),
        Transform::from_position(-0.3, 1.5, 0.4),
    );
    let right_eye = part("right-eye", eye, eye_material, Transform::from_position(0.3, 1.5, 0.4));

    let body = part(
        "body",
        Arc::new(Mesh::cuboid(2.0, 2.5, 1.0)),
        PhongMaterial::new(0x1a1a1a).with_emissive(ACCENT, 0.05).with_shininess(80.0),
        Transform::from_position(0.0, -0.5, 0.0),
    );

    let arm = Arc::new(Mesh::cuboid(0.4, 2.0, 0.4));
    let arm_material = PhongMaterial::new(TRIM).with_emissive(ACCENT, 0.08).with_shininess(90.0);
    let left_arm = part(
        "left-arm",
        arm.clone(),
        arm_material.clone(),
        Transform::from_position(-1.3, -0.5, 0.0).with_rotation(RotationState::new(0.0, 0.0, 0.3)),
    );
    let right_arm = part(
        "right-arm",
        arm,
        arm_material,
        Transform::from_position(1.3, -0.5, 0.0).with_rotation(RotationState::new(0.0, 0.0, -0.3)),
    );

    let chest = part(
        "chest",
        Arc::new(Mesh::cuboid(1.5, 1.0, 0.1)),
        PhongMaterial::glowing(ACCENT, 0.6).with_shininess(120.0),
        Transform::from_position(0.0, -0.5, 0.55),
    );

    let antenna = part(
        "antenna",
        Arc::new(Mesh::cylinder(0.05, 0.05, 0.8, 8)),
        PhongMaterial::new(0x666666).with_emissive(ACCENT, 0.3).with_shininess(100.0),
        Transform::from_position(0.0, 2.3, 0.0),
    );

    let antenna_tip = part(
        "antenna-tip",
        Arc::new(Mesh::uv_sphere(0.1, 16, 16)),
        PhongMaterial::glowing(GLOW, 1.0).with_shininess(120.0),
        Transform::from_position(0.0, 2.7, 0.0),
    );

    RobotParts {
        root,
        head,
        left_eye,
        right_eye,
        body,
        left_arm,
        right_arm,
        chest,
        antenna,
        antenna_tip,
    }
}

impl View for HeroView {
    fn key(&self) -> ViewKey {
        ViewKey::Hero
    }

    fn update(&mut self, input: &FrameInput) {
        let t = input.time;
        let parts = self.parts;

        let root = self.scene.transform_mut(parts.root);
        root.position.y = animation::robot_hover(t);
        root.rotation.y = animation::robot_turn(t);

        for (node, phase) in parts.swinging() {
            self.scene.transform_mut(node).rotation.z = animation::limb_swing(t, phase);
        }

        let eye_glow = animation::eye_glow(t);
        for eye in parts.eyes() {
            if let Some(material) = self.scene.material_mut(eye) {
                material.emissive_intensity = eye_glow;
            }
        }

        if let Some(material) = self.scene.material_mut(parts.antenna_tip) {
            material.emissive_intensity = animation::beacon_glow(t);
        }

        self.camera.set_lateral_offset(
            input.pointer.x * self.parallax,
            input.pointer.y * self.parallax,
        );
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
    use crate::input::Pointer;

    #[test]
    fn test_robot_parts_are_named() {
        let view = HeroView::new(&HeroConfig::default(), 600, 600);
        let parts = view.parts();
        let scene = view.scene();
        assert_eq!(scene.node(parts.root).children().len(), 9);
        assert_eq!(scene.node(parts.antenna_tip).name, "antenna-tip");
        assert_eq!(scene.node(parts.left_arm).transform.rotation.z, 0.3);
        assert_eq!(scene.node(parts.head).transform.position.y, 1.5);
    }

    #[test]
    fn test_update_drives_named_parts() {
        let mut view = HeroView::new(&HeroConfig::default(), 600, 600);
        let t = 1.3_f64;
        view.update(&FrameInput::at(t));
        let curve = |rate: f64, phase: f64, amount: f64| ((t * rate + phase).sin() * amount) as f32;
        let parts = *view.parts();
        let scene = view.scene();

        let root = scene.node(parts.root).transform;
        assert!((root.position.y - curve(0.8, 0.0, 0.2)).abs() < 1e-6);
        assert!((root.rotation.y - curve(0.5, 0.0, 0.1)).abs() < 1e-6);

        let left_arm = scene.node(parts.left_arm).transform.rotation.z;
        assert!((left_arm - curve(2.0, 4.0, 0.1)).abs() < 1e-6);
        let chest = scene.node(parts.chest).transform.rotation.z;
        assert!((chest - curve(2.0, 6.0, 0.1)).abs() < 1e-6);
        // The head does not swing
        assert_eq!(scene.node(parts.head).transform.rotation.z, 0.0);

        let glow = 0.8 + curve(3.0, 0.0, 0.2);
        for eye in [parts.left_eye, parts.right_eye] {
            let intensity = scene.node(eye).material().unwrap().emissive_intensity;
            assert!((intensity - glow).abs() < 1e-6);
        }
        let tip = scene.node(parts.antenna_tip).material().unwrap().emissive_intensity;
        assert!((tip - (1.0 + curve(4.0, 0.0, 0.3))).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_parallax_moves_camera() {
        let mut view = HeroView::new(&HeroConfig::default(), 600, 600);
        view.update(&FrameInput::at(0.0).with_pointer(Pointer::new(1.0, -0.5)));
        let camera = view.camera();
        assert!((camera.position.x - 0.25).abs() < 1e-6);
        assert!((camera.position.y + 0.125).abs() < 1e-6);
        assert!((camera.target.x - 0.25).abs() < 1e-6);
        assert_eq!(camera.position.z, 5.0);
    }
}

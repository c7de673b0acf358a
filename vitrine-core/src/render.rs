/// Flattening a scene into shaded screen-space triangles
///
/// Backends that draw with 2D primitives (canvas paths, terminal cells)
/// share this step and only differ in how they fill a triangle.

use crate::color::Color;
use crate::light::{Light, LightKind};
use crate::material::PhongMaterial;
use crate::projection::{project_with, Camera};
use crate::scene::Scene;
use nalgebra::{Point3, Vector3};

/// Fraction of a light's color added as a specular highlight
const SPECULAR_STRENGTH: f32 = 0.25;

/// A projected, lit triangle ready to be filled
#[derive(Debug, Clone)]
pub struct ScreenTriangle {
    /// Pixel coordinates and normalized depth per corner
    pub points: [(f32, f32, f32); 3],
    pub color: Color,
    pub alpha: f32,
}

impl ScreenTriangle {
    pub fn depth(&self) -> f32 {
        (self.points[0].2 + self.points[1].2 + self.points[2].2) / 3.0
    }
}

/// Lit color of a surface point
pub fn shade(
    lights: &[Light],
    material: &PhongMaterial,
    position: &Point3<f32>,
    normal: &Vector3<f32>,
    eye: &Point3<f32>,
) -> Color {
    let view_dir = (eye - position).try_normalize(1e-9).unwrap_or_else(Vector3::z);
    let mut diffuse = Color::BLACK;
    let mut specular = Color::BLACK;

    for light in lights {
        if light.kind == LightKind::Ambient {
            diffuse = diffuse.add(&light.color.scale(light.intensity));
            continue;
        }
        let Some((to_light, strength)) = light.incidence(position) else {
            continue;
        };
        let lambert = normal.dot(&to_light).max(0.0);
        if lambert <= 0.0 {
            continue;
        }
        diffuse = diffuse.add(&light.color.scale(lambert * strength));

        let half = (to_light + view_dir).try_normalize(1e-9).unwrap_or(to_light);
        let highlight = normal.dot(&half).max(0.0).powf(material.shininess.max(1.0));
        specular = specular.add(&light.color.scale(highlight * strength * SPECULAR_STRENGTH));
    }

    material
        .color
        .modulate(&diffuse)
        .add(&specular)
        .add(&material.emissive.scale(material.emissive_intensity))
        .clamped()
}

/// Project and shade every front-facing triangle of `scene`, sorted far to
/// near so later triangles paint over earlier ones
pub fn screen_triangles(scene: &Scene, camera: &Camera, width: u32, height: u32) -> Vec<ScreenTriangle> {
    let view_projection = camera.view_projection();
    let mut out = Vec::new();

    for instance in scene.meshes() {
        let alpha = instance.material.effective_opacity();
        if alpha <= 0.0 {
            continue;
        }

        for triangle in &instance.geometry.triangles {
            let world = triangle
                .vertices
                .map(|v| instance.world.transform_point(&v.position));
            let Some(normal) = (world[1] - world[0]).cross(&(world[2] - world[0])).try_normalize(1e-12) else {
                continue;
            };
            let center = Point3::from((world[0].coords + world[1].coords + world[2].coords) / 3.0);
            if normal.dot(&(camera.position - center)) <= 0.0 {
                continue;
            }

            let projected = world.map(|p| project_with(&view_projection, &p, width, height));
            let [Some(a), Some(b), Some(c)] = projected else {
                continue;
            };

            out.push(ScreenTriangle {
                points: [a, b, c],
                color: shade(scene.lights(), instance.material, &center, &normal, &camera.position),
                alpha,
            });
        }
    }

    out.sort_by(|a, b| b.depth().total_cmp(&a.depth()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Mesh;
    use crate::transform::Transform;
    use std::sync::Arc;

    #[test]
    fn test_emissive_only_without_lights() {
        let material = PhongMaterial::new(0xffffff).with_emissive(0x00ff00, 0.5);
        let color = shade(&[], &material, &Point3::origin(), &Vector3::z(), &Point3::new(0.0, 0.0, 5.0));
        assert_eq!(color, Color::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_lit_face_brighter_than_unlit() {
        let lights = [Light::directional(0xffffff, 1.0, [0.0, 0.0, 1.0])];
        let material = PhongMaterial::new(0x808080);
        let eye = Point3::new(0.0, 0.0, 5.0);
        let front = shade(&lights, &material, &Point3::origin(), &Vector3::z(), &eye);
        let side = shade(&lights, &material, &Point3::origin(), &Vector3::x(), &eye);
        assert!(front.luminance() > side.luminance());
    }

    #[test]
    fn test_cube_shows_only_front_faces() {
        let mut scene = Scene::new();
        scene.add_light(Light::ambient(0x404040, 1.0));
        scene.add_mesh(
            "cube",
            None,
            Arc::new(Mesh::cube(1.0)),
            PhongMaterial::new(0xffffff),
            Transform::identity(),
        );
        let camera = Camera::at_distance(100, 100, 5.0);
        let triangles = screen_triangles(&scene, &camera, 100, 100);
        // Head-on, only the +z face survives culling
        assert_eq!(triangles.len(), 2);
        for triangle in &triangles {
            for (x, y, _) in triangle.points {
                assert!((0.0..=100.0).contains(&x) && (0.0..=100.0).contains(&y));
            }
        }
    }

    #[test]
    fn test_sorted_back_to_front() {
        let mut scene = Scene::new();
        for z in [1.0, -1.0] {
            scene.add_mesh(
                "plate",
                None,
                Arc::new(Mesh::cuboid(1.0, 1.0, 0.01)),
                PhongMaterial::new(0xffffff),
                Transform::from_position(0.0, 0.0, z),
            );
        }
        let camera = Camera::at_distance(100, 100, 5.0);
        let triangles = screen_triangles(&scene, &camera, 100, 100);
        assert_eq!(triangles.len(), 4);
        for pair in triangles.windows(2) {
            assert!(pair[0].depth() >= pair[1].depth());
        }
    }
}

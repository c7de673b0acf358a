/// Scene lights
use crate::color::Color;
use nalgebra::{Point3, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction
    Ambient,
    /// Parallel rays travelling from `position` towards the origin
    Directional,
    /// Omnidirectional light emitted at `position`
    Point,
    /// Cone of light from `position` towards the origin
    Spot { angle: f32, penumbra: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    pub position: Point3<f32>,
}

impl Light {
    pub fn ambient(color: u32, intensity: f32) -> Self {
        Self::with_kind(LightKind::Ambient, color, intensity, Point3::origin())
    }

    pub fn directional(color: u32, intensity: f32, position: [f32; 3]) -> Self {
        Self::with_kind(LightKind::Directional, color, intensity, position.into())
    }

    pub fn point(color: u32, intensity: f32, position: [f32; 3]) -> Self {
        Self::with_kind(LightKind::Point, color, intensity, position.into())
    }

    /// Spot light with a 60 degree cone aimed at the origin
    pub fn spot(color: u32, intensity: f32, position: [f32; 3]) -> Self {
        let kind = LightKind::Spot {
            angle: std::f32::consts::FRAC_PI_3,
            penumbra: 0.0,
        };
        Self::with_kind(kind, color, intensity, position.into())
    }

    fn with_kind(kind: LightKind, color: u32, intensity: f32, position: Point3<f32>) -> Self {
        Self {
            kind,
            color: Color::from_hex(color),
            intensity,
            position,
        }
    }

    /// Incoming light at `point`: unit direction towards the light and the
    /// scalar strength, or `None` for ambient lights and points outside a
    /// spot cone
    pub fn incidence(&self, point: &Point3<f32>) -> Option<(Vector3<f32>, f32)> {
        match self.kind {
            LightKind::Ambient => None,
            LightKind::Directional => {
                let to_light = self.position.coords.try_normalize(1e-9)?;
                Some((to_light, self.intensity))
            }
            LightKind::Point => {
                let to_light = (self.position - point).try_normalize(1e-9)?;
                Some((to_light, self.intensity))
            }
            LightKind::Spot { angle, penumbra } => {
                let to_light = (self.position - point).try_normalize(1e-9)?;
                let axis = (-self.position.coords).try_normalize(1e-9)?;
                let cos_theta = (-to_light).dot(&axis);
                let outer = angle.cos();
                if cos_theta < outer {
                    return None;
                }
                let inner = (angle * (1.0 - penumbra)).cos();
                let falloff = if inner > outer {
                    ((cos_theta - outer) / (inner - outer)).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                Some((to_light, self.intensity * falloff))
            }
        }
    }
}

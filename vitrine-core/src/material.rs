/// Surface materials
use crate::color::Color;

/// Blinn-Phong style material with an emissive term
#[derive(Debug, Clone, PartialEq)]
pub struct PhongMaterial {
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub shininess: f32,
    pub opacity: f32,
    pub transparent: bool,
}

impl PhongMaterial {
    pub fn new(color: u32) -> Self {
        Self {
            color: Color::from_hex(color),
            ..Self::default()
        }
    }

    /// Material glowing in its own color
    pub fn glowing(color: u32, intensity: f32) -> Self {
        Self::emitting(Color::from_hex(color), intensity)
    }

    pub fn emitting(color: Color, intensity: f32) -> Self {
        Self {
            color,
            emissive: color,
            emissive_intensity: intensity,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_emissive(mut self, emissive: u32, intensity: f32) -> Self {
        self.emissive = Color::from_hex(emissive);
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = opacity < 1.0;
        self
    }

    /// Opacity the backend should composite with
    pub fn effective_opacity(&self) -> f32 {
        if self.transparent {
            self.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
            shininess: 30.0,
            opacity: 1.0,
            transparent: false,
        }
    }
}

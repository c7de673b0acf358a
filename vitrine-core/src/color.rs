/// Linear RGB colors used by materials and lights
use serde::{Deserialize, Serialize};

/// RGB color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Build a color from hue, saturation and lightness, all in [0, 1]
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l);
        }

        let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let q = 2.0 * l - p;

        Self {
            r: hue_to_rgb(q, p, h + 1.0 / 3.0),
            g: hue_to_rgb(q, p, h),
            b: hue_to_rgb(q, p, h - 1.0 / 3.0),
        }
    }

    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Componentwise product, used to tint a surface by a light
    pub fn modulate(&self, other: &Color) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    pub fn scale(&self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn add(&self, other: &Color) -> Self {
        Self::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }

    pub fn clamped(&self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Perceived brightness in [0, 1]
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// CSS `rgba(...)` string for canvas fills
    pub fn to_css_rgba(&self, alpha: f32) -> String {
        let c = self.clamped();
        format!(
            "rgba({}, {}, {}, {:.3})",
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            alpha.clamp(0.0, 1.0)
        )
    }
}

fn hue_to_rgb(q: f32, p: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        q + (p - q) * 6.0 * t
    } else if t < 0.5 {
        p
    } else if t < 2.0 / 3.0 {
        q + (p - q) * 6.0 * (2.0 / 3.0 - t)
    } else {
        q
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_channels() {
        let color = Color::from_hex(0x00d4ff);
        assert_eq!(color.r, 0.0);
        assert!((color.g - 212.0 / 255.0).abs() < 1e-6);
        assert!((color.b - 1.0).abs() < 1e-6);
        assert_eq!(color.to_hex(), 0x00d4ff);
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Color::from_hsl(0.0, 1.0, 0.5).to_hex(), 0xff0000);
        assert_eq!(Color::from_hsl(1.0 / 3.0, 1.0, 0.5).to_hex(), 0x00ff00);
        assert_eq!(Color::from_hsl(2.0 / 3.0, 1.0, 0.5).to_hex(), 0x0000ff);
        assert_eq!(Color::from_hsl(0.3, 0.0, 0.5).to_hex(), 0x808080);
    }

    #[test]
    fn test_css_output() {
        assert_eq!(Color::from_hex(0xffd700).to_css_rgba(0.5), "rgba(255, 215, 0, 0.500)");
    }
}

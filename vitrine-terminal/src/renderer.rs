/// ASCII rasterizer drawing one view into a grid of terminal cells
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use vitrine_core::render::{screen_triangles, ScreenTriangle};
use vitrine_core::{Camera, Renderer, Scene};

/// Character luminosity ramp (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Option<(u8, u8, u8)>,
}

impl Cell {
    const EMPTY: Cell = Cell {
        character: ' ',
        color: None,
    };
}

/// Renderer backed by a character buffer and a depth buffer
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![Cell::EMPTY; size],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(Cell::EMPTY);
    }

    /// Character at a cell, for inspection
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].character)
    }

    /// Number of cells covered by geometry
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.color.is_some()).count()
    }

    fn rasterize_triangle(&mut self, triangle: &ScreenTriangle) {
        let [v0, v1, v2] = triangle.points;

        let brightness = (triangle.color.luminance() * triangle.alpha).clamp(0.0, 1.0);
        let ramp_index = ((brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize)
            .min(LUMINOSITY_RAMP.len() - 1);
        let cell = Cell {
            character: LUMINOSITY_RAMP[ramp_index],
            color: Some(to_rgb(&triangle.color.scale(triangle.alpha.max(0.35)))),
        };

        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), p) else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.cells[idx] = cell;
                }
            }
        }
    }

    /// Queue the buffer starting at terminal row `top`
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16, background: Color) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(background))?;
        for y in 0..self.height {
            writer.queue(MoveTo(0, top + y as u16))?;
            let row = &self.cells[y * self.width..(y + 1) * self.width];
            for cell in row {
                if let Some((r, g, b)) = cell.color {
                    writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                }
                writer.queue(Print(cell.character))?;
            }
        }
        Ok(())
    }
}

impl Renderer for AsciiRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        if (width as usize, height as usize) != (self.width, self.height) {
            *self = Self::new(width as usize, height as usize);
        }
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) {
        self.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        for triangle in screen_triangles(scene, camera, self.width as u32, self.height as u32) {
            self.rasterize_triangle(&triangle);
        }
    }
}

fn to_rgb(color: &vitrine_core::Color) -> (u8, u8, u8) {
    let hex = color.clamped().to_hex();
    ((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(v0: (f32, f32), v1: (f32, f32), v2: (f32, f32), p: (f32, f32)) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vitrine_core::light::Light;
    use vitrine_core::material::PhongMaterial;
    use vitrine_core::{Mesh, Transform};

    fn lit_cube() -> Scene {
        let mut scene = Scene::new();
        scene.add_light(Light::ambient(0x404040, 0.6));
        scene.add_light(Light::directional(0xffffff, 1.0, [0.0, 0.0, 1.0]));
        scene.add_mesh(
            "cube",
            None,
            Arc::new(Mesh::cube(2.0)),
            PhongMaterial::new(0x00d4ff),
            Transform::identity(),
        );
        scene
    }

    #[test]
    fn test_barycentric_center() {
        let (w0, w1, w2) = barycentric((0.0, 0.0), (3.0, 0.0), (0.0, 3.0), (1.0, 1.0)).unwrap();
        assert!((w0 - 1.0 / 3.0).abs() < 1e-5);
        assert!((w1 - 1.0 / 3.0).abs() < 1e-5);
        assert!((w2 - 1.0 / 3.0).abs() < 1e-5);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 0.0)).is_none());
    }

    #[test]
    fn test_cube_fills_center() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let camera = Camera::at_distance(40, 20, 5.0);
        renderer.render(&lit_cube(), &camera);

        assert!(renderer.filled_cells() > 0);
        assert_ne!(renderer.char_at(20, 10), Some(' '));
        assert_eq!(renderer.char_at(0, 0), Some(' '));
        assert_eq!(renderer.char_at(40, 0), None);
    }

    #[test]
    fn test_set_size_reallocates() {
        let mut renderer = AsciiRenderer::new(10, 10);
        renderer.set_size(30, 12);
        assert_eq!(renderer.size(), (30, 12));

        renderer.set_size(0, 0);
        renderer.render(&lit_cube(), &Camera::default());
        assert_eq!(renderer.filled_cells(), 0);
    }

    #[test]
    fn test_draw_emits_every_row() {
        let mut renderer = AsciiRenderer::new(8, 3);
        renderer.render(&lit_cube(), &Camera::at_distance(8, 3, 5.0));
        let mut out = Vec::new();
        renderer.draw(&mut out, 1, Color::Black).unwrap();
        assert!(!out.is_empty());
    }
}

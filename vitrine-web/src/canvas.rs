/// Canvas 2D renderer filling projected triangles
use tracing::warn;
use vitrine_core::render::screen_triangles;
use vitrine_core::{Camera, Renderer, Scene};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

struct Surface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

/// Transparent canvas appended to a mount element
pub struct CanvasRenderer {
    /// `None` when the canvas could not be created; rendering is then skipped
    surface: Option<Surface>,
    width: u32,
    height: u32,
    pixel_ratio: f64,
}

impl CanvasRenderer {
    /// Append a canvas to `mount`, logging and degrading to a no-op on failure
    pub fn attach(document: &Document, mount: &Element) -> Self {
        let surface = match create_surface(document, mount) {
            Ok(surface) => Some(surface),
            Err(err) => {
                warn!(mount = %mount.id(), error = ?err, "Failed to create canvas");
                None
            }
        };
        Self {
            surface,
            width: 0,
            height: 0,
            pixel_ratio: 1.0,
        }
    }

    fn resize_backing_store(&self) {
        let Some(surface) = &self.surface else {
            return;
        };
        let canvas = &surface.canvas;
        canvas.set_width((f64::from(self.width) * self.pixel_ratio).round() as u32);
        canvas.set_height((f64::from(self.height) * self.pixel_ratio).round() as u32);
        let style = canvas.style();
        style.set_property("width", &format!("{}px", self.width)).ok();
        style.set_property("height", &format!("{}px", self.height)).ok();
    }
}

fn create_surface(document: &Document, mount: &Element) -> Result<Surface, JsValue> {
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or("Canvas 2D not supported")?
        .dyn_into()?;
    mount.append_child(&canvas)?;
    Ok(Surface { canvas, context })
}

impl Renderer for CanvasRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.resize_backing_store();
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
        self.resize_backing_store();
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) {
        let Some(surface) = &self.surface else {
            return;
        };
        let ctx = &surface.context;
        let (width, height) = (f64::from(self.width), f64::from(self.height));

        let ratio = self.pixel_ratio;
        ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0).ok();
        ctx.clear_rect(0.0, 0.0, width, height);
        if self.width == 0 || self.height == 0 {
            return;
        }

        for triangle in screen_triangles(scene, camera, self.width, self.height) {
            let [a, b, c] = triangle.points;
            ctx.set_fill_style_str(&triangle.color.to_css_rgba(triangle.alpha));
            ctx.begin_path();
            ctx.move_to(f64::from(a.0), f64::from(a.1));
            ctx.line_to(f64::from(b.0), f64::from(b.1));
            ctx.line_to(f64::from(c.0), f64::from(c.1));
            ctx.close_path();
            ctx.fill();
        }
    }

    fn detach(&mut self) {
        if let Some(surface) = self.surface.take() {
            surface.canvas.remove();
        }
    }
}

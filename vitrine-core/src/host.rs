/// Seams to the environment that displays the views
///
/// A host (browser page, terminal) supplies mount points, renderers and the
/// page body. The core only calls these surfaces and never reaches past them.

use crate::projection::Camera;
use crate::scene::Scene;

/// Surface a view is attached to
pub trait Mount {
    /// Current size in CSS pixels (or cells)
    fn size(&self) -> (u32, u32);
}

/// Draws a scene onto its own surface
pub trait Renderer {
    fn set_size(&mut self, width: u32, height: u32);

    fn set_pixel_ratio(&mut self, _ratio: f64) {}

    fn render(&mut self, scene: &Scene, camera: &Camera);

    /// Release the surface once the stage stops
    fn detach(&mut self) {}
}

pub trait Host {
    type Mount: Mount;
    type Renderer: Renderer;

    /// Look up a mount point by id; `None` when the page lacks it
    fn find_mount(&self, id: &str) -> Option<Self::Mount>;

    /// Create a renderer whose output is attached to `mount`
    fn create_renderer(&mut self, mount: &Self::Mount) -> Self::Renderer;

    /// Size of the whole viewport
    fn viewport_size(&self) -> (u32, u32);

    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }
}

/// Page body styled by the theme switch
pub trait ThemeTarget {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    fn set_background(&mut self, value: &str);
    fn set_color(&mut self, value: &str);
}

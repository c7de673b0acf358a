/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Vertical field of view shared by every showcase camera, in degrees
pub const DEFAULT_FOV_DEGREES: f32 = 75.0;

/// Perspective camera looking at a fixed target
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: DEFAULT_FOV_DEGREES.to_radians(),
            aspect: aspect_ratio(width, height).unwrap_or(1.0),
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Camera on the +z axis looking at the origin
    pub fn at_distance(width: u32, height: u32, distance: f32) -> Self {
        let mut camera = Self::new(width, height);
        camera.position = Point3::new(0.0, 0.0, distance);
        camera
    }

    /// Recompute the aspect ratio for a new surface size.
    /// A zero-sized surface keeps the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if let Some(aspect) = aspect_ratio(width, height) {
            self.aspect = aspect;
        }
    }

    /// Place the eye at `(x, y)` in the camera plane, keeping the view direction
    pub fn set_lateral_offset(&mut self, dx: f32, dy: f32) {
        let direction = self.target - self.position;
        self.position.x = dx;
        self.position.y = dy;
        self.target = self.position + direction;
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Project a point through a model-view-projection matrix to screen space.
///
/// Returns `(x, y, depth)` with depth in normalized device units, or `None`
/// when the point is behind the eye or outside the near/far range.
pub fn project_with(
    mvp: &Matrix4<f32>,
    point: &Point3<f32>,
    width: u32,
    height: u32,
) -> Option<(f32, f32, f32)> {
    let clip = mvp * point.to_homogeneous();

    // Behind the eye or degenerate
    if clip.w <= 1e-6 {
        return None;
    }

    let ndc = clip.xyz() / clip.w;
    if ndc.z < -1.0 || ndc.z > 1.0 {
        return None;
    }

    // Convert to screen space
    let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

    Some((screen_x, screen_y, ndc.z))
}

fn aspect_ratio(width: u32, height: u32) -> Option<f32> {
    (width > 0 && height > 0).then(|| width as f32 / height as f32)
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((camera.fov - 75.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_viewport_keeps_aspect_for_empty_surface() {
        let mut camera = Camera::new(800, 600);
        camera.set_viewport(1920, 1080);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        camera.set_viewport(1920, 0);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::at_distance(200, 100, 5.0);
        let view_projection = camera.view_projection();
        let (x, y, depth) = project_with(&view_projection, &Point3::origin(), 200, 100).unwrap();
        assert!((x - 100.0).abs() < 1e-3);
        assert!((y - 50.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);

        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(project_with(&view_projection, &behind, 200, 100).is_none());
    }

    #[test]
    fn test_offset_keeps_direction() {
        let mut camera = Camera::at_distance(100, 100, 5.0);
        camera.set_lateral_offset(0.5, -0.25);
        assert!((camera.position - Point3::new(0.5, -0.25, 5.0)).norm() < 1e-6);
        assert!((camera.target - Point3::new(0.5, -0.25, 0.0)).norm() < 1e-6);
    }
}

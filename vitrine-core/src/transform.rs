/// Node transforms: position, Euler rotation and scale
use nalgebra::{Matrix4, Vector3};

/// Rotation state around three axes (in radians), applied X then Y then Z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Local transform of a scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: RotationState,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: RotationState::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ..Self::identity()
        }
    }

    pub fn with_rotation(mut self, rotation: RotationState) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn set_uniform_scale(&mut self, factor: f32) {
        self.scale = Vector3::new(factor, factor, factor);
    }

    /// Local matrix: translation * rotation * scale
    pub fn matrix(&self) -> Matrix4<f32> {
        Self::translation_matrix(self.position.x, self.position.y, self.position.z)
            * Self::rotation_matrix(&self.rotation)
            * Self::scale_matrix(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.scale.iter().all(|v| v.is_finite())
            && self.rotation.is_finite()
    }

    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        // Intrinsic XYZ order: the Z rotation touches the vertex first
        rx * ry * rz
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_rotation_state() {
        assert_eq!(RotationState::default(), RotationState::new(0.0, 0.0, 0.0));
        assert!(RotationState::new(0.1, 0.2, 0.3).is_finite());
        assert!(!RotationState::new(f32::NAN, 0.0, 0.0).is_finite());
    }

    #[test]
    fn test_identity_transform() {
        let matrix = Transform::identity().matrix();
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_scale_then_rotate_then_translate() {
        let mut transform = Transform::from_position(1.0, 2.0, 3.0)
            .with_rotation(RotationState::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        transform.set_uniform_scale(2.0);

        // +x scaled to 2, yawed onto -z, then offset
        let moved = transform.matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((moved - Point3::new(1.0, 2.0, 1.0)).norm() < 1e-5);
    }
}

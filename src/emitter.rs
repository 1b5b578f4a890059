//! The transform a trail is attached to.
//!
//! The host moves the emitter every tick. The trail reads its lateral axis
//! when capturing points, turns it to face the direction of travel, and
//! expresses the generated mesh in its local frame.
//!
//! Rotation is stored as Euler angles applied in YXZ order (yaw, pitch,
//! roll), so turning the emitter only touches [`Emitter::rotation`]'s `y`.

use glam::{Affine3A, EulerRot, Quat, Vec3};

/// World-space transform of the object leaving the trail.
///
/// # Example
///
/// ```ignore
/// let mut emitter = Emitter::at(Vec3::new(0.0, 1.0, 0.0));
/// emitter.face_direction(Vec3::X);
/// let lateral = emitter.basis_x(); // perpendicular to travel
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emitter {
    /// World position.
    pub position: Vec3,
    /// Euler angles in radians (`x` pitch, `y` yaw, `z` roll).
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Emitter {
    /// Unrotated, unscaled emitter at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder-style rotation override.
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder-style scale override.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Orientation as a quaternion.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.rotation.y, self.rotation.x, self.rotation.z)
    }

    /// Local-to-world transform.
    pub fn transform(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.orientation(), self.position)
    }

    /// The transform's X axis in world space, including scale.
    pub fn basis_x(&self) -> Vec3 {
        Vec3::from(self.transform().matrix3.x_axis)
    }

    /// Convert a world-space point into this emitter's local frame.
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.transform().inverse().transform_point3(point)
    }

    /// Current yaw in radians.
    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.rotation.y = yaw;
    }

    /// Turn so the local +Z axis points along `direction` in the XZ plane.
    ///
    /// Pitch and roll are left alone. A zero direction leaves the yaw
    /// unchanged.
    pub fn face_direction(&mut self, direction: Vec3) {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return;
        }
        self.set_yaw(direction.x.atan2(direction.z));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_basis() {
        let emitter = Emitter::default();
        assert!(approx(emitter.basis_x(), Vec3::X));
    }

    #[test]
    fn test_face_direction_sets_yaw() {
        let mut emitter = Emitter::default();
        emitter.face_direction(Vec3::new(1.0, 0.0, 0.0));
        assert!((emitter.yaw() - FRAC_PI_2).abs() < 1e-6);

        // Travelling along +X, the lateral axis swings to -Z.
        assert!(approx(emitter.basis_x(), Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_face_zero_direction_is_noop() {
        let mut emitter = Emitter::default().with_rotation(Vec3::new(0.0, 0.4, 0.0));
        emitter.face_direction(Vec3::ZERO);
        assert_eq!(emitter.yaw(), 0.4);
    }

    #[test]
    fn test_basis_includes_scale() {
        let emitter = Emitter::default().with_scale(Vec3::new(2.0, 1.0, 1.0));
        assert!(approx(emitter.basis_x(), Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_to_local_inverts_transform() {
        let emitter = Emitter::at(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Vec3::new(0.2, 1.1, -0.3))
            .with_scale(Vec3::splat(1.5));
        let world = Vec3::new(-4.0, 0.5, 7.0);
        let local = emitter.to_local(world);
        assert!(approx(emitter.transform().transform_point3(local), world));
        assert!(approx(emitter.to_local(emitter.position), Vec3::ZERO));
    }
}

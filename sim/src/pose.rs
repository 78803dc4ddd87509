//! Plain geometry types shared by the physics side and the presentation side.
//!
//! Conventions
//! - Units are meters.
//! - Rotation is a unit quaternion; the backend keeps it normalized.
//! - Box dimensions are *full* extents. Colliders are built from the half extents.

use nalgebra as na;

use crate::error::SimError;

/// World-space position and orientation of a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub translation: na::Vector3<f32>,
    pub rotation: na::UnitQuaternion<f32>,
}

impl Pose {
    pub fn new(translation: na::Vector3<f32>, rotation: na::UnitQuaternion<f32>) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Pose at `translation` with identity orientation.
    pub fn from_translation(translation: na::Vector3<f32>) -> Self {
        Self::new(translation, na::UnitQuaternion::identity())
    }

    pub fn identity() -> Self {
        Self::from_translation(na::Vector3::zeros())
    }

    pub fn to_isometry(&self) -> na::Isometry3<f32> {
        na::Isometry3::from_parts(na::Translation3::from(self.translation), self.rotation)
    }

    pub fn from_isometry(iso: &na::Isometry3<f32>) -> Self {
        Self::new(iso.translation.vector, iso.rotation)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Dimensions of a box, used for both the collider and the visual mesh so the two
/// always describe the same volume.
///
/// Every dimension is finite and strictly positive; [`BoxSpec::new`] enforces it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSpec {
    width: f32,
    height: f32,
    depth: f32,
}

impl BoxSpec {
    pub fn new(width: f32, height: f32, depth: f32) -> Result<Self, SimError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !(valid(width) && valid(height) && valid(depth)) {
            return Err(SimError::InvalidBoxSpec {
                width,
                height,
                depth,
            });
        }

        Ok(Self {
            width,
            height,
            depth,
        })
    }

    pub fn from_array(dims: [f32; 3]) -> Result<Self, SimError> {
        Self::new(dims[0], dims[1], dims[2])
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn half_extents(&self) -> na::Vector3<f32> {
        na::Vector3::new(self.width, self.height, self.depth) * 0.5
    }

    /// Principal moments of inertia of a solid box of this size and `mass`.
    ///
    /// Zero for `mass <= 0`: static bodies have no rotational response.
    pub fn principal_inertia(&self, mass: f32) -> na::Vector3<f32> {
        if mass <= 0.0 {
            return na::Vector3::zeros();
        }

        let (w2, h2, d2) = (
            self.width * self.width,
            self.height * self.height,
            self.depth * self.depth,
        );
        na::Vector3::new(h2 + d2, w2 + d2, w2 + h2) * (mass / 12.0)
    }
}

/// Contact material of a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Bounciness, nominally in `[0, 1]`.
    pub restitution: f32,
    pub friction: f32,
    /// Resistance to rolling; applied as angular damping.
    pub rolling_friction: f32,
}

impl Default for Material {
    /// Backend defaults for a freshly created body.
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.5,
            rolling_friction: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_spec_rejects_non_positive_and_non_finite_dimensions() {
        assert!(BoxSpec::new(1.0, 2.0, 3.0).is_ok());
        assert!(BoxSpec::new(0.0, 2.0, 3.0).is_err());
        assert!(BoxSpec::new(1.0, -2.0, 3.0).is_err());
        assert!(BoxSpec::new(1.0, 2.0, f32::NAN).is_err());
        assert!(BoxSpec::new(f32::INFINITY, 2.0, 3.0).is_err());
    }

    #[test]
    fn half_extents_are_half_of_each_dimension() {
        let spec = BoxSpec::new(5.0, 3.0, 10.0).unwrap();
        assert_eq!(spec.half_extents(), na::Vector3::new(2.5, 1.5, 5.0));
    }

    #[test]
    fn inertia_is_zero_for_static_mass() {
        let spec = BoxSpec::new(5.0, 3.0, 10.0).unwrap();
        assert_eq!(spec.principal_inertia(0.0), na::Vector3::zeros());
    }

    #[test]
    fn inertia_of_unit_cube() {
        // Solid cube: I = m * s^2 / 6 about each axis.
        let spec = BoxSpec::new(1.0, 1.0, 1.0).unwrap();
        let inertia = spec.principal_inertia(6.0);
        for i in 0..3 {
            assert!((inertia[i] - 1.0).abs() < 1.0e-6);
        }
    }

    #[test]
    fn isometry_round_trip_keeps_pose() {
        let pose = Pose::new(
            na::Vector3::new(1.0, 2.0, 3.0),
            na::UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3),
        );
        let back = Pose::from_isometry(&pose.to_isometry());
        assert_eq!(back, pose);
    }
}

//! Conversions between the simulation's nalgebra poses and bevy transforms.

use bevy::prelude::*;
use sim::{BoxSpec, Pose};

/// Render transform for a physics pose. Scale is always one: meshes are built at full size.
pub fn pose_to_transform(pose: &Pose) -> Transform {
    let t = &pose.translation;
    let q = pose.rotation.quaternion();
    Transform {
        translation: Vec3::new(t.x, t.y, t.z),
        rotation: Quat::from_xyzw(q.i, q.j, q.k, q.w),
        scale: Vec3::ONE,
    }
}

/// Overwrite translation and rotation in place, leaving scale untouched.
pub fn write_pose(transform: &mut Transform, pose: &Pose) {
    let converted = pose_to_transform(pose);
    transform.translation = converted.translation;
    transform.rotation = converted.rotation;
}

/// Mesh primitive with the same extents as the collider built from `spec`.
pub fn box_primitive(spec: &BoxSpec) -> Cuboid {
    Cuboid::new(spec.width(), spec.height(), spec.depth())
}

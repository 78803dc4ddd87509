//! Box-shaped rigid bodies registered with a [`PhysicsWorld`].

use rapier3d::prelude::*;

use nalgebra as na;

use crate::error::SimError;
use crate::physics::PhysicsWorld;
use crate::pose::{BoxSpec, Material, Pose};

/// One box body in the physics world plus the parameters it was built from.
///
/// The handle does not borrow the world; every call that touches backend state takes
/// the world explicitly. Dropping a handle leaks the backend body: call
/// [`BodyHandle::release`] to remove it.
#[derive(Debug)]
pub struct BodyHandle {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    mass: f32,
    initial_pose: Pose,
    box_spec: BoxSpec,
    material: Material,
}

impl BodyHandle {
    /// Build a box collider from `box_spec`, attach it to a new body at `pose` and
    /// register both with `world`.
    ///
    /// `mass == 0` creates a fixed body that never moves; `mass > 0` a dynamic body
    /// whose inertia Rapier derives from the mass and the box shape.
    pub fn create(
        world: &mut PhysicsWorld,
        mass: f32,
        pose: Pose,
        box_spec: BoxSpec,
    ) -> Result<Self, SimError> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(SimError::InvalidMass(mass));
        }

        let builder = if mass > 0.0 {
            // Bricks hit the ground at ~200 m/s; without CCD they tunnel through the slab.
            RigidBodyBuilder::dynamic().ccd_enabled(true)
        } else {
            RigidBodyBuilder::fixed()
        };
        let rb = builder.pose(pose.to_isometry()).build();

        let material = Material::default();
        let he = box_spec.half_extents();
        let collider = ColliderBuilder::cuboid(he.x, he.y, he.z)
            .mass(mass)
            .restitution(material.restitution)
            .friction(material.friction)
            // Contact coefficients are the product of both sides.
            .restitution_combine_rule(CoefficientCombineRule::Multiply)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .build();

        let (body, collider) = world.insert(rb, collider);

        Ok(Self {
            body,
            collider,
            mass,
            initial_pose: pose,
            box_spec,
            material,
        })
    }

    pub fn set_restitution(&mut self, world: &mut PhysicsWorld, value: f32) -> Result<(), SimError> {
        self.collider_mut(world)?.set_restitution(value);
        self.material.restitution = value;
        Ok(())
    }

    pub fn set_friction(&mut self, world: &mut PhysicsWorld, value: f32) -> Result<(), SimError> {
        self.collider_mut(world)?.set_friction(value);
        self.material.friction = value;
        Ok(())
    }

    /// Rapier has no rolling-friction term, so this damps angular velocity instead.
    pub fn set_rolling_friction(
        &mut self,
        world: &mut PhysicsWorld,
        value: f32,
    ) -> Result<(), SimError> {
        world
            .bodies
            .get_mut(self.body)
            .ok_or(SimError::MissingBody)?
            .set_angular_damping(value);
        self.material.rolling_friction = value;
        Ok(())
    }

    /// Apply every coefficient of `material`.
    pub fn set_material(&mut self, world: &mut PhysicsWorld, material: Material) -> Result<(), SimError> {
        self.set_restitution(world, material.restitution)?;
        self.set_friction(world, material.friction)?;
        self.set_rolling_friction(world, material.rolling_friction)
    }

    /// Current world transform as reported by the backend.
    pub fn pose(&self, world: &PhysicsWorld) -> Option<Pose> {
        let rb = world.bodies.get(self.body)?;
        Some(Pose::new(*rb.translation(), *rb.rotation()))
    }

    /// Remove the body and its collider from the backend.
    pub fn release(self, world: &mut PhysicsWorld) -> Result<(), SimError> {
        if world.remove(self.body) {
            Ok(())
        } else {
            Err(SimError::MissingBody)
        }
    }

    pub fn is_static(&self) -> bool {
        self.mass == 0.0
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Principal moments of inertia in body space, as computed by the backend.
    /// Zero for static bodies.
    pub fn local_inertia(&self, world: &PhysicsWorld) -> Option<na::Vector3<f32>> {
        let rb = world.bodies.get(self.body)?;
        Some(rb.mass_properties().local_mprops.principal_inertia())
    }

    pub fn initial_pose(&self) -> Pose {
        self.initial_pose
    }

    pub fn box_spec(&self) -> BoxSpec {
        self.box_spec
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn rapier_handle(&self) -> RigidBodyHandle {
        self.body
    }

    fn collider_mut<'a>(&self, world: &'a mut PhysicsWorld) -> Result<&'a mut Collider, SimError> {
        world
            .colliders
            .get_mut(self.collider)
            .ok_or(SimError::MissingBody)
    }
}

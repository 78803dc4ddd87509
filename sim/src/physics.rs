//! Rapier-backed dynamics world.
//!
//! This module owns every Rapier structure needed to simulate the scene and hides
//! the long `PhysicsPipeline::step` argument list behind [`PhysicsWorld::step`].
//!
//! Stepping
//! - The world always integrates with a fixed time step (`fixed_dt`).
//! - Frame time is accumulated; each call runs as many whole fixed steps as fit,
//!   capped at `max_substeps`. Time beyond the cap is discarded so a long stall
//!   cannot snowball into ever longer frames.
//! - A zero, negative or NaN `dt` is a no-op.

use rapier3d::prelude::*;

use crate::config::SimConfig;

/// Fraction of a step below which accumulated time counts as a whole step.
/// Absorbs rounding when `dt` is an exact multiple of `fixed_dt`.
const STEP_TOLERANCE: f64 = 1.0e-4;

/// Sub-stepping policy for [`PhysicsWorld::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepPolicy {
    /// Size of one integration step (seconds).
    pub fixed_dt: f32,
    /// Upper bound on integration steps per call.
    pub max_substeps: u32,
}

impl StepPolicy {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            fixed_dt: config.fixed_time_step,
            max_substeps: config.max_substeps,
        }
    }
}

/// In-memory Rapier structures for a simulated scene.
///
/// `bodies` and `colliders` are public so handles can reach their own entries;
/// everything else only matters to the pipeline.
pub struct PhysicsWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    policy: StepPolicy,
    /// Frame time not yet consumed by a fixed step.
    accumulator: f64,
}

impl PhysicsWorld {
    pub fn new(gravity: Vector<Real>, policy: StepPolicy) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: policy.fixed_dt,
            ..IntegrationParameters::default()
        };

        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            gravity,
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            policy,
            accumulator: 0.0,
        }
    }

    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    pub fn policy(&self) -> StepPolicy {
        self.policy
    }

    /// Advance the simulation by `dt` seconds of frame time.
    ///
    /// Returns the number of fixed steps actually integrated.
    pub fn step(&mut self, dt: f32) -> u32 {
        // Also rejects NaN.
        if !(dt > 0.0) {
            return 0;
        }

        let fixed_dt = f64::from(self.policy.fixed_dt);
        self.accumulator += f64::from(dt);
        let whole = (self.accumulator / fixed_dt + STEP_TOLERANCE).floor();
        self.accumulator = (self.accumulator - whole * fixed_dt).max(0.0);

        let steps = (whole as u32).min(self.policy.max_substeps);
        for _ in 0..steps {
            self.step_fixed();
        }

        if steps > 0 {
            log::trace!("physics advanced {steps} step(s) for dt={dt:.4}");
        }
        steps
    }

    /// Integrate exactly one fixed step.
    pub fn step_fixed(&mut self) {
        // Using default hooks/events (none).
        let hooks = ();
        let events = ();

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &hooks,
            &events,
        );
    }

    /// Insert a body together with its (single) collider.
    pub fn insert(&mut self, body: RigidBody, collider: Collider) -> (RigidBodyHandle, ColliderHandle) {
        let rb_handle = self.bodies.insert(body);
        let co_handle = self
            .colliders
            .insert_with_parent(collider, rb_handle, &mut self.bodies);
        (rb_handle, co_handle)
    }

    /// Remove a body and every collider/joint attached to it.
    ///
    /// Returns `false` if the body was already gone.
    pub fn remove(&mut self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(
            vector![0.0, -100.0, 0.0],
            StepPolicy {
                fixed_dt: 1.0 / 60.0,
                max_substeps: 10,
            },
        )
    }

    #[test]
    fn zero_or_invalid_dt_takes_no_steps() {
        let mut w = world();
        assert_eq!(w.step(0.0), 0);
        assert_eq!(w.step(-1.0), 0);
        assert_eq!(w.step(f32::NAN), 0);
    }

    #[test]
    fn remainder_carries_over_to_the_next_call() {
        let mut w = world();
        // Two thirds of a step twice: first call steps 0 times, second call once.
        let part = (1.0 / 60.0) * (2.0 / 3.0);
        assert_eq!(w.step(part), 0);
        assert_eq!(w.step(part), 1);
    }

    #[test]
    fn large_dt_is_capped_at_max_substeps() {
        let mut w = world();
        assert_eq!(w.step(5.0), 10);
        // The excess was dropped, not queued.
        assert_eq!(w.step(1.0 / 60.0 * 0.5), 0);
    }

    #[test]
    fn exact_multiples_of_the_step_leave_nothing_pending() {
        let mut w = world();
        let fixed = 1.0 / 60.0;
        assert_eq!(w.step(3.0 * fixed), 3);
        assert_eq!(w.step(0.5 * fixed), 0);

        let mut w = world();
        assert_eq!(w.step(0.5), 10);
        assert_eq!(w.step(0.5 * fixed), 0);
    }

    #[test]
    fn steady_refresh_takes_one_step_per_frame() {
        let mut w = world();
        for _ in 0..600 {
            assert_eq!(w.step(1.0 / 60.0), 1);
        }
    }

    #[test]
    fn remove_reports_missing_bodies() {
        let mut w = world();
        let (rb, _) = w.insert(
            RigidBodyBuilder::dynamic().build(),
            ColliderBuilder::ball(1.0).build(),
        );
        assert_eq!(w.body_count(), 1);
        assert!(w.remove(rb));
        assert!(!w.remove(rb));
        assert_eq!(w.body_count(), 0);
        assert_eq!(w.colliders.len(), 0);
    }
}

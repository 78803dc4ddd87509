//! The running scene: ground, dropped bricks, the spawn countdown and the per-frame
//! spawn -> step -> sync cycle.
//!
//! A `SimulationWorld` is an ordinary owned value. The host (the bevy client, or a test)
//! keeps it and calls [`SimulationWorld::frame`] once per display refresh with the
//! refresh timestamp, passing whatever [`Presenter`] drives its renderer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use nalgebra as na;

use crate::body::BodyHandle;
use crate::clock::FrameClock;
use crate::config::SimConfig;
use crate::entity::Entity;
use crate::error::SimError;
use crate::physics::{PhysicsWorld, StepPolicy};
use crate::pose::{BoxSpec, Pose};
use crate::presenter::{Presenter, VisualStyle};
use crate::scheduler::SpawnScheduler;

/// What happened during one [`SimulationWorld::frame`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Elapsed time fed to the scheduler and the physics world.
    pub dt: f32,
    /// A brick was dropped this frame.
    pub spawned: bool,
    /// Fixed physics steps integrated.
    pub substeps: u32,
    /// Bricks released for falling below the kill plane.
    pub released: usize,
}

pub struct SimulationWorld<V> {
    config: SimConfig,
    physics: PhysicsWorld,
    ground: BodyHandle,
    ground_visual: V,
    entities: Vec<Entity<V>>,
    scheduler: SpawnScheduler,
    clock: FrameClock,
    brick_box: BoxSpec,
    rng: StdRng,
}

impl<V> SimulationWorld<V> {
    /// Build the physics world and the ground, and create the ground's visual.
    ///
    /// Any error leaves nothing behind worth keeping; callers should abort.
    pub fn initialize<P>(config: SimConfig, presenter: &mut P) -> Result<Self, SimError>
    where
        P: Presenter<Visual = V>,
    {
        let ground_box = config.ground_box()?;
        let brick_box = config.brick_box()?;

        let mut physics = PhysicsWorld::new(config.gravity, StepPolicy::from_config(&config));

        let ground_pose = Pose::identity();
        let mut ground = BodyHandle::create(&mut physics, 0.0, ground_pose, ground_box)?;
        ground.set_restitution(&mut physics, config.ground_restitution)?;
        let ground_visual = presenter.create_box(&ground_box, &ground_pose, VisualStyle::Ground);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let scheduler = SpawnScheduler::new(
            config.initial_countdown,
            config.spawn_interval,
            config.spawn_limit,
        );

        log::info!(
            "simulation initialized: gravity={:?}, {} brick(s) every {}s after {}s",
            config.gravity.as_slice(),
            config.spawn_limit,
            config.spawn_interval,
            config.initial_countdown
        );

        Ok(Self {
            config,
            physics,
            ground,
            ground_visual,
            entities: Vec::new(),
            scheduler,
            clock: FrameClock::new(),
            brick_box,
            rng,
        })
    }

    /// Run one frame at display timestamp `now` (seconds).
    ///
    /// Order: spawn decision, physics step, retention, physics -> visual sync. A brick
    /// spawned this frame is integrated by this frame's step before it is first synced.
    pub fn frame<P>(&mut self, now: f64, presenter: &mut P) -> FrameReport
    where
        P: Presenter<Visual = V>,
    {
        let dt = self.clock.tick(now);
        let mut report = FrameReport {
            dt,
            ..FrameReport::default()
        };

        if let Some(event) = self.scheduler.advance(dt) {
            match self.spawn(presenter) {
                Ok(()) => report.spawned = true,
                Err(err) => log::error!("failed to spawn brick #{}: {err}", event.ordinal),
            }
        }

        report.substeps = self.physics.step(dt);

        if let Some(kill_y) = self.config.kill_plane_y {
            report.released = self.despawn_below(kill_y, presenter);
        }

        self.sync_visuals(presenter);
        report
    }

    /// Drop one brick at a random XZ position inside the spawn band.
    pub fn spawn<P>(&mut self, presenter: &mut P) -> Result<(), SimError>
    where
        P: Presenter<Visual = V>,
    {
        let half_band = self.config.spawn_band * 0.5;
        let (x, z) = if half_band > 0.0 {
            (
                self.rng.gen_range(-half_band..half_band),
                self.rng.gen_range(-half_band..half_band),
            )
        } else {
            (0.0, 0.0)
        };
        let pose = Pose::from_translation(na::Vector3::new(x, self.config.drop_height, z));

        let mut body =
            BodyHandle::create(&mut self.physics, self.config.brick_mass, pose, self.brick_box)?;
        if let Err(err) = body.set_material(&mut self.physics, self.config.brick_material) {
            // Do not leave a half-configured body in the world.
            if let Err(release_err) = body.release(&mut self.physics) {
                log::error!("failed to release half-built brick: {release_err}");
            }
            return Err(err);
        }

        let visual = presenter.create_box(&self.brick_box, &pose, VisualStyle::Brick);
        self.entities.push(Entity::new(body, visual));

        log::info!(
            "spawned brick #{} at ({x:.2}, {:.2}, {z:.2})",
            self.entities.len(),
            self.config.drop_height
        );
        Ok(())
    }

    /// Copy every brick's physics pose into its visual. The ground never moves and is
    /// left alone.
    pub fn sync_visuals<P>(&self, presenter: &mut P)
    where
        P: Presenter<Visual = V>,
    {
        for entity in &self.entities {
            if entity.sync(&self.physics, presenter).is_none() {
                log::error!("brick body missing from physics world during sync");
            }
        }
    }

    /// Release every brick whose center fell below `y`, removing its visual.
    ///
    /// Remaining bricks keep their relative order.
    pub fn despawn_below<P>(&mut self, y: f32, presenter: &mut P) -> usize
    where
        P: Presenter<Visual = V>,
    {
        let physics = &self.physics;
        let (fallen, kept): (Vec<_>, Vec<_>) = self.entities.drain(..).partition(|e| {
            e.body
                .pose(physics)
                .is_some_and(|pose| pose.translation.y < y)
        });
        self.entities = kept;

        let released = fallen.len();
        for entity in fallen {
            if let Err(err) = entity.body.release(&mut self.physics) {
                log::error!("failed to release fallen brick: {err}");
            }
            presenter.remove(entity.visual);
        }

        if released > 0 {
            log::info!("released {released} brick(s) below y={y}");
        }
        released
    }

    pub fn entities(&self) -> &[Entity<V>] {
        &self.entities
    }

    pub fn ground(&self) -> &BodyHandle {
        &self.ground
    }

    pub fn ground_visual(&self) -> &V {
        &self.ground_visual
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::RecordingPresenter;

    fn seeded() -> SimConfig {
        SimConfig {
            seed: Some(7),
            ..SimConfig::default()
        }
    }

    fn world(presenter: &mut RecordingPresenter) -> SimulationWorld<usize> {
        SimulationWorld::initialize(seeded(), presenter).unwrap()
    }

    /// Drive frames at 60 Hz from `start` for `frames` frames.
    fn run(
        world: &mut SimulationWorld<usize>,
        presenter: &mut RecordingPresenter,
        start: f64,
        frames: u32,
    ) -> f64 {
        let mut t = start;
        for _ in 0..frames {
            t += 1.0 / 60.0;
            world.frame(t, presenter);
        }
        t
    }

    #[test]
    fn initialize_creates_static_ground_and_its_visual() {
        let mut presenter = RecordingPresenter::new();
        let world = world(&mut presenter);

        assert!(world.ground().is_static());
        assert_eq!(world.physics().body_count(), 1);
        assert_eq!(world.ground().material().restitution, 0.99);
        assert_eq!(presenter.visuals.len(), 1);
        assert_eq!(presenter.get(0).style, VisualStyle::Ground);
        assert_eq!(presenter.get(0).spec, world.ground().box_spec());
    }

    #[test]
    fn invalid_config_fails_setup() {
        let mut presenter = RecordingPresenter::new();
        let config = SimConfig {
            ground_dimensions: [200.0, -1.0, 200.0],
            ..seeded()
        };
        let result = SimulationWorld::initialize(config, &mut presenter);
        assert!(matches!(result, Err(SimError::InvalidBoxSpec { .. })));
        assert!(presenter.visuals.is_empty());
    }

    #[test]
    fn first_frame_only_sets_the_baseline() {
        let mut presenter = RecordingPresenter::new();
        let mut world = world(&mut presenter);
        assert_eq!(world.clock().previous(), None);

        let report = world.frame(3.0, &mut presenter);

        assert_eq!(report, FrameReport::default());
        assert!(world.entities().is_empty());
        assert_eq!(world.clock().previous(), Some(3.0));
        assert_eq!(world.ground().pose(world.physics()), Some(Pose::identity()));
    }

    #[test]
    fn long_stall_reaches_the_stepper_and_is_capped() {
        let mut presenter = RecordingPresenter::new();
        let mut world = world(&mut presenter);
        world.frame(10.0, &mut presenter);

        let report = world.frame(12.0, &mut presenter);

        assert_eq!(report.dt, 2.0);
        assert_eq!(report.substeps, world.config().max_substeps);
        assert!(report.spawned);
    }

    #[test]
    fn three_bricks_spawn_then_none() {
        let mut presenter = RecordingPresenter::new();
        let mut world = world(&mut presenter);

        let mut spawn_frames = Vec::new();
        for (i, t) in [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5].into_iter().enumerate() {
            if world.frame(t, &mut presenter).spawned {
                spawn_frames.push(i);
            }
        }

        assert_eq!(spawn_frames, vec![3, 4, 5]);
        assert_eq!(world.entities().len(), 3);
        assert!(world.scheduler().is_exhausted());

        run(&mut world, &mut presenter, 3.5, 600);
        assert_eq!(world.entities().len(), 3);
    }

    #[test]
    fn spawned_bricks_match_their_visual_box_and_band() {
        let mut presenter = RecordingPresenter::new();
        let mut world = world(&mut presenter);
        world.spawn(&mut presenter).unwrap();

        let entity = &world.entities()[0];
        let start = entity.body.initial_pose();
        assert!(start.translation.x >= -15.0 && start.translation.x < 15.0);
        assert!(start.translation.z >= -15.0 && start.translation.z < 15.0);
        assert_eq!(start.translation.y, 200.0);
        assert_eq!(start.rotation, na::UnitQuaternion::identity());

        let visual = presenter.get(entity.visual);
        assert_eq!(visual.style, VisualStyle::Brick);
        assert_eq!(visual.spec, entity.body.box_spec());
        assert_eq!(entity.body.mass(), 10.0);
        assert_eq!(entity.body.material().restitution, 0.125);
        assert_eq!(entity.body.material().friction, 1.0);
        assert_eq!(entity.body.material().rolling_friction, 5.0);
    }

    #[test]
    fn same_seed_drops_bricks_in_the_same_places() {
        let positions = || {
            let mut presenter = RecordingPresenter::new();
            let mut world = world(&mut presenter);
            for _ in 0..3 {
                world.spawn(&mut presenter).unwrap();
            }
            world
                .entities()
                .iter()
                .map(|e| e.body.initial_pose().translation)
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(), positions());
    }

    #[test]
    fn visuals_equal_backend_pose_after_every_frame() {
        let mut presenter = RecordingPresenter::new();
        let mut world = world(&mut presenter);
        world.frame(0.0, &mut presenter);

        let mut t = 0.0;
        for _ in 0..240 {
            t += 1.0 / 60.0;
            world.frame(t, &mut presenter);
            for entity in world.entities() {
                let backend = entity.body.pose(world.physics()).unwrap();
                assert_eq!(presenter.get(entity.visual).pose, backend);
            }
        }
        assert_eq!(world.entities().len(), 3);
    }

    #[test]
    fn newly_spawned_brick_is_stepped_before_first_sync() {
        let mut presenter = RecordingPresenter::new();
        let mut world = world(&mut presenter);
        world.frame(0.0, &mut presenter);
        // Countdown 1.0 -> -0.1: spawn, then 1.1s of frame time capped at 10 steps.
        let report = world.frame(1.1, &mut presenter);

        assert!(report.spawned);
        assert_eq!(report.substeps, 10);
        let entity = &world.entities()[0];
        let visual = presenter.get(entity.visual);
        assert_eq!(visual.updates, 1);
        assert!(visual.pose.translation.y < 200.0);
    }

    #[test]
    fn ground_never_moves_and_is_never_synced() {
        let mut presenter = RecordingPresenter::new();
        let mut world = world(&mut presenter);
        world.frame(0.0, &mut presenter);
        run(&mut world, &mut presenter, 0.0, 600);

        assert_eq!(world.ground().pose(world.physics()), Some(Pose::identity()));
        let ground_visual = presenter.get(*world.ground_visual());
        assert_eq!(ground_visual.pose, Pose::identity());
        assert_eq!(ground_visual.updates, 0);
    }

    #[test]
    fn bricks_settle_on_the_ground() {
        let mut presenter = RecordingPresenter::new();
        let mut world = world(&mut presenter);
        world.frame(0.0, &mut presenter);
        let t = run(&mut world, &mut presenter, 0.0, 900);

        let heights = |world: &SimulationWorld<usize>| {
            world
                .entities()
                .iter()
                .map(|e| e.body.pose(world.physics()).unwrap().translation.y)
                .collect::<Vec<_>>()
        };
        let settled = heights(&world);
        run(&mut world, &mut presenter, t, 60);
        let later = heights(&world);

        assert_eq!(settled.len(), 3);
        for (a, b) in settled.iter().zip(&later) {
            // Above the ground top (0.5), at most a few brick heights up if stacked.
            assert!(*a > 0.5 && *a < 12.0, "unexpected rest height {a}");
            assert!((a - b).abs() < 5.0e-2, "brick still moving: {a} -> {b}");
        }
    }

    #[test]
    fn bricks_below_the_kill_plane_are_released() {
        let mut presenter = RecordingPresenter::new();
        let mut world = world(&mut presenter);
        world.spawn(&mut presenter).unwrap();
        world.spawn(&mut presenter).unwrap();
        assert_eq!(world.physics().body_count(), 3);

        // Both bricks still hang at the drop height, well below y = 500.
        let released = world.despawn_below(500.0, &mut presenter);

        assert_eq!(released, 2);
        assert!(world.entities().is_empty());
        assert_eq!(world.physics().body_count(), 1);
        assert_eq!(presenter.live().count(), 1);
    }

    #[test]
    fn bricks_off_the_edge_fall_out_of_the_world() {
        let mut presenter = RecordingPresenter::new();
        let config = SimConfig {
            // A tiny post in the middle of a huge drop band: every brick misses it.
            ground_dimensions: [2.0, 1.0, 2.0],
            spawn_band: 1_000.0,
            ..seeded()
        };
        let mut world = SimulationWorld::initialize(config, &mut presenter).unwrap();
        world.frame(0.0, &mut presenter);

        let mut released = 0;
        let mut t = 0.0;
        for _ in 0..1_200 {
            t += 1.0 / 60.0;
            released += world.frame(t, &mut presenter).released;
        }

        assert_eq!(world.scheduler().spawned(), 3);
        assert_eq!(released, 3);
        assert!(world.entities().is_empty());
        assert_eq!(world.physics().body_count(), 1);
        assert_eq!(presenter.live().count(), 1);
    }
}

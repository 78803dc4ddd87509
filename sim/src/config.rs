//! Tunables for a simulation run.
//!
//! `SimConfig::default()` reproduces the stock scene; callers override single
//! fields (seed, brick count) from the command line or environment.

use nalgebra as na;

use crate::constants::*;
use crate::error::SimError;
use crate::pose::{BoxSpec, Material};

#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub gravity: na::Vector3<f32>,
    pub fixed_time_step: f32,
    pub max_substeps: u32,

    pub ground_dimensions: [f32; 3],
    pub ground_restitution: f32,

    pub brick_dimensions: [f32; 3],
    pub brick_mass: f32,
    pub brick_material: Material,

    /// Bricks are dropped at `x, z` uniformly in `[-band / 2, band / 2)`.
    pub spawn_band: f32,
    pub drop_height: f32,
    pub spawn_limit: u32,
    pub spawn_interval: f32,
    pub initial_countdown: f32,

    /// Bodies below this height are released. `None` keeps everything forever.
    pub kill_plane_y: Option<f32>,

    /// Seed for brick placement. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: na::Vector3::new(0.0, GRAVITY_Y, 0.0),
            fixed_time_step: FIXED_TIME_STEP,
            max_substeps: MAX_SUBSTEPS,
            ground_dimensions: GROUND_DIMENSIONS,
            ground_restitution: GROUND_RESTITUTION,
            brick_dimensions: BRICK_DIMENSIONS,
            brick_mass: BRICK_MASS,
            brick_material: Material {
                restitution: BRICK_RESTITUTION,
                friction: BRICK_FRICTION,
                rolling_friction: BRICK_ROLLING_FRICTION,
            },
            spawn_band: SPAWN_BAND,
            drop_height: DROP_HEIGHT,
            spawn_limit: SPAWN_LIMIT,
            spawn_interval: SPAWN_INTERVAL_SECS,
            initial_countdown: INITIAL_COUNTDOWN_SECS,
            kill_plane_y: Some(KILL_PLANE_Y),
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn ground_box(&self) -> Result<BoxSpec, SimError> {
        BoxSpec::from_array(self.ground_dimensions)
    }

    pub fn brick_box(&self) -> Result<BoxSpec, SimError> {
        BoxSpec::from_array(self.brick_dimensions)
    }
}

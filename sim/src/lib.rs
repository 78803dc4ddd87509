pub mod body;
pub mod clock;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod physics;
pub mod pose;
pub mod presenter;
pub mod scheduler;
pub mod world;

// Re-export Rapier so the client can reach backend types without depending on it directly.
pub use rapier3d;

pub use body::BodyHandle;
pub use clock::FrameClock;
pub use config::SimConfig;
pub use entity::Entity;
pub use error::SimError;
pub use physics::{PhysicsWorld, StepPolicy};
pub use pose::{BoxSpec, Material, Pose};
pub use presenter::{Presenter, RecordingPresenter, VisualStyle};
pub use scheduler::{SpawnEvent, SpawnScheduler, SpawnState};
pub use world::{FrameReport, SimulationWorld};

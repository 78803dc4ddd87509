//! Owns the running [`SimulationWorld`] and advances it once per rendered frame.

use bevy::prelude::*;
use sim::SimulationWorld;

use crate::config::LaunchConfig;
use crate::presenter::{BevyPresenter, load_scene_materials};

/// The simulation, keyed by the bevy entities of its visuals.
#[derive(Resource, Deref, DerefMut)]
pub struct Simulation(pub SimulationWorld<Entity>);

pub(super) fn plugin(app: &mut App) {
    // Visuals need the shared materials, so setup waits for them.
    app.add_systems(Startup, setup.after(load_scene_materials));
    app.add_systems(
        Update,
        advance_simulation.run_if(resource_exists::<Simulation>),
    );
}

fn setup(
    mut presenter: BevyPresenter,
    config: Res<LaunchConfig>,
    mut exit: MessageWriter<AppExit>,
) {
    match SimulationWorld::initialize(config.0.clone(), &mut presenter) {
        Ok(world) => {
            info!("World setup");
            presenter.commands().insert_resource(Simulation(world));
        }
        Err(err) => {
            // No partial world is worth rendering.
            error!("Simulation setup failed: {err}");
            exit.write(AppExit::error());
        }
    }
}

// Real time: the virtual clock clamps long frames, and the sub-stepper
// must see the whole stall so it can drop the excess itself.
fn advance_simulation(
    time: Res<Time<Real>>,
    mut simulation: ResMut<Simulation>,
    mut presenter: BevyPresenter,
) {
    let report = simulation.frame(time.elapsed_secs_f64(), &mut presenter);

    if report.spawned {
        debug!(
            "Brick spawned; {} in the scene",
            simulation.entities().len()
        );
    }
    if report.substeps > 0 {
        trace!("dt={:.4}s, {} physics step(s)", report.dt, report.substeps);
    }
}

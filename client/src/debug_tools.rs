//! Frame-time and scene diagnostics for dev builds, printed through the log.
//!
//! Compiled only with the `dev` feature (see `main.rs`).

use bevy::diagnostic::{
    Diagnostic, DiagnosticPath, Diagnostics, EntityCountDiagnosticsPlugin,
    FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin, RegisterDiagnostic,
};
use bevy::prelude::*;

use crate::world::Simulation;

/// Number of bricks currently simulated.
pub const BRICK_COUNT: DiagnosticPath = DiagnosticPath::const_new("brickfall/bricks");

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        LogDiagnosticsPlugin::default(),
    ));

    app.register_diagnostic(Diagnostic::new(BRICK_COUNT));
    app.add_systems(
        Update,
        measure_bricks.run_if(resource_exists::<Simulation>),
    );
}

fn measure_bricks(mut diagnostics: Diagnostics, simulation: Res<Simulation>) {
    diagnostics.add_measurement(&BRICK_COUNT, || simulation.entities().len() as f64);
}

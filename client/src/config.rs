use bevy::prelude::*;
use sim::SimConfig;

/// Simulation settings chosen at launch.
#[derive(Resource, Debug, Clone)]
pub struct LaunchConfig(pub SimConfig);

pub(super) fn plugin(app: &mut App) {
    let config = read_config_from_cli_env();
    if let Some(seed) = config.seed {
        info!("Using placement seed {seed}.");
    }
    app.insert_resource(LaunchConfig(config));
}

/// Builds the simulation config from CLI args, falling back to environment variables.
///
/// Supported:
///   --seed <u64>     / --seed=<u64>     / BRICKFALL_SEED
///   --bricks <u32>   / --bricks=<u32>   / BRICKFALL_BRICKS
fn read_config_from_cli_env() -> SimConfig {
    apply_overrides(SimConfig::default(), std::env::args().skip(1), |key| {
        std::env::var(key).ok()
    })
}

fn apply_overrides(
    mut config: SimConfig,
    args: impl IntoIterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> SimConfig {
    let mut seed: Option<String> = None;
    let mut bricks: Option<String> = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--seed" {
            seed = args.next();
        } else if let Some(val) = arg.strip_prefix("--seed=") {
            seed = Some(val.to_string());
        } else if arg == "--bricks" {
            bricks = args.next();
        } else if let Some(val) = arg.strip_prefix("--bricks=") {
            bricks = Some(val.to_string());
        }
    }

    let seed = seed.or_else(|| env("BRICKFALL_SEED"));
    let bricks = bricks.or_else(|| env("BRICKFALL_BRICKS"));

    if let Some(raw) = seed {
        match raw.trim().parse::<u64>() {
            Ok(seed) => config.seed = Some(seed),
            Err(err) => warn!("Ignoring invalid seed {raw:?}: {err}"),
        }
    }
    if let Some(raw) = bricks {
        match raw.trim().parse::<u32>() {
            Ok(limit) => config.spawn_limit = limit,
            Err(err) => warn!("Ignoring invalid brick count {raw:?}: {err}"),
        }
    }

    config
}

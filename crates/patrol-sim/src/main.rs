//! Guard patrol simulation entry point.
mod config;
mod guard;

use anyhow::Result;
use behavior_engine::Status;
use config::SimConfig;
use guard::World;

const WAYPOINTS: (f64, f64) = (5.0, 12.0);

/// Health left after the ambush.
const AMBUSH_HEALTH: u32 = 20;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    tracing::info!(?config, "starting patrol simulation");

    let mut tree = guard::build_tree(WAYPOINTS, config.speed, config.repeats)?;
    let mut world = World::default();

    for step in 0..config.ticks {
        if step == config.ambush_tick {
            world.health = AMBUSH_HEALTH;
            tracing::warn!(step, health = world.health, "guard ambushed");
        }

        let status = tree.tick(&mut world, config.delta)?;
        tracing::debug!(step, %status, position = world.position, "tick");

        if status != Status::Running {
            tracing::info!(
                step,
                %status,
                position = world.position,
                health = world.health,
                legs = world.legs_walked,
                "behavior finished"
            );
        }
    }

    tracing::info!(legs = world.legs_walked, health = world.health, "simulation done");
    Ok(())
}

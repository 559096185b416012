//! Simulation configuration.
use std::env;

/// Patrol simulation settings.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Number of simulation steps to run.
    pub ticks: u32,
    /// Seconds advanced per step.
    pub delta: f64,
    /// Full patrol loops before the guard reports the route as done.
    pub repeats: u32,
    /// Step at which the guard gets ambushed.
    pub ambush_tick: u32,
    /// Walking speed in units per second.
    pub speed: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 120,
            delta: 0.25,
            repeats: 3,
            ambush_tick: 40,
            speed: 2.0,
        }
    }
}

impl SimConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PATROL_TICKS` - Simulation steps (default: 120)
    /// - `PATROL_DELTA` - Seconds per step (default: 0.25)
    /// - `PATROL_REPEATS` - Patrol loops per route (default: 3)
    /// - `PATROL_AMBUSH_TICK` - Step of the ambush (default: 40)
    /// - `PATROL_SPEED` - Walking speed (default: 2.0)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ticks) = read_env::<u32>("PATROL_TICKS") {
            config.ticks = ticks;
        }
        if let Some(delta) = read_env::<f64>("PATROL_DELTA")
            && delta > 0.0
        {
            config.delta = delta;
        }
        if let Some(repeats) = read_env::<u32>("PATROL_REPEATS") {
            config.repeats = repeats.max(1);
        }
        if let Some(tick) = read_env::<u32>("PATROL_AMBUSH_TICK") {
            config.ambush_tick = tick;
        }
        if let Some(speed) = read_env::<f64>("PATROL_SPEED")
            && speed > 0.0
        {
            config.speed = speed;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

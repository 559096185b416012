//! The guard's world and its leaf actions.

use behavior_engine::builder::*;
use behavior_engine::{Behavior, BehaviorTree, RepeaterConfig, Status, TreeError};

/// Distance at which a walker counts as arrived.
const ARRIVAL_EPSILON: f64 = 1e-6;

/// Health at or below which the guard stops patrolling.
pub const WOUNDED_HEALTH: u32 = 30;

pub const MAX_HEALTH: u32 = 100;

/// Everything the guard's leaves read and write.
#[derive(Clone, Debug)]
pub struct World {
    /// Position on a one-dimensional corridor. The shelter sits at 0.
    pub position: f64,
    pub health: u32,
    /// Finished walks, for reporting.
    pub legs_walked: u32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            position: 0.0,
            health: MAX_HEALTH,
            legs_walked: 0,
        }
    }
}

impl World {
    pub fn is_wounded(&self) -> bool {
        self.health <= WOUNDED_HEALTH
    }

    /// Moves towards `target` by at most `step`. Returns `true` on arrival.
    fn step_towards(&mut self, target: f64, step: f64) -> bool {
        let gap = target - self.position;
        if gap.abs() <= step + ARRIVAL_EPSILON {
            self.position = target;
            true
        } else {
            self.position += step.copysign(gap);
            false
        }
    }
}

/// Walks to a waypoint. Gives up as soon as the guard is wounded.
pub struct WalkTo {
    target: f64,
    speed: f64,
}

impl WalkTo {
    pub fn new(target: f64, speed: f64) -> Self {
        Self { target, speed }
    }
}

impl Behavior<World> for WalkTo {
    fn init(&mut self, world: &mut World, _delta: f64) -> bool {
        !world.is_wounded()
    }

    fn process(&mut self, world: &mut World, delta: f64) -> Status {
        if world.is_wounded() {
            return Status::Failure;
        }
        if world.step_towards(self.target, self.speed * delta) {
            world.legs_walked += 1;
            tracing::debug!(waypoint = self.target, "reached waypoint");
            Status::Success
        } else {
            Status::Running
        }
    }
}

/// Runs back to the shelter and recovers there.
pub struct Retreat {
    speed: f64,
}

impl Retreat {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }
}

impl Behavior<World> for Retreat {
    fn init(&mut self, world: &mut World, _delta: f64) -> bool {
        tracing::info!(position = world.position, "retreating to shelter");
        true
    }

    fn process(&mut self, world: &mut World, delta: f64) -> Status {
        // Running is faster than patrolling
        if world.step_towards(0.0, 2.0 * self.speed * delta) {
            world.health = MAX_HEALTH;
            Status::Success
        } else {
            Status::Running
        }
    }
}

/// Builds the guard's tree.
///
/// ```text
/// selector
/// ├── repeater (N loops, stop on failure)
/// │   └── sequence
/// │       ├── walk to A
/// │       └── walk to B
/// └── sequence
///     ├── wounded?
///     └── retreat
/// ```
pub fn build_tree(
    waypoints: (f64, f64),
    speed: f64,
    repeats: u32,
) -> Result<BehaviorTree<World>, TreeError> {
    let mut tree = BehaviorTree::new(selector());
    let root = tree.root();

    let patrol = tree.add_child(
        root,
        repeater(RepeaterConfig::times(repeats).stop_on_failure(true)),
    )?;
    let route = tree.add_child(patrol, sequence())?;
    tree.add_child(route, leaf(WalkTo::new(waypoints.0, speed)))?;
    tree.add_child(route, leaf(WalkTo::new(waypoints.1, speed)))?;

    let flee = tree.add_child(root, sequence())?;
    tree.add_child(flee, condition(World::is_wounded))?;
    tree.add_child(flee, leaf(Retreat::new(speed)))?;

    Ok(tree)
}

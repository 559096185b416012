//! Tick-driven behavior tree engine.
//!
//! Nodes report one of three outcomes per tick: success, failure, or still
//! running. Long-running work spans several ticks: composites remember the
//! child they were working on, leaves remember that they already started.
//!
//! - **Polled**: the host ticks the root once per simulation step
//! - **Tri-state**: `Running` threads through every node and decorator
//! - **Re-entrant**: resumption state lives on the nodes, not the call stack
//! - **Single owner**: the tree owns every node; parents are plain handles
//!
//! # Architecture
//!
//! - [`BehaviorTree`]: Owns the nodes and drives ticks
//! - [`Behavior`]: Host contract for leaf actions (`init` + `process`)
//! - [`Status`]: Success, Failure or Running
//! - Leaf nodes: [`Leaf`], [`Condition`]
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Decorator nodes: [`Inverter`], [`Succeeder`], [`Repeater`], [`RepeatUntilFail`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod config;
pub mod decorator;
pub mod error;
pub mod leaf;
pub mod node;
pub mod status;
pub mod tree;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use composite::{Composite, Selector, Sequence};
pub use config::RepeaterConfig;
pub use decorator::{Decorator, Inverter, RepeatUntilFail, Repeater, Succeeder};
pub use error::TreeError;
pub use leaf::{Condition, Leaf};
pub use node::{Node, NodeId, NodeKind};
pub use status::Status;
pub use tree::{Ancestors, BehaviorTree};

//! Host-supplied leaf behavior.
//!
//! This module defines the [`Behavior`] trait, the contract every concrete
//! action or condition implements. The trait is generic over a context type
//! `C`, through which the host hands world state (animation, pathing,
//! blackboard) to its leaves. The engine never looks inside `C`.

use crate::Status;

/// The two-method contract driven by a [`Leaf`](crate::Leaf).
pub trait Behavior<C>: Send {
    /// Starts a new activation.
    ///
    /// Called on the first tick after the leaf last finished (or on the very
    /// first tick). Returning `false` means the action could not start: the
    /// leaf reports `Failure` and [`process`](Behavior::process) is skipped
    /// for that tick.
    fn init(&mut self, ctx: &mut C, delta: f64) -> bool;

    /// Advances the action by one tick.
    ///
    /// Called on every tick of an activation, including the one that called
    /// `init`. `Running` asks for another tick; `Success` or `Failure` ends
    /// the activation.
    fn process(&mut self, ctx: &mut C, delta: f64) -> Status;

    /// Drops any half-finished work.
    ///
    /// Called by a tree reset pass when the host abandons a running subtree.
    fn reset(&mut self) {}
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// so boxed host actions can be handed to anything that takes a behavior.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn init(&mut self, ctx: &mut C, delta: f64) -> bool {
        (**self).init(ctx, delta)
    }

    #[inline]
    fn process(&mut self, ctx: &mut C, delta: f64) -> Status {
        (**self).process(ctx, delta)
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }
}

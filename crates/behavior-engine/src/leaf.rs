//! Leaf nodes.
//!
//! A [`Leaf`] wraps a host [`Behavior`] and drives its init/process
//! lifecycle. [`Condition`] adapts a plain predicate into a behavior that
//! finishes within one tick.

use crate::{Behavior, Status};

/// A childless node that runs host-supplied behavior.
///
/// # Lifecycle
///
/// - First tick of an activation: `init`, then `process` on the same tick
/// - `init` returns `false`: the leaf fails without calling `process`
/// - `process` returns `Running`: the next tick calls only `process`
/// - `process` returns `Success`/`Failure`: the activation ends and the next
///   tick starts over with `init`
pub struct Leaf<C> {
    behavior: Box<dyn Behavior<C>>,
    started: bool,
}

impl<C> Leaf<C> {
    /// Creates a leaf around the given behavior.
    pub fn new(behavior: impl Behavior<C> + 'static) -> Self {
        Self::from_boxed(Box::new(behavior))
    }

    /// Creates a leaf around an already boxed behavior.
    pub fn from_boxed(behavior: Box<dyn Behavior<C>>) -> Self {
        Self {
            behavior,
            started: false,
        }
    }

    /// Returns `true` while an activation is in progress.
    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Ticks the leaf once.
    ///
    /// Works on a standalone leaf as well as on one owned by a tree.
    pub fn tick(&mut self, ctx: &mut C, delta: f64) -> Status {
        if !self.started {
            if !self.behavior.init(ctx, delta) {
                tracing::debug!("leaf init refused to start");
                return Status::Failure;
            }
            self.started = true;
        }

        let status = self.behavior.process(ctx, delta);
        if status.is_terminal() {
            // Next activation goes through init again
            self.started = false;
        }
        status
    }

    /// Abandons the current activation, if any.
    pub fn reset(&mut self) {
        self.started = false;
        self.behavior.reset();
    }
}

/// A behavior that evaluates a predicate on the context.
///
/// Always starts, and finishes on the tick it starts: `Success` when the
/// predicate holds, `Failure` otherwise.
pub struct Condition<F> {
    predicate: F,
}

impl<F> Condition<F> {
    /// Wraps the given predicate.
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<C, F> Behavior<C> for Condition<F>
where
    F: Fn(&C) -> bool + Send,
{
    fn init(&mut self, _ctx: &mut C, _delta: f64) -> bool {
        true
    }

    fn process(&mut self, ctx: &mut C, _delta: f64) -> Status {
        if (self.predicate)(ctx) {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

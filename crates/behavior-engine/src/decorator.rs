//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result or execution.
//! This module provides [`Inverter`] (NOT logic), [`Succeeder`] (error
//! suppression), [`Repeater`] and [`RepeatUntilFail`] (looping).
//!
//! Every decorator ticks its child exactly once per own tick.

use crate::{NodeId, RepeaterConfig, Status, TreeError};

/// The single child slot shared by decorators.
#[derive(Clone, Debug, Default)]
pub struct Decorator {
    child: Option<NodeId>,
}

impl Decorator {
    /// The wrapped child, if one has been attached.
    #[inline]
    pub fn child(&self) -> Option<NodeId> {
        self.child
    }

    pub(crate) fn children(&self) -> &[NodeId] {
        self.child.as_slice()
    }

    /// Fails if the slot is taken. The existing child is never replaced.
    pub(crate) fn check_vacant(&self, id: NodeId) -> Result<(), TreeError> {
        match self.child {
            Some(child) => Err(TreeError::DecoratorOccupied {
                decorator: id,
                child,
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn attach(&mut self, child: NodeId) {
        self.child = Some(child);
    }

    pub(crate) fn remove(&mut self, child: NodeId) -> bool {
        if self.child == Some(child) {
            self.child = None;
            true
        } else {
            false
        }
    }

    fn tick_child(
        &self,
        id: NodeId,
        mut tick_child: impl FnMut(NodeId) -> Result<Status, TreeError>,
    ) -> Result<Status, TreeError> {
        let child = self.child.ok_or(TreeError::DecoratorEmpty(id))?;
        tick_child(child)
    }
}

/// Inverts the result of its child behavior.
///
/// # Semantics
///
/// - If the child returns `Success`, the inverter returns `Failure`
/// - If the child returns `Failure`, the inverter returns `Success`
/// - `Running` passes through unchanged
///
/// This is analogous to a logical NOT (!) operation.
#[derive(Clone, Debug, Default)]
pub struct Inverter {
    slot: Decorator,
}

impl Inverter {
    /// Creates an inverter. The child is attached through the tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The child slot.
    #[inline]
    pub fn decorator(&self) -> &Decorator {
        &self.slot
    }

    pub(crate) fn decorator_mut(&mut self) -> &mut Decorator {
        &mut self.slot
    }

    pub(crate) fn tick(
        &mut self,
        id: NodeId,
        tick_child: impl FnMut(NodeId) -> Result<Status, TreeError>,
    ) -> Result<Status, TreeError> {
        Ok(self.slot.tick_child(id, tick_child)?.invert())
    }
}

/// Reports `Success` for any finished child.
///
/// # Semantics
///
/// - If the child returns `Success`, returns `Success`
/// - If the child returns `Failure`, **still returns `Success`**
/// - If the child returns `Running`, returns `Running` so an unfinished
///   child is not reported as done
///
/// This is useful for:
/// - Optional behaviors that shouldn't cause a sequence to fail
/// - Logging/debugging nodes that observe state without affecting control flow
#[derive(Clone, Debug, Default)]
pub struct Succeeder {
    slot: Decorator,
}

impl Succeeder {
    /// Creates a succeeder. The child is attached through the tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The child slot.
    #[inline]
    pub fn decorator(&self) -> &Decorator {
        &self.slot
    }

    pub(crate) fn decorator_mut(&mut self) -> &mut Decorator {
        &mut self.slot
    }

    pub(crate) fn tick(
        &mut self,
        id: NodeId,
        tick_child: impl FnMut(NodeId) -> Result<Status, TreeError>,
    ) -> Result<Status, TreeError> {
        Ok(match self.slot.tick_child(id, tick_child)? {
            Status::Running => Status::Running,
            Status::Success | Status::Failure => Status::Success,
        })
    }
}

/// Re-runs its child every tick, optionally a bounded number of times.
///
/// # Semantics
///
/// - Each finished child activation counts towards the limit; a `Running`
///   child does not
/// - Below the limit (or without one) the repeater returns `Running`
/// - Reaching the limit returns `Success` and resets the count
/// - A child `Failure` counts like a success, unless `stop_on_failure` is
///   set, in which case the repeater returns `Failure` and resets
/// - A limit of zero succeeds without ticking the child
#[derive(Clone, Debug, Default)]
pub struct Repeater {
    slot: Decorator,
    config: RepeaterConfig,
    completed: u32,
}

impl Repeater {
    /// Creates a repeater with the given configuration.
    pub fn new(config: RepeaterConfig) -> Self {
        Self {
            slot: Decorator::default(),
            config,
            completed: 0,
        }
    }

    /// The child slot.
    #[inline]
    pub fn decorator(&self) -> &Decorator {
        &self.slot
    }

    pub(crate) fn decorator_mut(&mut self) -> &mut Decorator {
        &mut self.slot
    }

    /// Limit and failure policy this repeater was built with.
    #[inline]
    pub fn config(&self) -> RepeaterConfig {
        self.config
    }

    /// Child activations finished during the current repetition.
    #[inline]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub(crate) fn reset(&mut self) {
        self.completed = 0;
    }

    pub(crate) fn tick(
        &mut self,
        id: NodeId,
        tick_child: impl FnMut(NodeId) -> Result<Status, TreeError>,
    ) -> Result<Status, TreeError> {
        if self.config.limit == Some(0) {
            self.slot.child.ok_or(TreeError::DecoratorEmpty(id))?;
            return Ok(Status::Success);
        }

        let status = self.slot.tick_child(id, tick_child)?;
        if status.is_running() {
            return Ok(Status::Running);
        }
        if status.is_failure() && self.config.stop_on_failure {
            self.completed = 0;
            return Ok(Status::Failure);
        }

        self.completed = self.completed.saturating_add(1);
        match self.config.limit {
            Some(limit) if self.completed >= limit => {
                self.completed = 0;
                Ok(Status::Success)
            }
            _ => Ok(Status::Running),
        }
    }
}

/// Re-runs its child until the child fails.
///
/// # Semantics
///
/// - If the child returns `Success` or `Running`, returns `Running`
/// - If the child returns `Failure`, returns `Success`
#[derive(Clone, Debug, Default)]
pub struct RepeatUntilFail {
    slot: Decorator,
}

impl RepeatUntilFail {
    /// Creates a repeat-until-fail decorator. The child is attached through
    /// the tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The child slot.
    #[inline]
    pub fn decorator(&self) -> &Decorator {
        &self.slot
    }

    pub(crate) fn decorator_mut(&mut self) -> &mut Decorator {
        &mut self.slot
    }

    pub(crate) fn tick(
        &mut self,
        id: NodeId,
        tick_child: impl FnMut(NodeId) -> Result<Status, TreeError>,
    ) -> Result<Status, TreeError> {
        Ok(match self.slot.tick_child(id, tick_child)? {
            Status::Failure => Status::Success,
            Status::Success | Status::Running => Status::Running,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: NodeId = NodeId(0);
    const CHILD: NodeId = NodeId(1);

    /// Yields the scripted results in order, repeating the last one.
    fn scripted(results: &[Status]) -> impl FnMut(NodeId) -> Result<Status, TreeError> + '_ {
        let mut next = 0;
        move |_| {
            let status = results[next.min(results.len() - 1)];
            next += 1;
            Ok(status)
        }
    }

    fn with_child<T>(mut node: T, slot: impl Fn(&mut T) -> &mut Decorator) -> T {
        slot(&mut node).attach(CHILD);
        node
    }

    #[test]
    fn inverter_truth_table() {
        let mut inverter = with_child(Inverter::new(), Inverter::decorator_mut);

        assert_eq!(inverter.tick(ID, scripted(&[Status::Success])), Ok(Status::Failure));
        assert_eq!(inverter.tick(ID, scripted(&[Status::Failure])), Ok(Status::Success));
        assert_eq!(inverter.tick(ID, scripted(&[Status::Running])), Ok(Status::Running));
    }

    #[test]
    fn succeeder_forwards_running() {
        let mut succeeder = with_child(Succeeder::new(), Succeeder::decorator_mut);

        assert_eq!(succeeder.tick(ID, scripted(&[Status::Failure])), Ok(Status::Success));
        assert_eq!(succeeder.tick(ID, scripted(&[Status::Success])), Ok(Status::Success));
        assert_eq!(succeeder.tick(ID, scripted(&[Status::Running])), Ok(Status::Running));
    }

    #[test]
    fn succeeder_still_ticks_child() {
        let mut succeeder = with_child(Succeeder::new(), Succeeder::decorator_mut);

        let mut ticks = 0;
        let status = succeeder.tick(ID, |_| {
            ticks += 1;
            Ok(Status::Failure)
        });
        assert_eq!(status, Ok(Status::Success));
        assert_eq!(ticks, 1);
    }

    #[test]
    fn repeat_until_fail_succeeds_on_first_failure() {
        let mut node = with_child(RepeatUntilFail::new(), RepeatUntilFail::decorator_mut);
        let mut child = scripted(&[Status::Success, Status::Success, Status::Failure]);

        assert_eq!(node.tick(ID, &mut child), Ok(Status::Running));
        assert_eq!(node.tick(ID, &mut child), Ok(Status::Running));
        assert_eq!(node.tick(ID, &mut child), Ok(Status::Success));
    }

    #[test]
    fn bounded_repeater_counts_finished_activations() {
        let mut repeater = with_child(Repeater::new(RepeaterConfig::times(2)), Repeater::decorator_mut);
        let mut child = scripted(&[Status::Running, Status::Success, Status::Failure, Status::Success]);

        assert_eq!(repeater.tick(ID, &mut child), Ok(Status::Running)); // running, not counted
        assert_eq!(repeater.completed(), 0);
        assert_eq!(repeater.tick(ID, &mut child), Ok(Status::Running)); // success, 1 of 2
        assert_eq!(repeater.tick(ID, &mut child), Ok(Status::Success)); // failure still counts
        assert_eq!(repeater.completed(), 0);
    }

    #[test]
    fn unbounded_repeater_never_finishes() {
        let mut repeater = with_child(Repeater::new(RepeaterConfig::unbounded()), Repeater::decorator_mut);
        let mut child = scripted(&[Status::Success, Status::Failure]);

        for _ in 0..10 {
            assert_eq!(repeater.tick(ID, &mut child), Ok(Status::Running));
        }
    }

    #[test]
    fn repeater_can_stop_on_failure() {
        let config = RepeaterConfig::times(5).stop_on_failure(true);
        let mut repeater = with_child(Repeater::new(config), Repeater::decorator_mut);
        let mut child = scripted(&[Status::Success, Status::Failure]);

        assert_eq!(repeater.tick(ID, &mut child), Ok(Status::Running));
        assert_eq!(repeater.tick(ID, &mut child), Ok(Status::Failure));
        assert_eq!(repeater.completed(), 0);
        assert!(repeater.config().stop_on_failure);
        assert_eq!(repeater.config().limit, Some(5));
    }

    #[test]
    fn zero_limit_succeeds_without_ticking() {
        let mut repeater = with_child(Repeater::new(RepeaterConfig::times(0)), Repeater::decorator_mut);

        let status = repeater.tick(ID, |_| panic!("child must not be ticked"));
        assert_eq!(status, Ok(Status::Success));
    }

    #[test]
    fn empty_decorator_is_a_structural_error() {
        let mut inverter = Inverter::new();
        assert_eq!(
            inverter.tick(ID, scripted(&[Status::Success])),
            Err(TreeError::DecoratorEmpty(ID))
        );
    }

    #[test]
    fn occupied_slot_is_reported() {
        let inverter = with_child(Inverter::new(), Inverter::decorator_mut);
        assert_eq!(
            inverter.decorator().check_vacant(ID),
            Err(TreeError::DecoratorOccupied {
                decorator: ID,
                child: CHILD
            })
        );
    }
}

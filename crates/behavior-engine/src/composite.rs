//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the fundamental building blocks for creating complex
//! decision trees: [`Sequence`] (AND logic) and [`Selector`] (OR logic).
//!
//! Both remember which child they were working on, so a `Running` child is
//! resumed on the next tick instead of re-running its finished siblings.

use crate::{NodeId, Status, TreeError};

/// Ordered children plus the index of the child to resume at.
#[derive(Clone, Debug, Default)]
pub struct Composite {
    children: Vec<NodeId>,
    current: usize,
}

impl Composite {
    /// Children in evaluation order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Index of the child the next tick resumes at.
    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    pub(crate) fn push(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn remove(&mut self, child: NodeId) -> bool {
        let Some(pos) = self.children.iter().position(|&c| c == child) else {
            return false;
        };
        self.children.remove(pos);
        if pos < self.current {
            self.current -= 1;
        }
        self.current = self.current.min(self.children.len());
        true
    }

    pub(crate) fn reset(&mut self) {
        self.current = 0;
    }

    /// Ticks children from the cursor onwards while they report `pass`.
    ///
    /// Returns the first status other than `pass`, or `pass` itself once the
    /// list is exhausted. The cursor is kept only for `Running`.
    fn run(
        &mut self,
        pass: Status,
        mut tick_child: impl FnMut(NodeId) -> Result<Status, TreeError>,
    ) -> Result<Status, TreeError> {
        while let Some(&child) = self.children.get(self.current) {
            match tick_child(child)? {
                Status::Running => return Ok(Status::Running),
                status if status == pass => self.current += 1,
                status => {
                    self.current = 0;
                    return Ok(status);
                }
            }
        }
        self.current = 0;
        Ok(pass)
    }
}

/// Executes child behaviors in sequence until one fails.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If a child returns `Running`, the sequence returns `Running` and resumes
///   at that child on the next tick
/// - If all children return `Success`, the sequence returns `Success`
///
/// This is analogous to a short-circuited logical AND (&&) operation. An
/// empty sequence succeeds.
#[derive(Clone, Debug, Default)]
pub struct Sequence {
    inner: Composite,
}

impl Sequence {
    /// Creates an empty sequence. Children are attached through the tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared composite state.
    #[inline]
    pub fn composite(&self) -> &Composite {
        &self.inner
    }

    pub(crate) fn composite_mut(&mut self) -> &mut Composite {
        &mut self.inner
    }

    pub(crate) fn tick(
        &mut self,
        tick_child: impl FnMut(NodeId) -> Result<Status, TreeError>,
    ) -> Result<Status, TreeError> {
        self.inner.run(Status::Success, tick_child)
    }
}

/// Executes child behaviors in sequence until one succeeds.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right:
/// - If a child returns `Success`, the selector **stops immediately** and returns `Success`
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If a child returns `Running`, the selector returns `Running` and resumes
///   at that child on the next tick
/// - If all children return `Failure`, the selector returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation. An
/// empty selector fails.
#[derive(Clone, Debug, Default)]
pub struct Selector {
    inner: Composite,
}

impl Selector {
    /// Creates an empty selector. Children are attached through the tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared composite state.
    #[inline]
    pub fn composite(&self) -> &Composite {
        &self.inner
    }

    pub(crate) fn composite_mut(&mut self) -> &mut Composite {
        &mut self.inner
    }

    pub(crate) fn tick(
        &mut self,
        tick_child: impl FnMut(NodeId) -> Result<Status, TreeError>,
    ) -> Result<Status, TreeError> {
        self.inner.run(Status::Failure, tick_child)
    }
}

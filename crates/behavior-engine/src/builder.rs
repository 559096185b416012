//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose
//! `Node::Sequence(Sequence::new())`, you can pass `sequence()` straight to
//! [`BehaviorTree::add_child`](crate::BehaviorTree::add_child).

use crate::{
    Behavior, Condition, Inverter, Leaf, Node, RepeatUntilFail, Repeater, RepeaterConfig,
    Selector, Sequence, Succeeder,
};

/// Creates an empty sequence node.
#[inline]
pub fn sequence<C>() -> Node<C> {
    Node::Sequence(Sequence::new())
}

/// Creates an empty selector node.
#[inline]
pub fn selector<C>() -> Node<C> {
    Node::Selector(Selector::new())
}

/// Creates an inverter awaiting its child.
#[inline]
pub fn inverter<C>() -> Node<C> {
    Node::Inverter(Inverter::new())
}

/// Creates a succeeder awaiting its child.
#[inline]
pub fn succeeder<C>() -> Node<C> {
    Node::Succeeder(Succeeder::new())
}

/// Creates a repeater awaiting its child.
#[inline]
pub fn repeater<C>(config: RepeaterConfig) -> Node<C> {
    Node::Repeater(Repeater::new(config))
}

/// Creates a repeat-until-fail decorator awaiting its child.
#[inline]
pub fn repeat_until_fail<C>() -> Node<C> {
    Node::RepeatUntilFail(RepeatUntilFail::new())
}

/// Creates a leaf around a host behavior.
///
/// Shorthand for `Node::Leaf(Leaf::new(behavior))`.
#[inline]
pub fn leaf<C>(behavior: impl Behavior<C> + 'static) -> Node<C> {
    Node::Leaf(Leaf::new(behavior))
}

/// Creates a leaf that checks a predicate on the context.
#[inline]
pub fn condition<C, F>(predicate: F) -> Node<C>
where
    F: Fn(&C) -> bool + Send + 'static,
{
    leaf(Condition::new(predicate))
}

//! The node family.
//!
//! [`Node`] is a closed set of node kinds sharing one capability set:
//! tick, accept children, list children, reset resumption state. Nodes refer
//! to their children through [`NodeId`] handles into the owning
//! [`BehaviorTree`](crate::BehaviorTree).

use core::fmt;

use crate::{
    Inverter, Leaf, RepeatUntilFail, Repeater, Selector, Sequence, Succeeder, TreeError,
    decorator::Decorator,
};

/// Handle to a node inside a [`BehaviorTree`](crate::BehaviorTree).
///
/// Handles are never reused within a tree, so a handle to a removed node
/// keeps reporting [`TreeError::NodeNotFound`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its tree's storage.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discriminant of a [`Node`], for inspection and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    Leaf,
    Sequence,
    Selector,
    Inverter,
    Succeeder,
    Repeater,
    RepeatUntilFail,
}

impl NodeKind {
    /// Sequence or Selector.
    #[inline]
    pub fn is_composite(self) -> bool {
        matches!(self, NodeKind::Sequence | NodeKind::Selector)
    }

    /// Any node kind that owns exactly one child.
    #[inline]
    pub fn is_decorator(self) -> bool {
        matches!(
            self,
            NodeKind::Inverter | NodeKind::Succeeder | NodeKind::Repeater | NodeKind::RepeatUntilFail
        )
    }
}

/// A behavior tree node.
pub enum Node<C> {
    Leaf(Leaf<C>),
    Sequence(Sequence),
    Selector(Selector),
    Inverter(Inverter),
    Succeeder(Succeeder),
    Repeater(Repeater),
    RepeatUntilFail(RepeatUntilFail),
}

impl<C> Node<C> {
    /// The variant tag of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Leaf(_) => NodeKind::Leaf,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Selector(_) => NodeKind::Selector,
            Node::Inverter(_) => NodeKind::Inverter,
            Node::Succeeder(_) => NodeKind::Succeeder,
            Node::Repeater(_) => NodeKind::Repeater,
            Node::RepeatUntilFail(_) => NodeKind::RepeatUntilFail,
        }
    }

    /// Owned children in evaluation order. Empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Leaf(_) => &[],
            Node::Sequence(seq) => seq.composite().children(),
            Node::Selector(sel) => sel.composite().children(),
            _ => self.decorator().map(Decorator::children).unwrap_or_default(),
        }
    }

    fn decorator(&self) -> Option<&Decorator> {
        match self {
            Node::Inverter(node) => Some(node.decorator()),
            Node::Succeeder(node) => Some(node.decorator()),
            Node::Repeater(node) => Some(node.decorator()),
            Node::RepeatUntilFail(node) => Some(node.decorator()),
            Node::Leaf(_) | Node::Sequence(_) | Node::Selector(_) => None,
        }
    }

    fn decorator_mut(&mut self) -> Option<&mut Decorator> {
        match self {
            Node::Inverter(node) => Some(node.decorator_mut()),
            Node::Succeeder(node) => Some(node.decorator_mut()),
            Node::Repeater(node) => Some(node.decorator_mut()),
            Node::RepeatUntilFail(node) => Some(node.decorator_mut()),
            Node::Leaf(_) | Node::Sequence(_) | Node::Selector(_) => None,
        }
    }

    /// Checks that this node, stored at `id`, can take one more child.
    pub(crate) fn check_accepts(&self, id: NodeId) -> Result<(), TreeError> {
        match self {
            Node::Leaf(_) => Err(TreeError::LeafHasNoChildren(id)),
            Node::Sequence(_) | Node::Selector(_) => Ok(()),
            _ => self.decorator().map_or(Ok(()), |slot| slot.check_vacant(id)),
        }
    }

    /// Appends `child`. Callers run [`check_accepts`](Self::check_accepts) first.
    pub(crate) fn attach(&mut self, child: NodeId) {
        match self {
            Node::Leaf(_) => {}
            Node::Sequence(seq) => seq.composite_mut().push(child),
            Node::Selector(sel) => sel.composite_mut().push(child),
            _ => {
                if let Some(slot) = self.decorator_mut() {
                    slot.attach(child);
                }
            }
        }
    }

    /// Forgets `child`. Returns `false` if it was not a child of this node.
    ///
    /// A decorator that loses its child also drops its own progress, so the
    /// next child starts from a clean count.
    pub(crate) fn detach(&mut self, child: NodeId) -> bool {
        match self {
            Node::Leaf(_) => false,
            Node::Sequence(seq) => seq.composite_mut().remove(child),
            Node::Selector(sel) => sel.composite_mut().remove(child),
            _ => {
                let removed = self
                    .decorator_mut()
                    .is_some_and(|slot| slot.remove(child));
                if removed {
                    self.reset();
                }
                removed
            }
        }
    }

    /// Re-arms this node's own resumption state. Children are not touched.
    pub(crate) fn reset(&mut self) {
        match self {
            Node::Leaf(leaf) => leaf.reset(),
            Node::Sequence(seq) => seq.composite_mut().reset(),
            Node::Selector(sel) => sel.composite_mut().reset(),
            Node::Repeater(repeater) => repeater.reset(),
            Node::Inverter(_) | Node::Succeeder(_) | Node::RepeatUntilFail(_) => {}
        }
    }
}

impl<C> fmt::Debug for Node<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("children", &self.children())
            .finish()
    }
}

impl<C> From<Leaf<C>> for Node<C> {
    fn from(leaf: Leaf<C>) -> Self {
        Node::Leaf(leaf)
    }
}

impl<C> From<Sequence> for Node<C> {
    fn from(node: Sequence) -> Self {
        Node::Sequence(node)
    }
}

impl<C> From<Selector> for Node<C> {
    fn from(node: Selector) -> Self {
        Node::Selector(node)
    }
}

impl<C> From<Inverter> for Node<C> {
    fn from(node: Inverter) -> Self {
        Node::Inverter(node)
    }
}

impl<C> From<Succeeder> for Node<C> {
    fn from(node: Succeeder) -> Self {
        Node::Succeeder(node)
    }
}

impl<C> From<Repeater> for Node<C> {
    fn from(node: Repeater) -> Self {
        Node::Repeater(node)
    }
}

impl<C> From<RepeatUntilFail> for Node<C> {
    fn from(node: RepeatUntilFail) -> Self {
        Node::RepeatUntilFail(node)
    }
}

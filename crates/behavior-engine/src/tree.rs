//! Tree ownership and the tick driver.
//!
//! A [`BehaviorTree`] owns every node. Children are reached through the
//! owning child lists of composites and decorators; each node also keeps a
//! non-owning parent handle for upward walks. Removing a node tears down its
//! whole subtree.

use core::fmt;

use crate::{Node, NodeId, NodeKind, Status, TreeError};

struct Slot<C> {
    parent: Option<NodeId>,
    /// Taken out while the node is being ticked.
    node: Option<Node<C>>,
}

/// A behavior tree over a host context `C`.
///
/// # Example
///
/// ```rust,ignore
/// use behavior_engine::{builder::*, BehaviorTree};
///
/// let mut tree = BehaviorTree::new(selector());
/// let flee = tree.add_child(tree.root(), sequence())?;
/// tree.add_child(flee, condition(|w: &World| w.health < 30))?;
/// tree.add_child(flee, leaf(RunToCover::default()))?;
/// tree.add_child(tree.root(), leaf(Patrol::default()))?;
///
/// loop {
///     tree.tick(&mut world, frame_time)?;
/// }
/// ```
pub struct BehaviorTree<C> {
    slots: Vec<Option<Slot<C>>>,
    root: NodeId,
    live: usize,
}

impl<C> BehaviorTree<C> {
    /// Creates a tree consisting of `root` alone.
    pub fn new(root: impl Into<Node<C>>) -> Self {
        Self {
            slots: vec![Some(Slot {
                parent: None,
                node: Some(root.into()),
            })],
            root: NodeId(0),
            live: 1,
        }
    }

    /// Handle of the root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Always `false`: a tree keeps its root for its whole life.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns `true` if `id` refers to a live node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_ok()
    }

    /// Borrows the node behind `id`.
    pub fn node(&self, id: NodeId) -> Result<&Node<C>, TreeError> {
        self.slot(id)?.node.as_ref().ok_or(TreeError::Reentrant(id))
    }

    /// The variant tag of the node behind `id`.
    pub fn kind(&self, id: NodeId) -> Result<NodeKind, TreeError> {
        Ok(self.node(id)?.kind())
    }

    /// The node's parent, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.slot(id)?.parent)
    }

    /// Owned children of `id` in evaluation order.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], TreeError> {
        Ok(self.node(id)?.children())
    }

    /// Walks parent handles upwards, starting with the parent of `id`.
    ///
    /// Empty for the root and for unknown handles.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, C> {
        Ancestors {
            tree: self,
            next: self.slot(id).ok().and_then(|slot| slot.parent),
        }
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> Result<usize, TreeError> {
        self.slot(id)?;
        Ok(self.ancestors(id).count())
    }

    /// Attaches a new node under `parent` and returns its handle.
    ///
    /// # Errors
    ///
    /// - [`TreeError::LeafHasNoChildren`] if `parent` is a leaf
    /// - [`TreeError::DecoratorOccupied`] if `parent` is a decorator that
    ///   already owns a child
    /// - [`TreeError::NodeNotFound`] if `parent` is not in this tree
    pub fn add_child(
        &mut self,
        parent: NodeId,
        node: impl Into<Node<C>>,
    ) -> Result<NodeId, TreeError> {
        self.try_add_child(parent, node.into())
            .inspect_err(|err| tracing::warn!(%parent, code = err.error_code(), "{err}"))
    }

    fn try_add_child(&mut self, parent: NodeId, node: Node<C>) -> Result<NodeId, TreeError> {
        self.node(parent)?.check_accepts(parent)?;

        let id = NodeId(self.slots.len());
        let kind = node.kind();
        self.slots.push(Some(Slot {
            parent: Some(parent),
            node: Some(node),
        }));
        self.live += 1;
        self.node_mut(parent)?.attach(id);

        tracing::debug!(%parent, child = %id, %kind, "attached node");
        Ok(id)
    }

    /// Destroys `id` and its whole subtree, children first.
    ///
    /// Returns the number of nodes destroyed.
    pub fn remove(&mut self, id: NodeId) -> Result<usize, TreeError> {
        self.try_remove(id)
            .inspect_err(|err| tracing::warn!(node = %id, code = err.error_code(), "{err}"))
    }

    fn try_remove(&mut self, id: NodeId) -> Result<usize, TreeError> {
        if id == self.root {
            return Err(TreeError::RootImmovable(id));
        }
        let parent = self.slot(id)?.parent;
        let doomed = self.subtree(id)?;

        if let Some(parent) = parent {
            self.node_mut(parent)?.detach(id);
        }
        for node in doomed.iter().rev() {
            if let Some(slot) = self.slots.get_mut(node.0) {
                *slot = None;
            }
        }
        self.live -= doomed.len();

        tracing::debug!(node = %id, removed = doomed.len(), "removed subtree");
        Ok(doomed.len())
    }

    /// Re-parents the subtree rooted at `id` under `new_parent`.
    ///
    /// The moved subtree is reset, since its resumption state belonged to
    /// its old position. In a composite the node becomes the last child.
    ///
    /// # Errors
    ///
    /// - [`TreeError::RootImmovable`] if `id` is the root
    /// - [`TreeError::CycleDetected`] if `new_parent` lies inside the subtree
    /// - the same errors as [`add_child`](Self::add_child) for `new_parent`
    pub fn move_to(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), TreeError> {
        self.try_move_to(id, new_parent).inspect_err(|err| {
            tracing::warn!(node = %id, %new_parent, code = err.error_code(), "{err}")
        })
    }

    fn try_move_to(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), TreeError> {
        if id == self.root {
            return Err(TreeError::RootImmovable(id));
        }
        let old_parent = self.slot(id)?.parent;
        if new_parent == id || self.ancestors(new_parent).any(|a| a == id) {
            return Err(TreeError::CycleDetected {
                node: id,
                parent: new_parent,
            });
        }
        self.node(new_parent)?.check_accepts(new_parent)?;

        if let Some(old_parent) = old_parent {
            self.node_mut(old_parent)?.detach(id);
        }
        self.node_mut(new_parent)?.attach(id);
        self.slot_mut(id)?.parent = Some(new_parent);

        tracing::debug!(node = %id, %new_parent, "moved subtree");
        self.reset_subtree(id)
    }

    /// Re-arms every current index, started flag and repeat counter.
    ///
    /// Run this before reusing a tree whose running branch was abandoned.
    pub fn reset(&mut self) {
        for node in self.slots.iter_mut().flatten().filter_map(|slot| slot.node.as_mut()) {
            node.reset();
        }
        tracing::debug!(nodes = self.live, "reset tree");
    }

    /// Like [`reset`](Self::reset), limited to the subtree rooted at `id`.
    pub fn reset_subtree(&mut self, id: NodeId) -> Result<(), TreeError> {
        for node in self.subtree(id)? {
            self.node_mut(node)?.reset();
        }
        Ok(())
    }

    /// Ticks the root once.
    ///
    /// `Failure` is a regular result. An `Err` means the tree is wired
    /// incorrectly, e.g. a decorator without a child was reached.
    pub fn tick(&mut self, ctx: &mut C, delta: f64) -> Result<Status, TreeError> {
        let status = self
            .tick_node(self.root, ctx, delta)
            .inspect_err(|err| tracing::warn!(code = err.error_code(), "tick aborted: {err}"))?;
        if status.is_terminal() {
            tracing::debug!(%status, "root resolved");
        }
        Ok(status)
    }

    /// Ticks the subtree rooted at `id` once.
    pub fn tick_node(&mut self, id: NodeId, ctx: &mut C, delta: f64) -> Result<Status, TreeError> {
        let mut node = self.slot_mut(id)?.node.take().ok_or(TreeError::Reentrant(id))?;

        let result = match &mut node {
            Node::Leaf(leaf) => Ok(leaf.tick(ctx, delta)),
            Node::Sequence(seq) => seq.tick(|child| self.tick_node(child, ctx, delta)),
            Node::Selector(sel) => sel.tick(|child| self.tick_node(child, ctx, delta)),
            Node::Inverter(inv) => inv.tick(id, |child| self.tick_node(child, ctx, delta)),
            Node::Succeeder(suc) => suc.tick(id, |child| self.tick_node(child, ctx, delta)),
            Node::Repeater(rep) => rep.tick(id, |child| self.tick_node(child, ctx, delta)),
            Node::RepeatUntilFail(rep) => rep.tick(id, |child| self.tick_node(child, ctx, delta)),
        };

        if let Ok(status) = &result {
            tracing::trace!(node = %id, kind = %node.kind(), %status, "tick");
        }
        // Put the node back even when a child failed structurally
        if let Ok(slot) = self.slot_mut(id) {
            slot.node = Some(node);
        }
        result
    }

    fn slot(&self, id: NodeId) -> Result<&Slot<C>, TreeError> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(TreeError::NodeNotFound(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot<C>, TreeError> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(TreeError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<C>, TreeError> {
        self.slot_mut(id)?.node.as_mut().ok_or(TreeError::Reentrant(id))
    }

    /// `id` and all of its descendants in pre-order.
    fn subtree(&self, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            order.push(next);
            stack.extend(self.node(next)?.children().iter().rev());
        }
        Ok(order)
    }
}

impl<C> Drop for BehaviorTree<C> {
    fn drop(&mut self) {
        // Children go before their parents, whatever their storage order
        if let Ok(order) = self.subtree(self.root) {
            for id in order.into_iter().rev() {
                if let Some(slot) = self.slots.get_mut(id.0) {
                    *slot = None;
                }
            }
        }
    }
}

impl<C> fmt::Debug for BehaviorTree<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("root", &self.root)
            .field("nodes", &self.live)
            .finish()
    }
}

/// Iterator over the ancestors of a node, nearest first.
pub struct Ancestors<'a, C> {
    tree: &'a BehaviorTree<C>,
    next: Option<NodeId>,
}

impl<C> Iterator for Ancestors<'_, C> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.slot(current).ok().and_then(|slot| slot.parent);
        Some(current)
    }
}

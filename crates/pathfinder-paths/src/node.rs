//! Per-cell search state, kept apart from map topology.
//!
//! A map owns its cells; a [`SearchContext`] owns one [`Node`] per cell with
//! the bookkeeping the search mutates. Nodes refer to each other through
//! [`NodeId`] indexes, never through references.

use crate::traits::Map;

/// Path cost unit.
pub type Cost = i32;

/// Index of a cell in a map's flat storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a flat index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The flat index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Search status of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeStatus {
    #[default]
    Unvisited,
    /// Discovered and waiting in the frontier.
    Open,
    /// Expanded.
    Closed,
}

/// Mutable search bookkeeping for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub(crate) cost_so_far: Cost,
    pub(crate) heuristic: Cost,
    pub(crate) status: NodeStatus,
    pub(crate) predecessor: Option<NodeId>,
}

impl Node {
    /// Accumulated cost from the start (g).
    #[inline]
    pub fn cost_so_far(&self) -> Cost {
        self.cost_so_far
    }

    /// Estimated remaining cost to the goal (h).
    #[inline]
    pub fn heuristic(&self) -> Cost {
        self.heuristic
    }

    /// `g + h`, computed on every read.
    #[inline]
    pub fn total_cost(&self) -> Cost {
        self.cost_so_far + self.heuristic
    }

    #[inline]
    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// Node from which the cheapest known path reaches this one.
    #[inline]
    pub fn predecessor(&self) -> Option<NodeId> {
        self.predecessor
    }

    /// Restore the initial state.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    fn is_pristine(&self) -> bool {
        *self == Self::default()
    }
}

/// Scratch state for one search: a [`Node`] per map cell.
///
/// A context that has been used by a search is *dirty* and must be
/// [`reset`](Self::reset) before the next search; the engine never resets it
/// implicitly. Independent contexts over the same map allow concurrent
/// searches that share only the read-only topology.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    nodes: Vec<Node>,
    dirty: bool,
}

impl SearchContext {
    /// Create a context with `len` pristine nodes.
    pub fn new(len: usize) -> Self {
        Self {
            nodes: vec![Node::default(); len],
            dirty: false,
        }
    }

    /// Create a context sized for `map`.
    pub fn for_map<M: Map + ?Sized>(map: &M) -> Self {
        Self::new(map.node_count())
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node state for `id`, or `None` if `id` is out of range.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Whether a search has run since the last reset.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether every node is in its initial state.
    pub fn is_pristine(&self) -> bool {
        self.nodes.iter().all(Node::is_pristine)
    }

    /// Reset every node and clear the dirty flag.
    pub fn reset(&mut self) {
        self.nodes.iter_mut().for_each(Node::reset);
        self.dirty = false;
    }

    /// Store a precomputed heuristic for `id`. Used by
    /// [`Map::precompute_heuristic`] implementations.
    #[inline]
    pub fn set_heuristic(&mut self, id: NodeId, h: Cost) {
        if let Some(n) = self.nodes.get_mut(id.index()) {
            n.heuristic = h;
        }
    }

    /// Follow predecessors from `end` back to the first node without one,
    /// returning the chain in start-to-end order.
    ///
    /// Stops after `len()` steps, so a corrupted (cyclic) chain cannot loop
    /// forever.
    pub fn backtrace(&self, end: NodeId) -> Vec<NodeId> {
        let mut route = vec![end];
        let mut cur = end;
        while let Some(parent) = self.nodes.get(cur.index()).and_then(|n| n.predecessor) {
            if route.len() >= self.nodes.len() {
                debug_assert!(false, "predecessor chain from {end:?} is cyclic");
                break;
            }
            route.push(parent);
            cur = parent;
        }
        route.reverse();
        route
    }

    #[inline]
    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

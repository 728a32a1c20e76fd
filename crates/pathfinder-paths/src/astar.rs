//! A* search over any [`Map`].

use crate::error::{Endpoint, PathError};
use crate::frontier::Frontier;
use crate::node::{Cost, Node, NodeId, NodeStatus, SearchContext};
use crate::traits::Map;

/// What to do when a cheaper route reaches an already expanded node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReopenPolicy {
    /// Closed nodes stay closed. Optimal whenever the heuristic is
    /// consistent, which holds for every [`HeuristicFunction`](crate::HeuristicFunction)
    /// paired with its matching movement model.
    #[default]
    Never,
    /// Reopen a closed node when a strictly cheaper route to it is found.
    /// Keeps results optimal for admissible but inconsistent heuristics.
    IfCheaper,
}

/// Tunables for [`AStar`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    pub reopen: ReopenPolicy,
    /// Ask the map to fill every heuristic before the loop starts.
    pub precompute_heuristic: bool,
}

impl SearchOptions {
    /// Set the reopen policy (builder).
    pub fn with_reopen(mut self, reopen: ReopenPolicy) -> Self {
        self.reopen = reopen;
        self
    }

    /// Enable or disable heuristic precomputation (builder).
    pub fn with_precomputed_heuristic(mut self, precompute: bool) -> Self {
        self.precompute_heuristic = precompute;
        self
    }
}

/// Result of a search: the ordered cells from start to end.
///
/// An empty path means the end is unreachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<C> {
    coords: Vec<C>,
    nodes: Vec<NodeId>,
    cost: Cost,
    expanded: usize,
}

impl<C> Path<C> {
    fn unreachable(expanded: usize) -> Self {
        Self {
            coords: Vec::new(),
            nodes: Vec::new(),
            cost: 0,
            expanded,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Sum of move costs along the path (0 for empty or single-cell paths).
    #[inline]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Coordinates from start to end.
    #[inline]
    pub fn coords(&self) -> &[C] {
        &self.coords
    }

    /// Node ids from start to end.
    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of nodes removed from the frontier during the search.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    pub fn into_coords(self) -> Vec<C> {
        self.coords
    }
}

/// Frontier key: total cost first, then the smaller heuristic.
#[inline]
fn frontier_key(n: &Node) -> (Cost, Cost) {
    (n.total_cost(), n.heuristic)
}

/// A* search engine.
///
/// Holds the search options and a neighbour buffer that is reused across
/// queries. All per-node state lives in the [`SearchContext`] passed to
/// [`find_path`](Self::find_path).
#[derive(Debug, Clone, Default)]
pub struct AStar {
    options: SearchOptions,
    nbuf: Vec<NodeId>,
}

impl AStar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SearchOptions) -> Self {
        Self {
            options,
            nbuf: Vec::with_capacity(8),
        }
    }

    #[inline]
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
    }

    /// Compute a lowest-cost path from `start` to `end`.
    ///
    /// `ctx` must belong to `map` and be pristine: the engine marks it dirty
    /// and never resets it, so call [`SearchContext::reset`] between
    /// searches. Returns an empty path when `end` is unreachable and
    /// `[start]` when `start == end`. Errors when an endpoint is outside the
    /// map or is an obstacle. A map with no cells yields an empty path for
    /// any query.
    pub fn find_path<M: Map + ?Sized>(
        &mut self,
        map: &M,
        ctx: &mut SearchContext,
        start: M::Coord,
        end: M::Coord,
    ) -> Result<Path<M::Coord>, PathError> {
        if ctx.len() != map.node_count() {
            return Err(PathError::ContextMismatch {
                expected: map.node_count(),
                found: ctx.len(),
            });
        }
        if map.node_count() == 0 {
            return Ok(Path::unreachable(0));
        }

        let start_id = map.node_at(start).ok_or(PathError::OutOfBounds {
            endpoint: Endpoint::Start,
        })?;
        let goal_id = map.node_at(end).ok_or(PathError::OutOfBounds {
            endpoint: Endpoint::End,
        })?;
        if !map.is_accessible(start_id) {
            return Err(PathError::Inaccessible {
                endpoint: Endpoint::Start,
            });
        }
        if !map.is_accessible(goal_id) {
            return Err(PathError::Inaccessible {
                endpoint: Endpoint::End,
            });
        }
        if ctx.is_dirty() {
            return Err(PathError::StaleSearchState);
        }
        debug_assert!(ctx.is_pristine(), "search context modified outside a search");
        ctx.mark_dirty();

        if start_id == goal_id {
            return Ok(Path {
                coords: vec![start],
                nodes: vec![start_id],
                cost: 0,
                expanded: 0,
            });
        }

        let precomputed =
            self.options.precompute_heuristic && map.precompute_heuristic(goal_id, ctx);

        {
            let h = if precomputed {
                ctx.get(start_id).heuristic
            } else {
                map.heuristic(start_id, goal_id)
            };
            let node = ctx.node_mut(start_id);
            node.cost_so_far = 0;
            node.heuristic = h;
            node.predecessor = None;
            node.status = NodeStatus::Open;
        }

        let mut open: Frontier<NodeId, (Cost, Cost)> = Frontier::new();
        open.insert(start_id, frontier_key(ctx.get(start_id)));

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0usize;

        let found = 'search: loop {
            let Some((current, _)) = open.remove_min() else {
                break 'search false;
            };

            ctx.node_mut(current).status = NodeStatus::Closed;
            expanded += 1;

            if current == goal_id {
                break 'search true;
            }

            let current_g = ctx.get(current).cost_so_far;
            log::trace!("expand {:?} g={current_g}", map.coord_of(current));

            nbuf.clear();
            map.neighbors_of(current, &mut nbuf);

            for &next in nbuf.iter() {
                if !map.is_accessible(next) {
                    continue;
                }
                let tentative_g = current_g + map.move_cost(current, next);

                let n = ctx.node_mut(next);
                match n.status {
                    NodeStatus::Closed => {
                        let reopen = self.options.reopen == ReopenPolicy::IfCheaper;
                        if !reopen || tentative_g >= n.cost_so_far {
                            continue;
                        }
                        n.cost_so_far = tentative_g;
                        n.predecessor = Some(current);
                        n.status = NodeStatus::Open;
                        open.insert(next, frontier_key(n));
                    }
                    NodeStatus::Open => {
                        if tentative_g >= n.cost_so_far {
                            continue;
                        }
                        n.cost_so_far = tentative_g;
                        n.predecessor = Some(current);
                        open.reinsert(next, frontier_key(n));
                    }
                    NodeStatus::Unvisited => {
                        if !precomputed {
                            n.heuristic = map.heuristic(next, goal_id);
                        }
                        n.cost_so_far = tentative_g;
                        n.predecessor = Some(current);
                        n.status = NodeStatus::Open;
                        open.insert(next, frontier_key(n));
                    }
                }
            }
        };

        self.nbuf = nbuf;

        if !found {
            log::debug!("no path from {start:?} to {end:?} ({expanded} nodes expanded)");
            return Ok(Path::unreachable(expanded));
        }

        let nodes = ctx.backtrace(goal_id);
        let coords = nodes.iter().map(|&id| map.coord_of(id)).collect();
        let cost = ctx.get(goal_id).cost_so_far;
        log::debug!("path from {start:?} to {end:?}: cost {cost}, {expanded} nodes expanded");

        Ok(Path {
            coords,
            nodes,
            cost,
            expanded,
        })
    }
}

/// Find a path with default [`SearchOptions`].
pub fn find_path<M: Map + ?Sized>(
    map: &M,
    ctx: &mut SearchContext,
    start: M::Coord,
    end: M::Coord,
) -> Result<Path<M::Coord>, PathError> {
    AStar::new().find_path(map, ctx, start, end)
}

/// Find a path with the given options.
pub fn find_path_with<M: Map + ?Sized>(
    map: &M,
    ctx: &mut SearchContext,
    start: M::Coord,
    end: M::Coord,
    options: SearchOptions,
) -> Result<Path<M::Coord>, PathError> {
    AStar::with_options(options).find_path(map, ctx, start, end)
}

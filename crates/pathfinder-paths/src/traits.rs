use pathfinder_core::Coordinates;

use crate::node::{Cost, NodeId, SearchContext};

/// Geometric and costing knowledge about a searchable map.
///
/// A map addresses its cells by [`NodeId`] (a flat index in
/// `0..node_count()`). It reports adjacency, edge weights and heuristic
/// estimates; it knows nothing about A* itself. Obstacles are still reported
/// as neighbours: the search filters them with [`is_accessible`](Self::is_accessible).
pub trait Map {
    /// Coordinate type used at the boundary.
    type Coord: Coordinates;

    /// Number of cells.
    fn node_count(&self) -> usize;

    /// The cell at `coord`, or `None` if out of bounds.
    fn node_at(&self, coord: Self::Coord) -> Option<NodeId>;

    /// Coordinate of the cell `id`.
    fn coord_of(&self, id: NodeId) -> Self::Coord;

    /// Whether `id` may be entered.
    fn is_accessible(&self, id: NodeId) -> bool;

    /// Append the in-bounds neighbours of `id` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors_of(&self, id: NodeId, buf: &mut Vec<NodeId>);

    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn move_cost(&self, from: NodeId, to: NodeId) -> Cost;

    /// Estimate of the cost from `id` to `goal`.
    /// Must never overestimate the true cost (admissible).
    fn heuristic(&self, id: NodeId, goal: NodeId) -> Cost;

    /// Optionally fill every node's heuristic for `goal` ahead of the search.
    ///
    /// Returns `true` if `ctx` now holds the heuristic of every node. The
    /// default computes nothing and returns `false`, in which case the search
    /// calls [`heuristic`](Self::heuristic) as nodes are discovered.
    fn precompute_heuristic(&self, goal: NodeId, ctx: &mut SearchContext) -> bool {
        let _ = (goal, ctx);
        false
    }
}

use std::collections::VecDeque;

use crate::node::{Cost, NodeId};
use crate::traits::Map;

/// Sentinel value meaning "unreachable" in distance maps.
pub const UNREACHABLE: Cost = Cost::MAX;

/// Per-node distances produced by [`bfs_map`] or [`dijkstra_map`](crate::dijkstra_map).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    pub(crate) costs: Vec<Cost>,
    pub(crate) reached: Vec<NodeId>,
}

impl DistanceMap {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            costs: vec![UNREACHABLE; len],
            reached: Vec::new(),
        }
    }

    /// Distance to `id`, or [`UNREACHABLE`].
    #[inline]
    pub fn at(&self, id: NodeId) -> Cost {
        self.costs.get(id.index()).copied().unwrap_or(UNREACHABLE)
    }

    /// Distance to `id`, or `None` if it was not reached.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<Cost> {
        Some(self.at(id)).filter(|&c| c != UNREACHABLE)
    }

    /// Reached nodes in the order they were settled.
    #[inline]
    pub fn reached(&self) -> &[NodeId] {
        &self.reached
    }
}

/// Compute a multi-source breadth-first step-count map.
///
/// Every step counts 1 regardless of [`Map::move_cost`]. Inaccessible
/// nodes are never entered (inaccessible sources are ignored). Expansion
/// stops when the distance would exceed `max_steps`.
pub fn bfs_map<M: Map + ?Sized>(map: &M, sources: &[NodeId], max_steps: Cost) -> DistanceMap {
    let mut dist = DistanceMap::new(map.node_count());
    let mut queue: VecDeque<NodeId> = VecDeque::new();

    for &src in sources {
        if src.index() >= dist.costs.len() || !map.is_accessible(src) {
            continue;
        }
        if dist.costs[src.index()] != UNREACHABLE {
            continue;
        }
        dist.costs[src.index()] = 0;
        queue.push_back(src);
        dist.reached.push(src);
    }

    let mut nbuf = Vec::with_capacity(8);

    while let Some(current) = queue.pop_front() {
        let next_dist = dist.costs[current.index()] + 1;
        if next_dist > max_steps {
            continue;
        }

        nbuf.clear();
        map.neighbors_of(current, &mut nbuf);

        for &n in nbuf.iter() {
            if !map.is_accessible(n) || dist.costs[n.index()] != UNREACHABLE {
                continue;
            }
            dist.costs[n.index()] = next_dist;
            queue.push_back(n);
            dist.reached.push(n);
        }
    }

    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Grid;
    use pathfinder_core::Point;

    fn id(g: &Grid, x: i32, y: i32) -> NodeId {
        g.node_at(Point::new(x, y)).unwrap()
    }

    #[test]
    fn open_grid_distances_are_manhattan() {
        let g = Grid::new(4, 3);
        let d = bfs_map(&g, &[id(&g, 0, 0)], UNREACHABLE - 1);
        assert_eq!(d.reached().len(), 12);
        for p in g.bounds() {
            assert_eq!(d.at(g.node_at(p).unwrap()), p.x + p.y);
        }
    }

    #[test]
    fn walls_block_and_detour() {
        let g = Grid::from_ascii(
            "\
...
##.
...",
        )
        .unwrap();
        let d = bfs_map(&g, &[id(&g, 0, 0)], 100);
        assert_eq!(d.get(id(&g, 0, 1)), None);
        assert_eq!(d.at(id(&g, 0, 2)), 6);
    }

    #[test]
    fn max_steps_limits_expansion() {
        let g = Grid::new(10, 1);
        let d = bfs_map(&g, &[id(&g, 0, 0)], 3);
        assert_eq!(d.reached().len(), 4);
        assert_eq!(d.get(id(&g, 4, 0)), None);
    }

    #[test]
    fn multiple_and_blocked_sources() {
        let g = Grid::with_obstacles(5, 1, [Point::new(2, 0)]);
        let d = bfs_map(&g, &[id(&g, 0, 0), id(&g, 4, 0), id(&g, 2, 0)], 10);
        assert_eq!(d.at(id(&g, 1, 0)), 1);
        assert_eq!(d.at(id(&g, 3, 0)), 1);
        assert_eq!(d.get(id(&g, 2, 0)), None);
    }
}

use crate::astar::{AStar, Path, SearchOptions};
use crate::error::PathError;
use crate::node::{Node, SearchContext};
use crate::traits::Map;

/// A map together with the search state of its cells.
///
/// `Pathfinder` owns the map exclusively and keeps one [`SearchContext`]
/// sized for it, so cell state survives between queries for inspection
/// and must be cleared with [`reset_search_state`](Self::reset_search_state)
/// before the next [`find_path`](Self::find_path).
#[derive(Debug, Clone)]
pub struct Pathfinder<M: Map> {
    map: M,
    search: SearchContext,
    engine: AStar,
}

impl<M: Map> Pathfinder<M> {
    /// Take ownership of `map` with default [`SearchOptions`].
    pub fn new(map: M) -> Self {
        Self::with_options(map, SearchOptions::default())
    }

    pub fn with_options(map: M, options: SearchOptions) -> Self {
        let search = SearchContext::for_map(&map);
        Self {
            map,
            search,
            engine: AStar::with_options(options),
        }
    }

    /// Find a lowest-cost path from `start` to `end`.
    ///
    /// Fails with [`PathError::StaleSearchState`] if the previous search was
    /// not followed by [`reset_search_state`](Self::reset_search_state).
    pub fn find_path(
        &mut self,
        start: M::Coord,
        end: M::Coord,
    ) -> Result<Path<M::Coord>, PathError> {
        self.engine.find_path(&self.map, &mut self.search, start, end)
    }

    /// Clear every cell's status, costs and predecessor.
    pub fn reset_search_state(&mut self) {
        self.search.reset();
    }

    /// Whether a search ran since the last reset.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.search.is_dirty()
    }

    /// Search state of the cell at `coord`.
    pub fn node(&self, coord: M::Coord) -> Option<&Node> {
        self.map.node_at(coord).and_then(|id| self.search.node(id))
    }

    #[inline]
    pub fn map(&self) -> &M {
        &self.map
    }

    /// Mutable access to the map, e.g. to move obstacles between searches.
    ///
    /// The cell count must not change.
    #[inline]
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    /// A fresh context for an independent search over the same map.
    pub fn new_search_context(&self) -> SearchContext {
        SearchContext::for_map(&self.map)
    }

    #[inline]
    pub fn options(&self) -> SearchOptions {
        self.engine.options()
    }

    pub fn set_options(&mut self, options: SearchOptions) {
        self.engine.set_options(options);
    }

    /// Give back the map.
    pub fn into_map(self) -> M {
        self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::find_path;
    use crate::node::NodeStatus;
    use crate::{Grid, GridConfig, ReopenPolicy};
    use pathfinder_core::Point;
    use std::thread;

    #[test]
    fn repeated_searches_need_reset() {
        let mut pf = Pathfinder::new(Grid::new(5, 5));
        let a = pf.find_path(Point::new(0, 0), Point::new(4, 4)).unwrap();
        assert_eq!(a.cost(), 80);
        assert!(pf.is_dirty());
        assert_eq!(
            pf.find_path(Point::new(0, 0), Point::new(4, 4)),
            Err(PathError::StaleSearchState)
        );
        pf.reset_search_state();
        let b = pf.find_path(Point::new(0, 0), Point::new(4, 4)).unwrap();
        assert_eq!(a.cost(), b.cost());
    }

    #[test]
    fn cell_state_is_inspectable_after_search() {
        let mut pf = Pathfinder::new(Grid::new(4, 1));
        pf.find_path(Point::new(0, 0), Point::new(3, 0)).unwrap();
        let end = pf.node(Point::new(3, 0)).unwrap();
        assert_eq!(end.status(), NodeStatus::Closed);
        assert_eq!(end.cost_so_far(), 30);
        assert_eq!(end.total_cost(), 30);
        let first = pf.node(Point::new(1, 0)).unwrap();
        assert_eq!(first.predecessor(), pf.map().node_at(Point::new(0, 0)));
        assert!(pf.node(Point::new(4, 0)).is_none());

        pf.reset_search_state();
        assert_eq!(pf.node(Point::new(3, 0)), Some(&Node::default()));
    }

    #[test]
    fn obstacles_can_change_between_searches() {
        let mut pf = Pathfinder::new(Grid::new(3, 3));
        let direct = pf.find_path(Point::new(0, 1), Point::new(2, 1)).unwrap();
        assert_eq!(direct.len(), 3);

        pf.reset_search_state();
        pf.map_mut().set_accessible(Point::new(1, 1), false);
        let detour = pf.find_path(Point::new(0, 1), Point::new(2, 1)).unwrap();
        assert_eq!(detour.len(), 5);
        assert!(!detour.coords().contains(&Point::new(1, 1)));
    }

    #[test]
    fn independent_contexts_search_concurrently() {
        let config = GridConfig::default().with_diagonal_moves(true);
        let grid = Grid::with_config(30, 30, config).unwrap();
        let pf = Pathfinder::new(grid);
        let map = pf.map();
        let costs: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let mut ctx = pf.new_search_context();
                    scope.spawn(move || {
                        find_path(map, &mut ctx, Point::new(0, i), Point::new(29, 29))
                            .map(|p| p.cost())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for (i, cost) in costs.into_iter().enumerate() {
            let i = i as i32;
            assert_eq!(cost, Ok((29 - i) * 14 + i * 10));
        }
        // The owned context was never touched.
        assert!(!pf.is_dirty());
    }

    #[test]
    fn options_are_forwarded() {
        let options = SearchOptions::default()
            .with_reopen(ReopenPolicy::IfCheaper)
            .with_precomputed_heuristic(true);
        let mut pf = Pathfinder::with_options(Grid::new(6, 6), options);
        assert_eq!(pf.options(), options);
        let path = pf.find_path(Point::new(0, 0), Point::new(5, 5)).unwrap();
        assert_eq!(path.cost(), 100);
        // Precomputation filled cells the search never reached.
        assert_eq!(pf.node(Point::new(0, 5)).unwrap().heuristic(), 50);
        assert_eq!(pf.into_map().node_count(), 36);
    }
}

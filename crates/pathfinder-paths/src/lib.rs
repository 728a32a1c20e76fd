//! Lowest-cost paths on obstacle grids and other maps.
//!
//! The crate is built from a few small pieces:
//!
//! - [`Map`]: neighbour generation, move costs and heuristic estimates.
//!   [`Grid`] implements it for rectangular grids with 4-way or 8-way moves.
//! - [`SearchContext`]: per-cell search state ([`Node`]), kept apart from the
//!   map so that one map can serve several independent searches.
//! - [`Frontier`]: the open list, a sequence kept sorted by key.
//! - [`AStar`]: the search loop tying them together.
//! - [`Pathfinder`]: a map owning its search state, for the common
//!   single-search case.
//!
//! ```
//! use pathfinder_core::Point;
//! use pathfinder_paths::{Grid, Pathfinder};
//!
//! let grid = Grid::from_ascii(
//!     "\
//! ..#..
//! ..#..
//! .....",
//! )
//! .unwrap();
//! let mut pf = Pathfinder::new(grid);
//! let path = pf.find_path(Point::new(0, 0), Point::new(4, 0)).unwrap();
//! assert_eq!(path.len(), 9);
//! pf.reset_search_state();
//! ```
//!
//! Distance maps ([`bfs_map`], [`dijkstra_map`]) answer reachability
//! questions over the same [`Map`] abstraction.

mod astar;
mod bfs;
mod dijkstra;
mod distance;
mod error;
mod frontier;
mod grid;
mod neighbors;
mod node;
mod pathfinder;
mod traits;

pub use astar::{AStar, Path, ReopenPolicy, SearchOptions, find_path, find_path_with};
pub use bfs::{DistanceMap, UNREACHABLE, bfs_map};
pub use dijkstra::dijkstra_map;
pub use distance::{HeuristicFunction, MoveCosts, chebyshev, manhattan};
pub use error::{ConfigError, Endpoint, LayoutError, PathError};
pub use frontier::Frontier;
pub use grid::{Cell, FLOOR, Grid, GridConfig, OBSTACLE};
pub use neighbors::{ALL as ALL_DIRECTIONS, CARDINAL as CARDINAL_DIRECTIONS, adjacent};
pub use node::{Cost, Node, NodeId, NodeStatus, SearchContext};
pub use pathfinder::Pathfinder;
pub use traits::Map;

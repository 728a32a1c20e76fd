//! A rectangular obstacle grid implementing [`Map`].
//!
//! Cells are created once, when the grid is built, and owned by its
//! [`Matrix`]. A cell's flat index is its [`NodeId`].

use std::fmt;

use pathfinder_core::{Matrix, Point, Range};

use crate::distance::{HeuristicFunction, MoveCosts};
use crate::error::{ConfigError, LayoutError};
use crate::neighbors;
use crate::node::{Cost, NodeId, SearchContext};
use crate::traits::Map;

/// Character for an obstacle in textual layouts.
pub const OBSTACLE: char = '#';
/// Character for an accessible cell in textual layouts.
pub const FLOOR: char = '.';

/// Static per-cell data: position and accessibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    coord: Point,
    accessible: bool,
}

impl Cell {
    #[inline]
    pub fn coord(&self) -> Point {
        self.coord
    }

    /// `false` if the cell is an obstacle.
    #[inline]
    pub fn is_accessible(&self) -> bool {
        self.accessible
    }
}

/// Movement model and costing for a [`Grid`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGridConfig")
)]
pub struct GridConfig {
    /// Allow the four diagonal steps in addition to the cardinal ones.
    pub allows_diagonal_moves: bool,
    pub costs: MoveCosts,
    /// `None` picks [`HeuristicFunction::for_moves`].
    pub heuristic: Option<HeuristicFunction>,
}

impl GridConfig {
    /// Enable or disable diagonal moves (builder).
    pub fn with_diagonal_moves(mut self, allow: bool) -> Self {
        self.allows_diagonal_moves = allow;
        self
    }

    /// Set the move costs (builder).
    pub fn with_costs(mut self, costs: MoveCosts) -> Self {
        self.costs = costs;
        self
    }

    /// Force a heuristic function (builder).
    pub fn with_heuristic(mut self, heuristic: HeuristicFunction) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    /// The heuristic function in effect.
    pub fn heuristic_function(&self) -> HeuristicFunction {
        self.heuristic
            .unwrap_or_else(|| HeuristicFunction::for_moves(self.allows_diagonal_moves))
    }

    /// Check the move costs. An inadmissible heuristic is accepted but
    /// logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.costs.validate()?;
        self.warn_if_inadmissible();
        Ok(())
    }

    fn warn_if_inadmissible(&self) {
        let h = self.heuristic_function();
        if !h.is_admissible(self.allows_diagonal_moves, self.costs) {
            log::warn!(
                "{h:?} heuristic overestimates with {:?} and diagonal moves; \
                 paths may not be shortest",
                self.costs
            );
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGridConfig {
    allows_diagonal_moves: bool,
    costs: MoveCosts,
    heuristic: Option<HeuristicFunction>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGridConfig> for GridConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGridConfig) -> Result<Self, ConfigError> {
        let config = Self {
            allows_diagonal_moves: raw.allows_diagonal_moves,
            costs: raw.costs,
            heuristic: raw.heuristic,
        };
        config.validate()?;
        Ok(config)
    }
}

/// A `width × height` grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGrid")
)]
pub struct Grid {
    cells: Matrix<Cell>,
    config: GridConfig,
}

impl Grid {
    /// Create a grid with every cell accessible and the default
    /// configuration (4-way moves).
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            cells: Matrix::from_fn(width, height, |coord| Cell {
                coord,
                accessible: true,
            }),
            config: GridConfig::default(),
        }
    }

    /// Create an open grid with the given configuration.
    pub fn with_config(width: i32, height: i32, config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut grid = Self::new(width, height);
        grid.config = config;
        Ok(grid)
    }

    /// Create a grid where every listed position is an obstacle.
    /// Out-of-bounds positions are ignored.
    pub fn with_obstacles(
        width: i32,
        height: i32,
        obstacles: impl IntoIterator<Item = Point>,
    ) -> Self {
        let mut grid = Self::new(width, height);
        for p in obstacles {
            grid.set_accessible(p, false);
        }
        grid
    }

    /// Create a grid from rows of accessibility flags (`true` = accessible).
    /// Every row must have the same length.
    pub fn from_layout<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, LayoutError> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        for (line, row) in rows.iter().enumerate() {
            let found = row.as_ref().len();
            if found != width {
                return Err(LayoutError::InconsistentWidth {
                    line,
                    expected: width,
                    found,
                });
            }
        }
        let mut grid = Self::new(width as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            for (x, &accessible) in row.as_ref().iter().enumerate() {
                grid.set_accessible(Point::new(x as i32, y as i32), accessible);
            }
        }
        Ok(grid)
    }

    /// Parse a textual layout: one line per row, [`OBSTACLE`] for blocked
    /// cells and [`FLOOR`] for accessible ones.
    ///
    /// Leading and trailing whitespace of the whole string is trimmed, and
    /// a trailing `'\r'` on each line is ignored.
    pub fn from_ascii(s: &str) -> Result<Self, LayoutError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::new(0, 0));
        }
        let mut rows: Vec<Vec<bool>> = Vec::new();
        for (y, line) in s.lines().enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let row = line
                .chars()
                .enumerate()
                .map(|(x, ch)| match ch {
                    OBSTACLE => Ok(false),
                    FLOOR => Ok(true),
                    _ => Err(LayoutError::InvalidRune {
                        ch,
                        pos: Point::new(x as i32, y as i32),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_layout(&rows)
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: GridConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[inline]
    pub fn allows_diagonal_moves(&self) -> bool {
        self.config.allows_diagonal_moves
    }

    /// Switch between 4-way and 8-way movement.
    pub fn set_allows_diagonal_moves(&mut self, allow: bool) {
        self.config.allows_diagonal_moves = allow;
        self.config.warn_if_inadmissible();
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.cells.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.cells.height()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.cells.bounds()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.cells.contains(p)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.cells.get(p)
    }

    /// Whether `p` is in bounds and accessible.
    #[inline]
    pub fn is_accessible_at(&self, p: Point) -> bool {
        self.cell(p).is_some_and(Cell::is_accessible)
    }

    /// Mark `p` accessible or blocked. Returns `false` if `p` is out of
    /// bounds.
    pub fn set_accessible(&mut self, p: Point, accessible: bool) -> bool {
        match self.cells.get_mut(p) {
            Some(cell) => {
                cell.accessible = accessible;
                true
            }
            None => false,
        }
    }

    /// Row-major iterator over all cells.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.as_slice().iter()
    }

    /// Cost of walking `path`, summing [`Map::move_cost`] over consecutive
    /// pairs. Positions outside the grid contribute nothing.
    pub fn path_cost(&self, path: &[Point]) -> Cost {
        path.windows(2)
            .filter_map(|w| Some(self.move_cost(self.node_at(w[0])?, self.node_at(w[1])?)))
            .sum()
    }

    #[inline]
    fn cost_between(&self, a: Point, b: Point) -> Cost {
        if a.is_diagonal_to(b) {
            self.config.costs.diagonal
        } else {
            self.config.costs.orthogonal
        }
    }
}

impl Map for Grid {
    type Coord = Point;

    #[inline]
    fn node_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn node_at(&self, coord: Point) -> Option<NodeId> {
        self.cells.index(coord).map(NodeId::new)
    }

    #[inline]
    fn coord_of(&self, id: NodeId) -> Point {
        self.cells.point(id.index())
    }

    #[inline]
    fn is_accessible(&self, id: NodeId) -> bool {
        self.cells.at_index(id.index()).is_some_and(Cell::is_accessible)
    }

    fn neighbors_of(&self, id: NodeId, buf: &mut Vec<NodeId>) {
        let p = self.coord_of(id);
        buf.extend(
            neighbors::adjacent(p, self.config.allows_diagonal_moves, |n| self.contains(n))
                .filter_map(|n| self.node_at(n)),
        );
    }

    #[inline]
    fn move_cost(&self, from: NodeId, to: NodeId) -> Cost {
        self.cost_between(self.coord_of(from), self.coord_of(to))
    }

    #[inline]
    fn heuristic(&self, id: NodeId, goal: NodeId) -> Cost {
        self.config.heuristic_function().estimate(
            self.coord_of(id),
            self.coord_of(goal),
            self.config.costs,
        )
    }

    fn precompute_heuristic(&self, goal: NodeId, ctx: &mut SearchContext) -> bool {
        let h = self.config.heuristic_function();
        let target = self.coord_of(goal);
        for (i, cell) in self.cells.as_slice().iter().enumerate() {
            ctx.set_heuristic(NodeId::new(i), h.estimate(cell.coord, target, self.config.costs));
        }
        true
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    cells: Matrix<Cell>,
    config: GridConfig,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = LayoutError;

    fn try_from(raw: RawGrid) -> Result<Self, LayoutError> {
        for (index, cell) in raw.cells.as_slice().iter().enumerate() {
            let expected = raw.cells.point(index);
            if cell.coord != expected {
                return Err(LayoutError::MisplacedCell {
                    index,
                    expected,
                    found: cell.coord,
                });
            }
        }
        Ok(Self {
            cells: raw.cells,
            config: raw.config,
        })
    }
}

impl fmt::Display for Grid {
    /// Writes the layout in the format read by [`Grid::from_ascii`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width() {
                let ch = if self.is_accessible_at(Point::new(x, y)) {
                    FLOOR
                } else {
                    OBSTACLE
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
#####
#...#
#.#.#
#...#
#####";

    fn neighbors(grid: &Grid, p: Point) -> Vec<Point> {
        let mut buf = Vec::new();
        grid.neighbors_of(grid.node_at(p).unwrap(), &mut buf);
        buf.into_iter().map(|id| grid.coord_of(id)).collect()
    }

    #[test]
    fn cell_count_matches_dimensions() {
        let g = Grid::new(7, 3);
        assert_eq!(g.node_count(), 21);
        for p in g.bounds() {
            let id = g.node_at(p).unwrap();
            assert_eq!(g.coord_of(id), p);
            assert_eq!(g.cell(p).unwrap().coord(), p);
        }
    }

    #[test]
    fn corner_neighbors_skip_out_of_bounds() {
        let g = Grid::new(3, 3);
        assert_eq!(
            neighbors(&g, Point::new(0, 0)),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );

        let g = Grid::with_config(3, 3, GridConfig::default().with_diagonal_moves(true)).unwrap();
        assert_eq!(
            neighbors(&g, Point::new(0, 0)),
            vec![Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)]
        );
        assert_eq!(neighbors(&g, Point::new(1, 1)).len(), 8);
    }

    #[test]
    fn obstacles_are_still_reported_as_neighbors() {
        let g = Grid::with_obstacles(3, 1, [Point::new(1, 0)]);
        let n = neighbors(&g, Point::new(0, 0));
        assert_eq!(n, vec![Point::new(1, 0)]);
        assert!(!g.is_accessible(g.node_at(Point::new(1, 0)).unwrap()));
    }

    #[test]
    fn move_costs() {
        let g = Grid::new(3, 3);
        let c = g.node_at(Point::new(1, 1)).unwrap();
        let right = g.node_at(Point::new(2, 1)).unwrap();
        let corner = g.node_at(Point::new(2, 2)).unwrap();
        assert_eq!(g.move_cost(c, right), 10);
        assert_eq!(g.move_cost(c, corner), 14);
    }

    #[test]
    fn heuristic_follows_movement_model() {
        let mut g = Grid::new(5, 5);
        let a = g.node_at(Point::new(0, 0)).unwrap();
        let b = g.node_at(Point::new(4, 2)).unwrap();
        assert_eq!(g.heuristic(a, b), 60);
        g.set_allows_diagonal_moves(true);
        assert_eq!(g.heuristic(a, b), 2 * 14 + 2 * 10);
    }

    #[test]
    fn precompute_fills_every_node() {
        let g = Grid::new(4, 4);
        let goal = g.node_at(Point::new(3, 3)).unwrap();
        let mut ctx = SearchContext::for_map(&g);
        assert!(g.precompute_heuristic(goal, &mut ctx));
        for i in 0..g.node_count() {
            let id = NodeId::new(i);
            assert_eq!(ctx.node(id).unwrap().heuristic(), g.heuristic(id, goal));
        }
    }

    #[test]
    fn invalid_costs_rejected() {
        let cfg = GridConfig::default().with_costs(MoveCosts {
            orthogonal: 14,
            diagonal: 10,
        });
        assert!(Grid::with_config(3, 3, cfg).is_err());
        let mut g = Grid::new(2, 2);
        assert!(g.set_config(cfg).is_err());
        assert_eq!(g.config(), &GridConfig::default());
    }

    #[test]
    fn ascii_round_trip() {
        let g = Grid::from_ascii(ROOM).unwrap();
        assert_eq!((g.width(), g.height()), (5, 5));
        assert!(!g.is_accessible_at(Point::new(0, 0)));
        assert!(g.is_accessible_at(Point::new(1, 1)));
        assert!(!g.is_accessible_at(Point::new(2, 2)));
        assert_eq!(g.to_string(), ROOM);
    }

    #[test]
    fn ascii_rejects_bad_input() {
        assert_eq!(
            Grid::from_ascii("..\n..x"),
            Err(LayoutError::InvalidRune {
                ch: 'x',
                pos: Point::new(2, 1)
            })
        );
        assert_eq!(
            Grid::from_ascii("...\n.."),
            Err(LayoutError::InconsistentWidth {
                line: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn layout_rows() {
        let g = Grid::from_layout(&[[true, false], [true, true]]).unwrap();
        assert!(!g.is_accessible_at(Point::new(1, 0)));
        assert!(g.is_accessible_at(Point::new(1, 1)));
    }

    #[test]
    fn set_accessible_out_of_bounds() {
        let mut g = Grid::new(2, 2);
        assert!(!g.set_accessible(Point::new(5, 5), false));
        assert!(g.cells().all(Cell::is_accessible));
        assert!(!g.is_accessible_at(Point::new(-1, 0)));
    }

    #[test]
    fn zero_size_grid() {
        let g = Grid::new(0, 0);
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.node_at(Point::ZERO), None);
        assert_eq!(Grid::from_ascii("  \n").unwrap().node_count(), 0);
    }

    #[test]
    fn path_cost_sums_steps() {
        let g = Grid::new(3, 3);
        let path = [Point::new(0, 0), Point::new(1, 1), Point::new(1, 2)];
        assert_eq!(g.path_cost(&path), 24);
        assert_eq!(g.path_cost(&path[..1]), 0);
    }
}

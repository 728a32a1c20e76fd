//! Shared scenario model for the text-mode demos.
//!
//! A scenario is a [`Grid`] plus a start and an end. Scenarios are read from
//! the usual `#`/`.` layout with one `S` and one `E` marker, or generated at
//! random, and solved paths are drawn back onto the layout as `*`.

use std::fmt;

use pathfinder_core::Point;
use pathfinder_paths::{
    ConfigError, FLOOR, Grid, GridConfig, LayoutError, Path, PathError, Pathfinder,
};
use rand::Rng;

pub const START: char = 'S';
pub const END: char = 'E';
pub const STEP: char = '*';

/// Built-in layout used when no map file is given.
pub const SAMPLE: &str = "\
S.........#.........
.########.#.######..
.#......#.#......#..
.#.####.#.####.#.#..
.#.#....#......#.#..
.#.#.######.####.#..
...#.........#...#.E";

/// A grid with a start and an end.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub grid: Grid,
    pub start: Point,
    pub end: Point,
}

impl Scenario {
    /// Parse a layout containing exactly one [`START`] and one [`END`].
    pub fn parse(s: &str, config: GridConfig) -> Result<Self, ScenarioError> {
        let mut start = None;
        let mut end = None;
        let mut layout = String::with_capacity(s.len());
        for (y, line) in s.trim().lines().enumerate() {
            if y > 0 {
                layout.push('\n');
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match ch {
                    START => {
                        if start.replace(p).is_some() {
                            return Err(ScenarioError::DuplicateMarker(START));
                        }
                        layout.push(FLOOR);
                    }
                    END => {
                        if end.replace(p).is_some() {
                            return Err(ScenarioError::DuplicateMarker(END));
                        }
                        layout.push(FLOOR);
                    }
                    _ => layout.push(ch),
                }
            }
        }
        let mut grid = Grid::from_ascii(&layout)?;
        grid.set_config(config)?;
        Ok(Self {
            grid,
            start: start.ok_or(ScenarioError::MissingMarker(START))?,
            end: end.ok_or(ScenarioError::MissingMarker(END))?,
        })
    }

    /// A `width × height` grid where each cell is blocked with probability
    /// `density`, going from the top-left to the bottom-right corner.
    pub fn random(
        rng: &mut impl Rng,
        width: i32,
        height: i32,
        density: f64,
        config: GridConfig,
    ) -> Result<Self, ConfigError> {
        let mut grid = Grid::with_config(width, height, config)?;
        for p in grid.bounds() {
            if rng.random_bool(density) {
                grid.set_accessible(p, false);
            }
        }
        let start = Point::new(0, 0);
        let end = Point::new(width - 1, height - 1);
        grid.set_accessible(start, true);
        grid.set_accessible(end, true);
        Ok(Self { grid, start, end })
    }

    /// Search for a path from start to end.
    pub fn solve(&self) -> Result<Path<Point>, PathError> {
        Pathfinder::new(self.grid.clone()).find_path(self.start, self.end)
    }

    /// Draw the layout with `path` and the markers on top.
    pub fn render(&self, path: &[Point]) -> String {
        let mut rows: Vec<Vec<char>> = self
            .grid
            .to_string()
            .lines()
            .map(|l| l.chars().collect())
            .collect();
        let mut put = |p: Point, ch: char| {
            if let Some(c) = rows
                .get_mut(p.y as usize)
                .and_then(|row| row.get_mut(p.x as usize))
            {
                *c = ch;
            }
        };
        for &p in path {
            put(p, STEP);
        }
        put(self.start, START);
        put(self.end, END);
        rows.into_iter()
            .map(|r| r.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Errors that can occur when reading a scenario.
#[derive(Debug, Clone)]
pub enum ScenarioError {
    MissingMarker(char),
    DuplicateMarker(char),
    Layout(LayoutError),
    Config(ConfigError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMarker(ch) => write!(f, "scenario has no \u{201c}{ch}\u{201d} marker"),
            Self::DuplicateMarker(ch) => {
                write!(f, "scenario has more than one \u{201c}{ch}\u{201d} marker")
            }
            Self::Layout(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LayoutError> for ScenarioError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl From<ConfigError> for ScenarioError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_paths::OBSTACLE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sample_is_solvable() {
        let sc = Scenario::parse(SAMPLE, GridConfig::default()).unwrap();
        assert_eq!(sc.start, Point::new(0, 0));
        assert_eq!(sc.end, Point::new(19, 6));
        let path = sc.solve().unwrap();
        assert!(!path.is_empty());
        assert_eq!(path.coords()[0], sc.start);
        assert_eq!(*path.coords().last().unwrap(), sc.end);
    }

    #[test]
    fn render_marks_path_and_endpoints() {
        let sc = Scenario::parse("S.#\n..E", GridConfig::default()).unwrap();
        let path = sc.solve().unwrap();
        let out = sc.render(path.coords());
        assert_eq!(out, "S*#\n.*E");
        assert_eq!(out.chars().filter(|&c| c == OBSTACLE).count(), 1);
    }

    #[test]
    fn markers_are_required_once() {
        assert!(matches!(
            Scenario::parse("S..", GridConfig::default()),
            Err(ScenarioError::MissingMarker(END))
        ));
        assert!(matches!(
            Scenario::parse("S.S\n..E", GridConfig::default()),
            Err(ScenarioError::DuplicateMarker(START))
        ));
        assert!(matches!(
            Scenario::parse("S.?\n..E", GridConfig::default()),
            Err(ScenarioError::Layout(_))
        ));
    }

    #[test]
    fn random_scenario_keeps_corners_open() {
        let mut rng = StdRng::seed_from_u64(1);
        let sc = Scenario::random(&mut rng, 12, 8, 0.9, GridConfig::default()).unwrap();
        assert!(sc.grid.is_accessible_at(sc.start));
        assert!(sc.grid.is_accessible_at(Point::new(11, 7)));
        // Heavily blocked maps are often unsolvable; that is not an error.
        assert!(sc.solve().is_ok());
    }
}

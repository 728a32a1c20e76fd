//! Error types for map construction and path queries.

use std::fmt;

use pathfinder_core::Point;

use crate::node::Cost;

/// Which end of a path query an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Errors returned by a path query.
///
/// An unreachable goal is not an error; it yields an empty path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The endpoint lies outside the map.
    OutOfBounds { endpoint: Endpoint },
    /// The endpoint is an obstacle.
    Inaccessible { endpoint: Endpoint },
    /// The search context still holds state from a previous search and was
    /// not reset.
    StaleSearchState,
    /// The search context was built for a map with a different cell count.
    ContextMismatch { expected: usize, found: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { endpoint } => write!(f, "{endpoint} position is outside the map"),
            Self::Inaccessible { endpoint } => write!(f, "{endpoint} position is not accessible"),
            Self::StaleSearchState => {
                f.write_str("search state was not reset since the previous search")
            }
            Self::ContextMismatch { expected, found } => write!(
                f,
                "search context holds {found} nodes but the map has {expected} cells"
            ),
        }
    }
}

impl std::error::Error for PathError {}

/// Errors raised when validating a grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Orthogonal cost must be positive and diagonal cost must exceed it.
    InvalidMoveCosts { orthogonal: Cost, diagonal: Cost },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMoveCosts {
                orthogonal,
                diagonal,
            } => write!(
                f,
                "invalid move costs: orthogonal {orthogonal} must be > 0 \
                 and diagonal {diagonal} must exceed it"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur when parsing a textual grid layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A line is not as wide as the first line.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `#` or `.` was found.
    InvalidRune { ch: char, pos: Point },
    /// A stored cell does not sit at the position of its index.
    MisplacedCell {
        index: usize,
        expected: Point,
        found: Point,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "layout: line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "layout contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MisplacedCell {
                index,
                expected,
                found,
            } => write!(f, "layout: cell {index} is at {found}, expected {expected}"),
        }
    }
}

impl std::error::Error for LayoutError {}

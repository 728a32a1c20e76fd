//! Distance functions and heuristic selection.

use pathfinder_core::Coordinates;

use crate::error::ConfigError;
use crate::node::Cost;

/// Manhattan (L1) distance: sum of absolute per-axis deltas.
#[inline]
pub fn manhattan<C: Coordinates>(a: C, b: C) -> i32 {
    a.abs_deltas(&b).sum()
}

/// Chebyshev (L∞) distance: largest absolute per-axis delta.
#[inline]
pub fn chebyshev<C: Coordinates>(a: C, b: C) -> i32 {
    a.abs_deltas(&b).max().unwrap_or(0)
}

/// Smallest absolute per-axis delta.
#[inline]
fn min_delta<C: Coordinates>(a: C, b: C) -> i32 {
    a.abs_deltas(&b).min().unwrap_or(0)
}

/// Edge weights for a grid. The diagonal cost approximates the Euclidean
/// length of a diagonal step; the ratio is a tunable constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveCosts {
    pub orthogonal: Cost,
    pub diagonal: Cost,
}

impl MoveCosts {
    pub const DEFAULT: Self = Self {
        orthogonal: 10,
        diagonal: 14,
    };

    /// Cheapest way to cover one step along both axes: a diagonal move or
    /// two orthogonal ones.
    #[inline]
    pub fn diagonal_step(self) -> Cost {
        self.diagonal.min(2 * self.orthogonal)
    }

    /// Check that `orthogonal > 0` and `diagonal > orthogonal`.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.orthogonal > 0 && self.diagonal > self.orthogonal {
            Ok(self)
        } else {
            Err(ConfigError::InvalidMoveCosts {
                orthogonal: self.orthogonal,
                diagonal: self.diagonal,
            })
        }
    }
}

impl Default for MoveCosts {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How the remaining cost to the goal is estimated.
///
/// Every variant is scaled by the same [`MoveCosts`] as the edges so that
/// estimates and real costs stay commensurate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeuristicFunction {
    /// `orthogonal * L1`. Exact on 4-way grids. On 8-way grids it
    /// overestimates unless `diagonal >= 2 * orthogonal`.
    Manhattan,
    /// `orthogonal * (max - min) + step * min`, where `step` is
    /// [`MoveCosts::diagonal_step`]. Exact on open 8-way grids.
    Octile,
    /// `orthogonal * L∞`. Admissible on both 4-way and 8-way grids but weak.
    Chebyshev,
}

impl HeuristicFunction {
    /// The tightest admissible choice for the given movement model.
    pub fn for_moves(allows_diagonal_moves: bool) -> Self {
        if allows_diagonal_moves {
            Self::Octile
        } else {
            Self::Manhattan
        }
    }

    /// Whether the estimate never exceeds the true cost under the given
    /// movement model and costs.
    pub fn is_admissible(self, allows_diagonal_moves: bool, costs: MoveCosts) -> bool {
        match self {
            Self::Manhattan => !allows_diagonal_moves || costs.diagonal >= 2 * costs.orthogonal,
            Self::Octile | Self::Chebyshev => true,
        }
    }

    /// Estimated cost from `from` to `to`.
    pub fn estimate<C: Coordinates>(self, from: C, to: C, costs: MoveCosts) -> Cost {
        match self {
            Self::Manhattan => manhattan(from, to) * costs.orthogonal,
            Self::Chebyshev => chebyshev(from, to) * costs.orthogonal,
            Self::Octile => {
                let straight = chebyshev(from, to);
                let diagonal = min_delta(from, to);
                (straight - diagonal) * costs.orthogonal + diagonal * costs.diagonal_step()
            }
        }
    }
}

//! Coordinate and storage types for grid pathfinding.
//!
//! This crate provides the geometry primitives shared by the *pathfinder*
//! crates: integer points, half-open ranges, the [`Coordinates`] abstraction,
//! and a flat row-major [`Matrix`].

pub mod geom;
pub mod matrix;

pub use geom::{Coordinates, Point, Range, RangeIter};
pub use matrix::{Matrix, ShapeError};

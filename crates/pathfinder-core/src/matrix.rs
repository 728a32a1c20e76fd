//! Exclusively owned row-major 2D storage.
//!
//! Every in-bounds [`Point`] maps to exactly one element and every element
//! has a stable flat index, so other structures can refer to elements by
//! index instead of by reference.

use std::fmt;

use crate::geom::{Point, Range};

/// A `width × height` grid of `T` stored in a flat, row-major `Vec`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawMatrix<T>")
)]
pub struct Matrix<T> {
    elements: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Matrix<T> {
    /// Build a matrix by calling `f` once per position, in row-major order.
    ///
    /// Negative dimensions clamp to zero.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> T) -> Self {
        let bounds = Range::sized(width, height);
        let elements = bounds.iter().map(&mut f).collect();
        Self {
            elements,
            width: bounds.width() as usize,
            height: bounds.height() as usize,
        }
    }

    /// Wrap row-major `elements`, which must hold exactly
    /// `width * height` items.
    pub fn from_vec(width: usize, height: usize, elements: Vec<T>) -> Result<Self, ShapeError> {
        let fits = i32::try_from(width).is_ok() && i32::try_from(height).is_ok();
        if fits && width.checked_mul(height) == Some(elements.len()) {
            Ok(Self {
                elements,
                width,
                height,
            })
        } else {
            Err(ShapeError {
                width,
                height,
                len: elements.len(),
            })
        }
    }

    /// Width in elements.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width as i32
    }

    /// Height in elements.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height as i32
    }

    /// `[0, width) x [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::sized(self.width(), self.height())
    }

    /// Number of elements (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the matrix holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether `p` is inside the matrix.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.index(p).is_some()
    }

    /// Flat index of `p`, or `None` if `p` is out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height {
            Some((p.y as usize) * self.width + (p.x as usize))
        } else {
            None
        }
    }

    /// Position of the element at flat `index`.
    ///
    /// The result is only meaningful for `index < len()`.
    #[inline]
    pub fn point(&self, index: usize) -> Point {
        let w = self.width.max(1);
        Point::new((index % w) as i32, (index / w) as i32)
    }

    /// Element at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&T> {
        self.index(p).map(|i| &self.elements[i])
    }

    /// Mutable element at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        self.index(p).map(|i| &mut self.elements[i])
    }

    /// Element at flat `index`.
    #[inline]
    pub fn at_index(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    /// Elements in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Row-major iterator over `(Point, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.bounds().iter().zip(self.elements.iter())
    }
}

/// Element count does not match the declared dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeError {
    pub width: usize,
    pub height: usize,
    pub len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}×{} matrix cannot hold {} elements",
            self.width, self.height, self.len
        )
    }
}

impl std::error::Error for ShapeError {}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatrix<T> {
    elements: Vec<T>,
    width: usize,
    height: usize,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawMatrix<T>> for Matrix<T> {
    type Error = ShapeError;

    fn try_from(raw: RawMatrix<T>) -> Result<Self, ShapeError> {
        Self::from_vec(raw.width, raw.height, raw.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_fills_row_major() {
        let m = Matrix::from_fn(3, 2, |p| p.x + 10 * p.y);
        assert_eq!(m.len(), 6);
        assert_eq!(m.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(m.get(Point::new(2, 1)), Some(&12));
    }

    #[test]
    fn index_and_point_agree() {
        let m = Matrix::from_fn(4, 3, |_| ());
        for p in m.bounds() {
            let i = m.index(p).unwrap();
            assert_eq!(m.point(i), p);
        }
    }

    #[test]
    fn out_of_bounds_is_none() {
        let mut m = Matrix::from_fn(2, 2, |_| 0u8);
        assert_eq!(m.get(Point::new(2, 0)), None);
        assert_eq!(m.get(Point::new(0, -1)), None);
        assert!(m.get_mut(Point::new(-1, 0)).is_none());
        assert!(!m.contains(Point::new(0, 2)));
    }

    #[test]
    fn get_mut_writes_through() {
        let mut m = Matrix::from_fn(2, 2, |_| false);
        *m.get_mut(Point::new(1, 1)).unwrap() = true;
        assert_eq!(m.at_index(3), Some(&true));
    }

    #[test]
    fn zero_size_matrix() {
        let m = Matrix::from_fn(0, 5, |_| 1);
        assert!(m.is_empty());
        assert_eq!(m.width(), 0);
        assert_eq!(m.index(Point::ZERO), None);
        assert_eq!(m.iter().count(), 0);
    }

    #[test]
    fn from_vec_checks_shape() {
        let m = Matrix::from_vec(3, 2, vec![0, 1, 2, 10, 11, 12]).unwrap();
        assert_eq!(m, Matrix::from_fn(3, 2, |p| p.x + 10 * p.y));
        assert_eq!(
            Matrix::from_vec(3, 3, vec![1, 2]),
            Err(ShapeError {
                width: 3,
                height: 3,
                len: 2
            })
        );
        assert!(Matrix::<u8>::from_vec(usize::MAX, 2, Vec::new()).is_err());
    }

    #[test]
    fn iter_pairs_positions() {
        let m = Matrix::from_fn(2, 2, |p| p);
        assert!(m.iter().all(|(p, v)| p == *v));
    }
}

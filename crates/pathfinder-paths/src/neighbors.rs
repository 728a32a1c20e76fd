use pathfinder_core::Point;

/// Axis-aligned steps: right, down, left, up.
pub const CARDINAL: [Point; 4] = [
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(0, -1),
];

/// Cardinal steps followed by the diagonal ones.
pub const ALL: [Point; 8] = [
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(0, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
    Point::new(-1, -1),
    Point::new(1, -1),
];

/// Step deltas for a 4-way or 8-way movement model.
#[inline]
pub fn deltas(allows_diagonal_moves: bool) -> &'static [Point] {
    if allows_diagonal_moves { &ALL } else { &CARDINAL }
}

/// Positions one step away from `p`, keeping only those for which `keep`
/// returns `true`. Cardinal neighbours come first.
pub fn adjacent(
    p: Point,
    allows_diagonal_moves: bool,
    keep: impl Fn(Point) -> bool,
) -> impl Iterator<Item = Point> {
    deltas(allows_diagonal_moves)
        .iter()
        .map(move |&d| p + d)
        .filter(move |&n| keep(n))
}

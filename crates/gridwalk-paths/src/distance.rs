use gridwalk_core::Point;

/// Manhattan (L1) distance between two points.
///
/// With unit-cost cardinal moves this is exactly the obstacle-free distance,
/// so it never overestimates and is consistent.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

use wayfind_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible for 4-directional unit-cost movement: never negative, and zero
/// only when `a == b`.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

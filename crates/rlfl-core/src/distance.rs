use crate::geom::Point;

/// Approximate euclidean distance used throughout the library:
/// the larger axis delta plus half the smaller one.
#[inline]
pub fn distance(a: Point, b: Point) -> i32 {
    let dy = (a.y - b.y).abs();
    let dx = (a.x - b.x).abs();
    if dy > dx { dy + (dx >> 1) } else { dx + (dy >> 1) }
}

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_values() {
        assert_eq!(distance(Point::new(1, 1), Point::new(11, 11)), 15);
        assert_eq!(distance(Point::new(1, 1), Point::new(2, 2)), 1);
        assert_eq!(distance(Point::new(0, 0), Point::new(5, 0)), 5);
        assert_eq!(distance(Point::new(0, 0), Point::new(2, 5)), 6);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Point::new(3, 9);
        let b = Point::new(-4, 2);
        assert_eq!(distance(a, b), distance(b, a));
        assert_eq!(distance(a, a), 0);
    }

    #[test]
    fn test_metrics_bound_each_other() {
        let a = Point::new(0, 0);
        for b in [Point::new(4, 1), Point::new(3, 3), Point::new(-2, 7)] {
            assert!(chebyshev(a, b) <= distance(a, b));
            assert!(distance(a, b) <= manhattan(a, b));
        }
    }
}

//! Point helpers built on the degree-based direction convention.

use crate::math::angle::{nearly_equal, normalize_angle};
use crate::math::Point2;

/// Direction from `from` to `to` in degrees, normalized to `[0, 360)`.
///
/// Coincident points yield 0 degrees.
#[must_use]
pub fn direction(from: &Point2, to: &Point2) -> f64 {
    normalize_angle((to.y - from.y).atan2(to.x - from.x).to_degrees())
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p1: &Point2, p2: &Point2) -> f64 {
    debug_assert!(p1.x.is_finite() && p1.y.is_finite(), "non-finite point");
    debug_assert!(p2.x.is_finite() && p2.y.is_finite(), "non-finite point");
    (p2 - p1).norm()
}

/// Walks `dist` from `start` along the direction `dir_deg` (degrees).
#[must_use]
pub fn project(start: &Point2, dir_deg: f64, dist: f64) -> Point2 {
    let rad = dir_deg.to_radians();
    Point2::new(start.x + dist * rad.cos(), start.y + dist * rad.sin())
}

/// Coordinate-wise nearly-equal comparison of two points.
#[must_use]
pub fn nearly_equal_points(p1: &Point2, p2: &Point2) -> bool {
    nearly_equal(p1.x, p2.x) && nearly_equal(p1.y, p2.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_direction_quadrants() {
        let origin = Point2::origin();
        assert_relative_eq!(direction(&origin, &Point2::new(1.0, 0.0)), 0.0, epsilon = TOL);
        assert_relative_eq!(direction(&origin, &Point2::new(0.0, 1.0)), 90.0, epsilon = TOL);
        assert_relative_eq!(direction(&origin, &Point2::new(-1.0, 0.0)), 180.0, epsilon = TOL);
        assert_relative_eq!(direction(&origin, &Point2::new(0.0, -1.0)), 270.0, epsilon = TOL);
        assert_relative_eq!(direction(&origin, &Point2::new(1.0, 1.0)), 45.0, epsilon = TOL);
        assert_relative_eq!(
            direction(&origin, &Point2::new(1.0, -1.0)),
            315.0,
            epsilon = TOL
        );
    }

    #[test]
    fn test_direction_coincident_points() {
        let p = Point2::new(2.0, 3.0);
        assert_relative_eq!(direction(&p, &p), 0.0, epsilon = TOL);
    }

    #[test]
    fn test_direction_reverses_by_half_turn() {
        // Swapping the endpoints turns the direction around exactly.
        let pairs = [
            (Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
            (Point2::new(2.0, -3.0), Point2::new(-1.0, 5.0)),
            (Point2::new(-4.5, 0.1), Point2::new(-4.5, -7.0)),
            (Point2::new(10.0, 10.0), Point2::new(9.0, 10.0)),
        ];
        for (p1, p2) in pairs {
            let there = normalize_angle(direction(&p1, &p2) + 180.0);
            let back = direction(&p2, &p1);
            assert!(nearly_equal(there, back), "{p1:?} -> {p2:?}: {there} vs {back}");
        }
    }

    #[test]
    fn test_project_round_trip() {
        // Projecting and measuring back recovers direction and distance.
        let start = Point2::new(-1.5, 4.0);
        for dir in [0.0, 33.0, 90.0, 181.5, 270.0, 359.0] {
            let end = project(&start, dir, 2.5);
            assert_relative_eq!(direction(&start, &end), dir, epsilon = 1e-9);
            assert_relative_eq!(distance(&start, &end), 2.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_distance() {
        let p1 = Point2::new(1.0, 2.0);
        let p2 = Point2::new(4.0, 6.0);
        assert_relative_eq!(distance(&p1, &p2), 5.0, epsilon = TOL);
        assert_relative_eq!(distance(&p1, &p1), 0.0, epsilon = TOL);
    }

    #[test]
    fn test_nearly_equal_points() {
        let p = Point2::new(1.0, 2.0);
        assert!(nearly_equal_points(&p, &Point2::new(1.0 + 1e-9, 2.0)));
        assert!(!nearly_equal_points(&p, &Point2::new(1.1, 2.0)));
    }
}

use tracing::debug;

use super::angle::{nearly_equal, normalize_angle};
use super::point_2d::{direction, nearly_equal_points};
use super::{Point2, TOLERANCE};

/// Intersection of two rays given by origin points and directions in
/// degrees.
///
/// The computation works in slope form, so rays at exactly 90 or 270
/// degrees take a dedicated vertical branch. For the general case the
/// candidate point must lie forward along both rays or the crossing is
/// rejected; a candidate coinciding with either origin is accepted
/// outright.
///
/// Returns `None` for parallel and anti-parallel rays, including the
/// colinear case.
#[must_use]
pub fn intersect_rays(p1: &Point2, dir1: f64, p2: &Point2, dir2: f64) -> Option<Point2> {
    // Exact equality only: the tolerance comparison works on absolute
    // values and would conflate origins mirrored across an axis.
    if p1 == p2 {
        return Some(*p1);
    }

    let d1 = normalize_angle(dir1);
    let d2 = normalize_angle(dir2);
    if d1 == d2 || d1 == normalize_angle(d2 + 180.0) {
        return None;
    }

    let vertical1 = d1 == 90.0 || d1 == 270.0;
    let vertical2 = d2 == 90.0 || d2 == 270.0;

    // A vertical ray pins the X coordinate; the other ray supplies Y.
    if vertical1 {
        let y = p2.y + d2.to_radians().tan() * (p1.x - p2.x);
        return Some(Point2::new(p1.x, y));
    }
    if vertical2 {
        let y = p1.y + d1.to_radians().tan() * (p2.x - p1.x);
        return Some(Point2::new(p2.x, y));
    }

    let tan1 = d1.to_radians().tan();
    let tan2 = d2.to_radians().tan();
    let x = (p2.y - p1.y + tan1 * p1.x - tan2 * p2.x) / (tan1 - tan2);

    let y = if !nearly_equal(x, p1.x) {
        p1.y + tan1 * (x - p1.x)
    } else if !nearly_equal(x, p2.x) {
        p2.y + tan2 * (x - p2.x)
    } else {
        debug!(x, ?p1, ?p2, "crossing X matches both ray origins");
        return None;
    };
    let candidate = Point2::new(x, y);

    if nearly_equal_points(&candidate, p1) || nearly_equal_points(&candidate, p2) {
        return Some(candidate);
    }

    // Verify the crossing lies forward along both rays.
    if !nearly_equal(direction(p1, &candidate), d1) || !nearly_equal(direction(p2, &candidate), d2)
    {
        return None;
    }

    Some(candidate)
}

/// Bounded segment-segment intersection.
///
/// Segment A runs `a0..a1` and segment B runs `b0..b1`. With
/// `include_endpoints` false, a crossing that lands on an endpoint of
/// segment A is rejected.
#[must_use]
pub fn intersect_segments(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    include_endpoints: bool,
) -> Option<Point2> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() < TOLERANCE {
        return None;
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * da.y - dy * da.x) / cross;

    let eps = TOLERANCE;
    if t < -eps || t > 1.0 + eps || u < -eps || u > 1.0 + eps {
        return None;
    }

    let t = t.clamp(0.0, 1.0);
    let pt = Point2::new(a0.x + da.x * t, a0.y + da.y * t);

    if !include_endpoints && (nearly_equal_points(&pt, a0) || nearly_equal_points(&pt, a1)) {
        return None;
    }

    Some(pt)
}

//! Forward tracer for a single incident ray against a concave arc.

use tracing::debug;

use crate::geometry::reflect::{reflect_direction, reflect_point_on_arc, strikes_from_inside};
use crate::geometry::MirrorArc;
use crate::math::angle::normalize_angle;
use crate::math::point_2d::{direction, distance};
use crate::math::Point2;

use super::RayStatus;

/// Bounce cap for rays that keep striking the arc.
pub const MAX_BOUNCES: usize = 20;

/// Outcome of tracing one incident ray.
#[derive(Debug, Clone)]
pub struct Trace {
    pub status: RayStatus,
    /// Strike points in order; the first entry is the target point.
    pub strike_points: Vec<Point2>,
    /// Final outgoing direction when the ray escaped the arc.
    pub reflect_dir: Option<f64>,
}

impl Trace {
    fn blocked(status: RayStatus, strike: Point2) -> Self {
        Self {
            status,
            strike_points: vec![strike],
            reflect_dir: None,
        }
    }
}

/// Traces a ray traveling in `incident_dir` that would strike the
/// mirror circle at `target`.
///
/// When `origin` is given and lies inside the circle, the ray is known
/// to start between the surfaces and the obscuration pre-check is
/// skipped. Rays approaching the convex side classify as
/// [`RayStatus::Convex`]; rays whose upstream extension crosses the
/// arc classify as [`RayStatus::Obscured`]. Everything else reflects,
/// following repeated strikes along the arc up to [`MAX_BOUNCES`].
#[must_use]
pub fn trace_concave(
    arc: &MirrorArc,
    incident_dir: f64,
    origin: Option<&Point2>,
    target: &Point2,
) -> Trace {
    let center = arc.center();
    let radius = arc.radius();

    let target_normal = direction(&center, target);
    if !strikes_from_inside(incident_dir, target_normal) {
        return Trace::blocked(RayStatus::Convex, *target);
    }

    // Upstream obscuration: walk the incident ray backwards through
    // the circle and reject when that crossing lies on the arc.
    let check_obscured = match origin {
        None => true,
        Some(o) => distance(o, &center) > radius,
    };
    if check_obscured {
        let upstream_dir = normalize_angle(incident_dir + 180.0);
        let upstream = reflect_point_on_arc(&center, radius, target, upstream_dir);
        let upstream_normal = direction(&center, &upstream);
        if arc.contains_normal(upstream_normal) {
            debug!(incident_dir, upstream_normal, "incident ray is obscured by the arc");
            return Trace::blocked(RayStatus::Obscured, upstream);
        }
    }

    let mut strike_points = vec![*target];
    let mut current = *target;
    let mut next_incident = incident_dir;
    let mut status = RayStatus::Unobscured;
    let mut reflect_dir = None;
    let mut bounces = 0;

    loop {
        let strike_normal = direction(&center, &current);
        let reflect = reflect_direction(next_incident, strike_normal);
        reflect_dir = Some(reflect);

        let next_pt = reflect_point_on_arc(&center, radius, &current, reflect);
        let next_normal = direction(&center, &next_pt);
        if !arc.contains_normal(next_normal) {
            break;
        }

        status = RayStatus::NStrike;
        strike_points.push(next_pt);
        current = next_pt;
        next_incident = reflect;

        bounces += 1;
        if bounces >= MAX_BOUNCES {
            debug!(incident_dir, "bounce cap reached while still on the arc");
            status = RayStatus::NStrikeOut;
            break;
        }
    }

    Trace {
        status,
        strike_points,
        reflect_dir,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bowl() -> MirrorArc {
        MirrorArc::new(100.0, 180.0, 360.0).expect("valid arc")
    }

    #[test]
    fn test_vertex_ray_reflects_straight_back() {
        let arc = bowl();
        let target = Point2::new(0.0, -100.0);
        let trace = trace_concave(&arc, 270.0, None, &target);
        assert_eq!(trace.status, RayStatus::Unobscured);
        assert_eq!(trace.strike_points.len(), 1);
        let dir = trace.reflect_dir.expect("escaped ray has a direction");
        assert_relative_eq!(dir, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_convex_side_approach() {
        // Upward ray reaching the bottom of the circle from below.
        let arc = bowl();
        let target = Point2::new(0.0, -100.0);
        let trace = trace_concave(&arc, 90.0, None, &target);
        assert_eq!(trace.status, RayStatus::Convex);
        assert!(trace.reflect_dir.is_none());
        assert_eq!(trace.strike_points.len(), 1);
    }

    #[test]
    fn test_obscured_by_far_side() {
        // Nearly a full circle: a downward ray aimed at the bottom
        // must pass through the top of the arc first.
        let arc = MirrorArc::new(100.0, 10.0, 350.0).expect("valid arc");
        let target = Point2::new(0.0, -100.0);
        let trace = trace_concave(&arc, 270.0, None, &target);
        assert_eq!(trace.status, RayStatus::Obscured);
        // The blocking strike is the top of the circle.
        assert_relative_eq!(trace.strike_points[0].y, 100.0, epsilon = 1e-6);
    }

    #[test]
    fn test_origin_inside_skips_obscuration() {
        // Same geometry, but the ray starts inside the circle.
        let arc = MirrorArc::new(100.0, 10.0, 350.0).expect("valid arc");
        let origin = Point2::new(0.0, 0.0);
        let target = Point2::new(0.0, -100.0);
        let trace = trace_concave(&arc, 270.0, Some(&origin), &target);
        assert!(trace.status.has_reflection());
    }

    #[test]
    fn test_grazing_ray_hits_bounce_cap() {
        // A shallow ray walks the arc in 10-degree normal steps and is
        // still striking when the cap hits.
        let arc = MirrorArc::new(100.0, 5.0, 205.0).expect("valid arc");
        let target = Point2::new(100.0, 0.0);
        let trace = trace_concave(&arc, 85.0, Some(&Point2::new(99.0, -5.0)), &target);
        assert_eq!(trace.status, RayStatus::NStrikeOut);
        assert_eq!(trace.strike_points.len(), MAX_BOUNCES + 1);
        assert!(trace.reflect_dir.is_some());
    }

    #[test]
    fn test_single_extra_strike() {
        // A ray into a deep bowl that clips the far rim once.
        let arc = MirrorArc::new(1.0, 225.0, 315.0).expect("valid arc");
        let target = arc.point_at_normal(225.0);
        let trace = trace_concave(&arc, 270.25, None, &target);
        assert_eq!(trace.status, RayStatus::NStrike);
        assert_eq!(trace.strike_points.len(), 2);
        assert!(trace.reflect_dir.is_some());
    }
}

//! Specular reflection primitives on a circular mirror.
//!
//! Everything here is pure angle arithmetic in degrees. Each ray is a
//! travel direction, each surface point is identified by its outward
//! normal direction from the center of curvature, and the law of
//! reflection is applied without ever forming an explicit surface
//! tangent vector.

use tracing::trace;

use crate::geometry::{Segment, SegmentLog};
use crate::math::angle::{min_angle, normalize_angle};
use crate::math::point_2d::{direction, distance, project};
use crate::math::Point2;

/// Tests whether a ray traveling in `ray_dir` strikes the concave side
/// of a surface whose outward normal is `normal_dir`.
///
/// The normal is lifted by whole turns until the ray direction lies
/// within a half turn of it; the strike is concave when the two then
/// differ by at most 90 degrees.
#[must_use]
pub fn strikes_from_inside(ray_dir: f64, normal_dir: f64) -> bool {
    let ray = normalize_angle(ray_dir);
    let mut normal = normal_dir;

    while ray > normal + 180.0 {
        normal += 360.0;
    }
    while ray < normal - 180.0 {
        normal -= 360.0;
    }

    ray <= normal + 90.0 && ray >= normal - 90.0
}

/// Direction of the reflected ray for an incident travel direction and
/// a surface normal, both in degrees.
#[must_use]
pub fn reflect_direction(incident_dir: f64, normal_dir: f64) -> f64 {
    normalize_angle(incident_dir + 2.0 * (normal_dir - incident_dir) + 180.0)
}

/// Second crossing of a chord with the mirror circle.
///
/// `known_pt` lies on the circle and `chord_dir` is the travel
/// direction of a ray leaving it. The inner angle between the chord
/// and the local tangent equals half the swept arc, which gives the
/// normal direction of the far crossing directly.
#[must_use]
pub fn reflect_point_on_arc(
    center: &Point2,
    radius: f64,
    known_pt: &Point2,
    chord_dir: f64,
) -> Point2 {
    let normal_dir = direction(center, known_pt);
    let tangent_dir = normalize_angle(normal_dir + 90.0);
    let inner_angle = normalize_angle(chord_dir - tangent_dir);
    let far_normal_dir = normalize_angle(normal_dir + 2.0 * inner_angle);
    project(center, far_normal_dir, radius)
}

/// Projects a ray from an outside point onto the circle, returning the
/// far crossing where the ray leaves the circle again.
///
/// Returns `None` when the ray misses the circle. The cast segment is
/// recorded in `log`.
#[must_use]
pub fn project_onto_circle(
    from_pt: &Point2,
    ray_dir: f64,
    center: &Point2,
    radius: f64,
    log: &mut SegmentLog,
) -> Option<Point2> {
    let dist = distance(from_pt, center);
    let center_to_from = direction(center, from_pt);

    // Perpendicular offset of the ray from the center.
    let interior_angle = ray_dir - center_to_from;
    let offset = dist * interior_angle.to_radians().sin();
    if offset.abs() > radius {
        trace!(offset, radius, "ray misses the circle");
        return None;
    }

    let half_angle = (offset / radius).asin().to_degrees();
    let hit = project(center, ray_dir - half_angle, radius);
    log.record(Segment::new(*from_pt, hit));
    Some(hit)
}

/// Width of the span `p1..p2` as seen looking along `view_dir`.
#[must_use]
pub fn apparent_width(p1: &Point2, p2: &Point2, view_dir: f64) -> f64 {
    let span = distance(p1, p2);
    let span_dir = direction(p1, p2);
    span * (span_dir - view_dir).to_radians().sin().abs()
}

/// Angle subtended by the span `p1..p2` at an observer point, in
/// degrees.
#[must_use]
pub fn apparent_width_angle(p1: &Point2, p2: &Point2, observer: &Point2) -> f64 {
    min_angle((direction(observer, p1) - direction(observer, p2)).abs())
}

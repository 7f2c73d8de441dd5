pub mod arc;
pub mod reflect;

use crate::math::intersect_2d::intersect_segments;
use crate::math::point_2d::distance;
use crate::math::Point2;

pub use arc::MirrorArc;

/// A directed line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point2,
    pub b: Point2,
}

impl Segment {
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    /// Segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.a, &self.b)
    }
}

/// Accumulator for construction segments produced while tracing.
///
/// Callers that want a visual record of intermediate geometry pass one
/// of these in and read the segments back afterwards.
#[derive(Debug, Clone, Default)]
pub struct SegmentLog {
    segments: Vec<Segment>,
}

impl SegmentLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

/// Clips a ray, represented as a long segment from `ray.a`, against a
/// barrier segment.
///
/// Returns the new far endpoint: the crossing with the barrier when it
/// shortens the ray, otherwise the original `ray.b`. A crossing on one
/// of the barrier's own tips is ignored.
#[must_use]
pub fn clip_ray(ray: &Segment, barrier: &Segment) -> Point2 {
    if let Some(pt) = intersect_segments(&barrier.a, &barrier.b, &ray.a, &ray.b, false) {
        if distance(&ray.a, &pt) < ray.length() {
            return pt;
        }
    }
    ray.b
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clip_ray_shortened() {
        let ray = Segment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let barrier = Segment::new(Point2::new(4.0, -1.0), Point2::new(4.0, 1.0));
        let end = clip_ray(&ray, &barrier);
        assert_relative_eq!(end.x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(end.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clip_ray_unobstructed() {
        let ray = Segment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let barrier = Segment::new(Point2::new(4.0, 1.0), Point2::new(4.0, 2.0));
        let end = clip_ray(&ray, &barrier);
        assert_relative_eq!(end.x, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clip_ray_ignores_barrier_tip() {
        // The barrier's lower tip sits exactly on the ray; a grazing
        // touch at a tip does not terminate the ray.
        let ray = Segment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let barrier = Segment::new(Point2::new(4.0, 0.0), Point2::new(4.0, 2.0));
        let end = clip_ray(&ray, &barrier);
        assert_relative_eq!(end.x, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_segment_log_records() {
        let mut log = SegmentLog::new();
        assert!(log.is_empty());
        log.record(Segment::new(Point2::origin(), Point2::new(1.0, 0.0)));
        assert_eq!(log.segments().len(), 1);
        log.clear();
        assert!(log.is_empty());
    }
}

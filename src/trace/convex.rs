//! Convex-side solver: which patch of sky an external observer sees
//! reflected in the outside of the mirror.

use tracing::debug;

use crate::error::{ConfigError, GeometryError, Result};
use crate::math::angle::nearly_equal;
use crate::math::point_2d::{direction, distance, project};
use crate::math::Point2;

/// Iteration cap for the bisection.
pub const BISECTION_LIMIT: usize = 100;

/// Reflection geometry at one mirror normal.
#[derive(Debug, Clone, Copy)]
pub struct NormalSample {
    /// Point of the mirror surface.
    pub mirror_point: Point2,
    /// Direction from the observer to the mirror point.
    pub observer_dir: f64,
    /// Travel direction of the sky ray the observer sees there.
    pub sky_dir: f64,
}

/// A solved normal direction for a requested sky ray.
#[derive(Debug, Clone, Copy)]
pub struct ConvexSolution {
    pub normal_dir: f64,
    pub mirror_point: Point2,
    pub observer_dir: f64,
    pub sky_dir: f64,
}

/// A convex circular mirror centered on the origin, viewed by a fixed
/// external observer.
#[derive(Debug, Clone)]
pub struct ConvexMirror {
    radius: f64,
    observer: Point2,
    observer_distance: f64,
    tangent_normal_dir: f64,
    tangent_point: Point2,
}

impl ConvexMirror {
    /// Creates a convex mirror for an observer outside the circle.
    ///
    /// The visible half of the mirror spans normals up to the tangent
    /// normal, found from the right triangle formed by the observer,
    /// the center, and the tangent point.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or the observer
    /// lies on or inside the circle.
    pub fn new(radius: f64, observer: Point2) -> Result<Self> {
        if radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius).into());
        }
        let observer_distance = distance(&observer, &Point2::origin());
        if observer_distance <= radius {
            return Err(ConfigError::ObserverInsideMirror {
                distance: observer_distance,
                radius,
            }
            .into());
        }

        // The tangent point closes a right triangle with the observer
        // and the center, so the half angle at the observer is
        // asin(r / d) and the tangent normal sits 90 degrees short of
        // a quarter turn past it.
        let observer_half_angle = (radius / observer_distance).asin().to_degrees();
        let center_angle = 180.0 - 90.0 - observer_half_angle;
        let center_angle_to_axis = 180.0 - center_angle;
        let tangent_normal_dir = 90.0 + (90.0 - center_angle_to_axis);
        let tangent_point = project(&Point2::origin(), tangent_normal_dir, radius);

        Ok(Self {
            radius,
            observer,
            observer_distance,
            tangent_normal_dir,
            tangent_point,
        })
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn observer(&self) -> &Point2 {
        &self.observer
    }

    #[must_use]
    pub fn observer_distance(&self) -> f64 {
        self.observer_distance
    }

    /// Normal direction at the edge of the visible half.
    #[must_use]
    pub fn tangent_normal_dir(&self) -> f64 {
        self.tangent_normal_dir
    }

    /// Mirror point where the observer's sight line grazes the circle.
    #[must_use]
    pub fn tangent_point(&self) -> Point2 {
        self.tangent_point
    }

    /// Direction from the observer to the grazing point.
    #[must_use]
    pub fn observer_tangent_dir(&self) -> f64 {
        direction(&self.observer, &self.tangent_point)
    }

    /// Reflection geometry at `normal_dir`, or `None` past the visible
    /// edge.
    #[must_use]
    pub fn map_normal(&self, normal_dir: f64) -> Option<NormalSample> {
        if normal_dir > self.tangent_normal_dir {
            return None;
        }
        let mirror_point = project(&Point2::origin(), normal_dir, self.radius);
        let observer_dir = direction(&self.observer, &mirror_point);
        let sky_dir = normal_dir + normal_dir + (180.0 - observer_dir) + 180.0;
        Some(NormalSample {
            mirror_point,
            observer_dir,
            sky_dir,
        })
    }

    /// Bisects the visible normal range for the normal whose reflected
    /// sky ray travels in `target_sky_dir`.
    ///
    /// Returns `None` when the target is outside the reachable sky
    /// span; a stalled bisection, where two consecutive guesses map to
    /// nearly the same sky direction short of the target, also fails.
    #[must_use]
    pub fn find_normal_for_sky(&self, target_sky_dir: f64) -> Option<ConvexSolution> {
        let mut max_normal = self.tangent_normal_dir;
        let mut min_normal = -self.tangent_normal_dir;
        let mut prev_sky = 0.0;

        for iteration in 0..BISECTION_LIMIT {
            let guess = (max_normal + min_normal) / 2.0;
            let mut sky = 0.0;

            if let Some(sample) = self.map_normal(guess) {
                sky = sample.sky_dir;
                let stalled = iteration >= 1 && nearly_equal(prev_sky, sky);
                if nearly_equal(sky, target_sky_dir) {
                    return Some(ConvexSolution {
                        normal_dir: guess,
                        mirror_point: sample.mirror_point,
                        observer_dir: sample.observer_dir,
                        sky_dir: sky,
                    });
                }
                if stalled {
                    debug!(
                        target_sky_dir,
                        sky, prev_sky, guess, "bisection stalled short of the target"
                    );
                    return None;
                }
            }

            if sky > target_sky_dir {
                max_normal = guess;
            }
            if sky < target_sky_dir {
                min_normal = guess;
            }
            prev_sky = sky;
        }

        debug!(target_sky_dir, "bisection hit the iteration cap");
        None
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mirror() -> ConvexMirror {
        ConvexMirror::new(1.0, Point2::new(2.0, 0.0)).expect("valid mirror")
    }

    #[test]
    fn test_new_rejects_inside_observer() {
        assert!(ConvexMirror::new(1.0, Point2::new(0.5, 0.0)).is_err());
        assert!(ConvexMirror::new(1.0, Point2::new(1.0, 0.0)).is_err());
        assert!(ConvexMirror::new(-1.0, Point2::new(2.0, 0.0)).is_err());
    }

    #[test]
    fn test_tangent_geometry() {
        // r = 1, d = 2: the half angle at the observer is 30 degrees
        // and the tangent normal sits at 60.
        let m = mirror();
        assert_relative_eq!(m.tangent_normal_dir(), 60.0, epsilon = 1e-9);
        assert_relative_eq!(m.tangent_point().x, 0.5, epsilon = 1e-9);
        assert_relative_eq!(m.tangent_point().y, 3.0_f64.sqrt() / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_map_normal_head_on() {
        // At normal 0 the observer looks straight at the near pole and
        // sees the sky directly behind themselves.
        let m = mirror();
        let sample = m.map_normal(0.0).expect("within the visible half");
        assert_relative_eq!(sample.mirror_point.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(sample.observer_dir, 180.0, epsilon = 1e-9);
        assert_relative_eq!(sample.sky_dir, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_map_normal_past_tangent() {
        assert!(mirror().map_normal(61.0).is_none());
    }

    #[test]
    fn test_find_normal_head_on() {
        let m = mirror();
        let sol = m.find_normal_for_sky(180.0).expect("reachable sky");
        assert_relative_eq!(sol.normal_dir, 0.0, epsilon = 1e-6);
        assert_relative_eq!(sol.observer_dir, 180.0, epsilon = 1e-6);
        assert_relative_eq!(sol.mirror_point.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_find_normal_off_axis() {
        let m = mirror();
        let sol = m.find_normal_for_sky(190.0).expect("reachable sky");
        assert_relative_eq!(sol.sky_dir, 190.0, epsilon = 1e-4);
        // The solution must be consistent with the forward map.
        let sample = m.map_normal(sol.normal_dir).expect("visible normal");
        assert_relative_eq!(sample.sky_dir, sol.sky_dir, epsilon = 1e-9);
    }

    #[test]
    fn test_find_normal_unreachable() {
        // r = 1, d = 2 reaches sky directions in roughly [30, 330].
        assert!(mirror().find_normal_for_sky(400.0).is_none());
    }
}

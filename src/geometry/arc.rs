use crate::error::{GeometryError, Result};
use crate::math::angle::normalize_angle;
use crate::math::point_2d::project;
use crate::math::Point2;

/// A reflective circular arc centered on the origin.
///
/// The arc is described by its radius and the normal directions (in
/// degrees) at its two edges. Normals point outward from the center of
/// curvature, so a point of the arc at normal direction `n` sits at
/// distance `radius` from the origin along `n`. The sweep runs
/// counter-clockwise from `min_normal_dir` to `max_normal_dir`.
#[derive(Debug, Clone)]
pub struct MirrorArc {
    radius: f64,
    min_normal_dir: f64,
    max_normal_dir: f64,
}

impl MirrorArc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn new(radius: f64, min_normal_dir: f64, max_normal_dir: f64) -> Result<Self> {
        if radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius).into());
        }
        Ok(Self {
            radius,
            min_normal_dir,
            max_normal_dir,
        })
    }

    /// Center of curvature, fixed at the origin.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::origin()
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn min_normal_dir(&self) -> f64 {
        self.min_normal_dir
    }

    #[must_use]
    pub fn max_normal_dir(&self) -> f64 {
        self.max_normal_dir
    }

    /// Normal direction at the middle of the sweep.
    #[must_use]
    pub fn mid_normal_dir(&self) -> f64 {
        (self.min_normal_dir + self.max_normal_dir) / 2.0
    }

    /// Angular width of the sweep in degrees.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_normal_dir - self.min_normal_dir
    }

    /// Point of the arc's circle whose outward normal is `normal_dir`.
    #[must_use]
    pub fn point_at_normal(&self, normal_dir: f64) -> Point2 {
        project(&self.center(), normal_dir, self.radius)
    }

    /// Arc point at the minimum-normal edge.
    #[must_use]
    pub fn min_point(&self) -> Point2 {
        self.point_at_normal(self.min_normal_dir)
    }

    /// Arc point at the maximum-normal edge.
    #[must_use]
    pub fn max_point(&self) -> Point2 {
        self.point_at_normal(self.max_normal_dir)
    }

    /// Arc point at the middle of the sweep.
    #[must_use]
    pub fn mid_point(&self) -> Point2 {
        self.point_at_normal(self.mid_normal_dir())
    }

    /// Tests whether a normal direction falls within the sweep.
    ///
    /// All three angles are normalized first, then the upper edge and
    /// the test angle are lifted by a full turn as needed so a sweep
    /// crossing 0 degrees compares correctly.
    #[must_use]
    pub fn contains_normal(&self, normal_dir: f64) -> bool {
        let mut test = normalize_angle(normal_dir);
        let min = normalize_angle(self.min_normal_dir);
        let mut max = normalize_angle(self.max_normal_dir);

        if max < min {
            max += 360.0;
        }
        if test < min {
            test += 360.0;
        }

        test >= min && test <= max
    }
}

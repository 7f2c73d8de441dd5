use crate::math::point_2d::distance;
use crate::math::Point2;

/// Running axis-aligned bounding box over a stream of points.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundingBox {
    bounds: Option<(Point2, Point2)>,
}

impl BoundingBox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grows the box to cover `pt`.
    pub fn update(&mut self, pt: &Point2) {
        match &mut self.bounds {
            None => self.bounds = Some((*pt, *pt)),
            Some((min, max)) => {
                min.x = min.x.min(pt.x);
                min.y = min.y.min(pt.y);
                max.x = max.x.max(pt.x);
                max.y = max.y.max(pt.y);
            }
        }
    }

    /// True once at least one point has been folded in.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.bounds.is_some()
    }

    #[must_use]
    pub fn min(&self) -> Option<Point2> {
        self.bounds.map(|(min, _)| min)
    }

    #[must_use]
    pub fn max(&self) -> Option<Point2> {
        self.bounds.map(|(_, max)| max)
    }

    /// Center of the box.
    #[must_use]
    pub fn mid(&self) -> Option<Point2> {
        self.bounds
            .map(|(min, max)| Point2::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0))
    }

    /// Length of the box diagonal.
    #[must_use]
    pub fn diagonal(&self) -> Option<f64> {
        self.bounds.map(|(min, max)| distance(&min, &max))
    }
}

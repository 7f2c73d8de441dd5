pub mod concave;
pub mod convex;
pub mod search;

use crate::math::Point2;

pub use concave::{trace_concave, Trace, MAX_BOUNCES};
pub use convex::{ConvexMirror, ConvexSolution, NormalSample, BISECTION_LIMIT};
pub use search::{search_arc_for_sun, MAX_SEARCH_DEPTH, SEARCH_STEPS};

/// Classification of a traced incident ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayStatus {
    /// Not yet classified.
    Unknown,
    /// The ray approached the convex side of the surface.
    Convex,
    /// The ray approached the concave side but has not resolved yet.
    Concave,
    /// The ray would have to pass through the mirror to arrive.
    Obscured,
    /// The ray reflected and struck the arc again at least once.
    NStrike,
    /// The ray was still striking the arc when the bounce cap hit.
    NStrikeOut,
    /// The ray reflected once and left the arc cleanly.
    Unobscured,
}

impl RayStatus {
    /// True when the trace produced a final reflected direction.
    #[must_use]
    pub fn has_reflection(self) -> bool {
        matches!(self, Self::NStrike | Self::NStrikeOut | Self::Unobscured)
    }

    /// True when the incident ray never escaped the mirror.
    #[must_use]
    pub fn is_blocked(self) -> bool {
        !self.has_reflection()
    }
}

/// One fully traced light path.
#[derive(Debug, Clone)]
pub struct TracedRay {
    /// Travel direction of the incoming light, in degrees.
    pub sun_dir: f64,
    /// First strike point on the mirror.
    pub mirror_point: Point2,
    pub status: RayStatus,
    /// Final outgoing direction, when the ray escaped.
    pub reflect_dir: Option<f64>,
    /// Every strike point in order, starting with `mirror_point`.
    pub strike_points: Vec<Point2>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates_partition() {
        let all = [
            RayStatus::Unknown,
            RayStatus::Convex,
            RayStatus::Concave,
            RayStatus::Obscured,
            RayStatus::NStrike,
            RayStatus::NStrikeOut,
            RayStatus::Unobscured,
        ];
        for status in all {
            assert_ne!(
                status.has_reflection(),
                status.is_blocked(),
                "predicates must partition {status:?}"
            );
        }
        assert!(RayStatus::Unobscured.has_reflection());
        assert!(RayStatus::NStrike.has_reflection());
        assert!(RayStatus::NStrikeOut.has_reflection());
        assert!(RayStatus::Obscured.is_blocked());
        assert!(RayStatus::Convex.is_blocked());
    }
}

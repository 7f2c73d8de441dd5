//! Angle algebra in degrees.
//!
//! All directions in the kernel are plane angles measured
//! counter-clockwise from the positive X axis, canonically in
//! `[0, 360)`. Intermediate arithmetic is allowed to leave that range;
//! callers normalize at the boundaries where a canonical value matters.

use tracing::trace;

use crate::math::TOLERANCE;

/// Normalizes an angle in degrees into the canonical range `[0, 360)`.
#[must_use]
pub fn normalize_angle(degrees: f64) -> f64 {
    let mut deg = degrees;
    while deg >= 360.0 {
        deg -= 360.0;
    }
    while deg < 0.0 {
        deg += 360.0;
    }
    deg
}

/// Reduces an angle into `[0, 180)`, the undirected-line counterpart
/// of [`normalize_angle`].
#[must_use]
pub fn min_angle(degrees: f64) -> f64 {
    let mut deg = degrees;
    while deg >= 180.0 {
        deg -= 180.0;
    }
    while deg < 0.0 {
        deg += 180.0;
    }
    deg
}

/// Compares two scalars with the default [`TOLERANCE`] for both the
/// multiplicative and the additive check.
#[must_use]
pub fn nearly_equal(f1: f64, f2: f64) -> bool {
    nearly_equal_tol(f1, f2, TOLERANCE, TOLERANCE)
}

/// Compares two scalars under a combined tolerance scheme.
///
/// Bit-equal values match immediately. Otherwise the magnitudes must
/// pass a multiplicative ratio test (failing when `max / mult_tol`
/// drops below `min`) and an additive difference test (failing when
/// `max - min` exceeds `add_tol`), each skipped when its tolerance is
/// zero. Both tests run on absolute values.
#[must_use]
pub fn nearly_equal_tol(f1: f64, f2: f64, mult_tol: f64, add_tol: f64) -> bool {
    if f1 == f2 {
        return true;
    }

    let (max, min) = if f1.abs() > f2.abs() {
        (f1.abs(), f2.abs())
    } else {
        (f2.abs(), f1.abs())
    };

    if mult_tol != 0.0 && max / mult_tol < min {
        trace!(f1, f2, mult_tol, "multiplicative tolerance test failed");
        return false;
    }
    if add_tol != 0.0 && max - min > add_tol {
        trace!(f1, f2, add_tol, "additive tolerance test failed");
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_normalize_angle_in_range() {
        assert!((normalize_angle(45.0) - 45.0).abs() < TOL);
        assert!((normalize_angle(0.0) - 0.0).abs() < TOL);
        assert!((normalize_angle(359.9) - 359.9).abs() < TOL);
    }

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(360.0) - 0.0).abs() < TOL);
        assert!((normalize_angle(540.0) - 180.0).abs() < TOL);
        assert!((normalize_angle(-90.0) - 270.0).abs() < TOL);
        assert!((normalize_angle(-720.0) - 0.0).abs() < TOL);
    }

    #[test]
    fn test_normalize_angle_idempotent() {
        for deg in [-1000.0, -359.5, 0.0, 12.3, 359.999, 1234.5] {
            let once = normalize_angle(deg);
            let twice = normalize_angle(once);
            assert!((once - twice).abs() < TOL, "not idempotent at {deg}");
            assert!((0.0..360.0).contains(&once), "out of range at {deg}");
        }
    }

    #[test]
    fn test_min_angle_reduces_mod_half_turn() {
        assert!((min_angle(20.0) - 20.0).abs() < TOL);
        assert!((min_angle(200.0) - 20.0).abs() < TOL);
        assert!((min_angle(340.0) - 160.0).abs() < TOL);
        assert!((min_angle(-20.0) - 160.0).abs() < TOL);
        assert!((min_angle(180.0) - 0.0).abs() < TOL);
        for deg in [-270.0, 0.0, 90.0, 179.9, 540.0] {
            assert!((0.0..180.0).contains(&min_angle(deg)), "out of range at {deg}");
        }
    }

    #[test]
    fn test_nearly_equal_exact_and_close() {
        assert!(nearly_equal(1.0, 1.0));
        assert!(nearly_equal(1.0, 1.0 + 1e-9));
        assert!(!nearly_equal(1.0, 1.1));
    }

    #[test]
    fn test_nearly_equal_magnitudes_only() {
        // The tolerance tests compare absolute values, so opposite
        // signs of equal magnitude pass.
        assert!(nearly_equal(1.0, -1.0));
    }

    #[test]
    fn test_nearly_equal_tol_disabled_checks() {
        // A zero tolerance disables that check entirely.
        assert!(nearly_equal_tol(1.0, 1000.0, 0.0, 0.0));
        assert!(!nearly_equal_tol(1.0, 1000.0, 0.0, 1e-6));
    }

    #[test]
    fn test_nearly_equal_tol_multiplicative() {
        // The ratio test trips when max / mult_tol falls below min.
        assert!(!nearly_equal_tol(1.0, 1000.0, 2000.0, 0.0));
        assert!(nearly_equal_tol(1.0, 1000.0, 500.0, 0.0));
    }
}

pub mod angle;
pub mod intersect_2d;
pub mod point_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global tolerance for nearly-equal comparisons, used both as the
/// multiplicative ratio bound and the additive difference bound.
pub const TOLERANCE: f64 = 1e-6;

/// Sentinel marking a numerically undefined scalar result.
///
/// Metrics that cannot be computed (no surviving rays, a failed solve)
/// carry this value instead of NaN so they compare and print cleanly.
pub const UNDEFINED: f64 = 9.999e9;

/// Returns `true` if `value` is a real result rather than the
/// [`UNDEFINED`] sentinel.
#[must_use]
pub fn is_defined(value: f64) -> bool {
    value != UNDEFINED
}

//! Rounding convention shared by every formula and setter.
//!
//! Stat formulas are integer-valued game rules evaluated in `f64`. Products
//! like `0.9 * 20.0` land a hair below the intended integer, so every floor
//! is biased by [`EPSILON`] before truncating, and every ceil is biased the
//! other way. Nothing else in the crate calls `f64::floor`/`f64::ceil` on a
//! stat directly.

/// Bias applied before flooring (and subtracted before ceiling).
pub const EPSILON: f64 = 1.0e-6;

/// `floor(x + EPSILON)`.
#[inline]
pub fn floor_eps(x: f64) -> f64 {
    (x + EPSILON).floor()
}

/// `ceil(x - EPSILON)`.
#[inline]
pub fn ceil_eps(x: f64) -> f64 {
    (x - EPSILON).ceil()
}

/// Sanitises a user-supplied counter.
///
/// Non-finite and negative inputs become zero, everything else is floored
/// with the epsilon bias. Values beyond `u32::MAX` saturate.
pub fn sanitize_count(x: f64) -> u32 {
    if !x.is_finite() || x < 0.0 {
        return 0;
    }
    let floored = floor_eps(x);
    if floored >= u32::MAX as f64 {
        u32::MAX
    } else {
        floored as u32
    }
}

/// Sanitises a user-supplied wing dimension.
///
/// Non-finite input falls back to `fallback`; the result is floored and
/// clamped to `[min, max]`.
pub fn sanitize_dimension(x: f64, fallback: f64, min: f64, max: f64) -> f64 {
    let x = if x.is_finite() { x } else { fallback };
    floor_eps(x).clamp(min, max)
}

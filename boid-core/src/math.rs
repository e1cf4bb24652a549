//! Float helpers that work with and without `std`.

use core::f32::consts::{PI, TAU};

#[cfg(feature = "std")]
pub fn sqrt(x: f32) -> f32 {
    x.sqrt()
}

#[cfg(not(feature = "std"))]
pub fn sqrt(x: f32) -> f32 {
    libm::sqrtf(x)
}

#[cfg(feature = "std")]
pub fn sin(x: f32) -> f32 {
    x.sin()
}

#[cfg(not(feature = "std"))]
pub fn sin(x: f32) -> f32 {
    libm::sinf(x)
}

#[cfg(feature = "std")]
pub fn cos(x: f32) -> f32 {
    x.cos()
}

#[cfg(not(feature = "std"))]
pub fn cos(x: f32) -> f32 {
    libm::cosf(x)
}

#[cfg(feature = "std")]
pub fn atan2(y: f32, x: f32) -> f32 {
    y.atan2(x)
}

#[cfg(not(feature = "std"))]
pub fn atan2(y: f32, x: f32) -> f32 {
    libm::atan2f(y, x)
}

#[cfg(feature = "std")]
pub fn floor(x: f32) -> f32 {
    x.floor()
}

#[cfg(not(feature = "std"))]
pub fn floor(x: f32) -> f32 {
    libm::floorf(x)
}

#[cfg(feature = "std")]
pub fn abs(x: f32) -> f32 {
    x.abs()
}

#[cfg(not(feature = "std"))]
pub fn abs(x: f32) -> f32 {
    libm::fabsf(x)
}

/// Euclidean remainder of `value` by `modulus`, always in [0, modulus).
///
/// Rounding can push `value - modulus * floor(value / modulus)` up to
/// exactly `modulus` for tiny negative inputs; that case folds back to 0.
pub fn wrap(value: f32, modulus: f32) -> f32 {
    let r = value - modulus * floor(value / modulus);
    if r >= modulus || r < 0.0 {
        0.0
    } else {
        r
    }
}

/// Normalize an angle in radians to [0, 2π).
pub fn normalize_angle(angle: f32) -> f32 {
    wrap(angle, TAU)
}

/// Shortest signed rotation from `from` to `to`, in (-π, π].
pub fn angle_difference(from: f32, to: f32) -> f32 {
    let diff = wrap(to - from + PI, TAU) - PI;
    if diff <= -PI {
        diff + TAU
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn test_normalize_angle_range() {
        for raw in [-10.0, -TAU, -PI, -1e-9, 0.0, 1.0, TAU, 3.0 * TAU + 0.5, 100.0] {
            let a = normalize_angle(raw);
            assert!((0.0..TAU).contains(&a), "{raw} -> {a}");
        }
        assert!((normalize_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_angle_difference_is_shortest() {
        assert!((angle_difference(0.1, TAU - 0.1) + 0.2).abs() < 1e-5);
        assert!((angle_difference(TAU - 0.1, 0.1) - 0.2).abs() < 1e-5);
        assert!((angle_difference(0.0, FRAC_PI_2) - FRAC_PI_2).abs() < 1e-6);
        assert!((angle_difference(FRAC_PI_2, 0.0) + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_angle_difference_half_turn_is_positive() {
        let d = angle_difference(0.0, PI);
        assert!(d > 0.0);
        assert!((d - PI).abs() < 1e-5);
    }

    #[test]
    fn test_wrap_into_range() {
        assert_eq!(wrap(5.0, 10.0), 5.0);
        assert!((wrap(-1.0, 10.0) - 9.0).abs() < 1e-6);
        assert!((wrap(12.5, 10.0) - 2.5).abs() < 1e-6);
        assert_eq!(wrap(10.0, 10.0), 0.0);
    }
}

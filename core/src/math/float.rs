//! Floating-point compatibility API.
//!
//! Most floating-point functions are unavailable in `no_std`. This module
//! provides the missing functions using the `libm` crate if the `libm`
//! feature is enabled. As a fallback, it also implements the square root
//! even if no fp feature is enabled; trigonometric functions are then
//! unavailable.
//!
//! Import the `f64` item of this module inside function bodies and call
//! e.g. `f64::sqrt(x)`. With `std` enabled, it resolves to the inherent
//! methods of the primitive type.

#[cfg(feature = "libm")]
pub mod libm {
    pub use libm::{acos, atan2, cos, sin, sqrt, tan};

    #[inline]
    pub fn recip_sqrt(x: f64) -> f64 {
        1.0 / sqrt(x)
    }
}

pub mod fallback {
    /// Returns the reciprocal of the square root of `x`.
    #[inline]
    pub fn recip_sqrt(x: f64) -> f64 {
        fast_recip_sqrt(x)
    }
    /// Returns the square root of `x`, or NaN if `x` is negative.
    #[inline]
    pub fn sqrt(x: f64) -> f64 {
        if x < 0.0 {
            f64::NAN
        } else if x == 0.0 {
            0.0
        } else {
            x * recip_sqrt(x)
        }
    }

    /// Returns an approximation of the reciprocal square root of a number,
    /// refined to close to full `f64` precision.
    #[inline]
    pub fn fast_recip_sqrt(x: f64) -> f64 {
        // https://en.wikipedia.org/wiki/Fast_inverse_square_root
        const MAGIC: u64 = 0x5fe6_eb50_c7b5_37a9;
        let mut y = f64::from_bits(MAGIC.saturating_sub(x.to_bits() >> 1));
        // Each round of Newton's method roughly doubles the correct digits
        for _ in 0..4 {
            y *= 1.5 - 0.5 * x * y * y;
        }
        y
    }
}

#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f64 = core::primitive::f64;

#[allow(unused)]
pub(crate) trait RecipSqrt {
    fn recip_sqrt(x: Self) -> Self;
}

#[cfg(feature = "std")]
impl RecipSqrt for f64 {
    #[inline]
    fn recip_sqrt(x: f64) -> f64 {
        1.0 / x.sqrt()
    }
}

#[cfg(all(feature = "libm", not(feature = "std")))]
pub use libm as f64;

#[cfg(not(feature = "fp"))]
pub use fallback as f64;

#[cfg(test)]
#[allow(unused_imports)]
mod tests {
    use core::f64::consts::*;

    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn fast_recip_sqrt_is_accurate() {
        use fallback::fast_recip_sqrt;
        assert_approx_eq!(fast_recip_sqrt(4.0), 0.5);
        assert_approx_eq!(fast_recip_sqrt(9.0), 1.0 / 3.0);
        assert_approx_eq!(fast_recip_sqrt(2.0), FRAC_1_SQRT_2);
        assert_approx_eq!(fast_recip_sqrt(1e-8), 1e4);
    }

    #[cfg(feature = "libm")]
    #[test]
    fn libm_functions() {
        assert_eq!(libm::sqrt(9.0), 3.0);
        assert_eq!(libm::sqrt(16.0), 4.0);
        assert!(libm::sqrt(-1.0).is_nan());
        assert_eq!(libm::recip_sqrt(4.0), 0.5);

        assert_approx_eq!(libm::sin(FRAC_PI_6), 0.5);
        assert_eq!(libm::cos(PI), -1.0);
        assert_approx_eq!(libm::tan(FRAC_PI_4), 1.0);
        assert_approx_eq!(libm::acos(0.0), FRAC_PI_2);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_functions() {
        assert_eq!(<f64 as RecipSqrt>::recip_sqrt(4.0), 0.5);
        assert_eq!(f64::sqrt(9.0), 3.0);
        assert!(f64::sqrt(-1.0).is_nan());
        assert_eq!(f64::cos(PI), -1.0);
    }

    #[test]
    fn fallback_functions() {
        use fallback as fb;
        assert_approx_eq!(fb::sqrt(9.0), 3.0);
        assert_approx_eq!(fb::sqrt(16.0), 4.0);
        assert_approx_eq!(fb::sqrt(2.0), SQRT_2);
        assert_eq!(fb::sqrt(0.0), 0.0);
        assert!(fb::sqrt(-1.0).is_nan());
        assert_approx_eq!(fb::recip_sqrt(9.0), 1.0 / 3.0);
    }
}

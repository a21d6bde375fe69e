//! Linear algebra for 3D transforms.
//!
//! Includes [vectors][self::vec], [matrices][mat], [quaternions][quat], and
//! [angles][angle], as well as utilities such as linear interpolation and
//! approximate equality comparisons.
//!
//! This library is more strongly typed than many other similar math libraries.
//! It aims to diagnose at compile time many errors that might otherwise only
//! manifest as subtly wrong transforms at runtime.
//!
//! In particular, vectors are tagged with a type that represents the *space*
//! they're embedded in, and values in different spaces cannot be mixed
//! without explicit conversion (transformation). Matrices, similarly, are
//! tagged by both source and destination space, and can only be applied to
//! matching vectors or composed with matching matrices. Angles are strongly
//! typed as well, to allow working with different angular units without
//! confusion.
//!
//! All computation is done in `f64`. Operations that can fail on degenerate
//! input, such as normalizing a zero vector or inverting a singular matrix,
//! return a [`Result`][crate::Result] rather than silently producing NaNs.

pub use {
    angle::{Angle, degs, rads, turns},
    approx::ApproxEq,
    mat::{
        Apply, Mat2, Mat3, Mat4, Matrix, RealToReal, look_at, orthographic,
        scale, translate, trs, viewport,
    },
    quat::{Quat, quat},
    space::Real,
    vec::{Vec2, Vec3, Vec4, Vector, splat, vec2, vec3, vec4},
};
#[cfg(feature = "fp")]
pub use {
    angle::acos,
    mat::{perspective, rotate, rotate_x, rotate_y, rotate_z},
};

pub mod angle;
pub mod approx;
pub mod float;
pub mod mat;
pub mod quat;
pub mod space;
pub mod vec;

/// Trait for linear interpolation between two values.
pub trait Lerp: Sized {
    /// Linearly interpolates between `self` and `other`.
    ///
    /// if `t` = 0, returns `self`; if `t` = 1, returns `other`.
    /// For 0 < `t` < 1, returns the weighted average of `self` and `other`
    /// ```text
    /// (1 - t) * self + t * other
    /// ```
    ///
    /// This method does not panic if `t < 0.0` or `t > 1.0`, or if `t`
    /// is `NaN`; values outside [0, 1] extrapolate.
    ///
    /// # Examples
    /// ```
    /// use vantage_core::math::Lerp;
    ///
    /// assert_eq!(f64::lerp(&1.0, &5.0, 0.25), 2.0);
    /// ```
    fn lerp(&self, other: &Self, t: f64) -> Self;

    /// Returns the (unweighted) average of `self` and `other`.
    ///
    /// # Examples
    /// ```
    /// use vantage_core::math::{Lerp, vec2};
    ///
    /// let a = vec2(-1.0, 2.0);
    /// let b = vec2(3.0, -2.0);
    /// assert_eq!(a.midpoint(&b), vec2(1.0, 0.0));
    /// ```
    fn midpoint(&self, other: &Self) -> Self {
        self.lerp(other, 0.5)
    }
}

/// Linearly interpolates between two values.
///
/// For examples and more information, see [`Lerp::lerp`].
#[inline]
pub fn lerp<T: Lerp>(t: f64, from: T, to: T) -> T {
    from.lerp(&to, t)
}

impl Lerp for f64 {
    /// Linearly interpolates between `self` and `other`.
    ///
    /// # Examples
    /// ```
    /// use vantage_core::math::Lerp;
    ///
    /// assert_eq!(2.0_f64.lerp(&5.0, 0.0), 2.0);
    /// assert_eq!(2.0_f64.lerp(&5.0, 0.25), 2.75);
    /// assert_eq!(2.0_f64.lerp(&5.0, 0.75), 4.25);
    /// assert_eq!(2.0_f64.lerp(&5.0, 1.0), 5.0);
    /// ```
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

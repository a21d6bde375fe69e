//! Quaternions for representing 3D rotations.

use core::ops::{Add, Div, Mul, MulAssign, Neg};

use crate::error::{Error, Result};
#[cfg(feature = "fp")]
use crate::math::angle::{Angle, acos};
use crate::math::{
    approx::ApproxEq,
    mat::{Mat3, Mat4, Matrix},
    vec::{Vec3, vec3, vec4},
};

/// A quaternion `w + xi + yj + zk`.
///
/// Unit quaternions represent rotations in 3D space. The scalar part `w`
/// comes first in constructors; the vector part is `(x, y, z)`.
///
/// Operations that only make sense for rotations, such as
/// [`rotate`][Self::rotate] and [`to_mat3`][Self::to_mat3], assume that
/// `self` is normalized.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Returns the quaternion `w + xi + yj + zk`.
#[inline]
pub const fn quat(w: f64, x: f64, y: f64, z: f64) -> Quat {
    Quat::new(w, x, y, z)
}

impl Quat {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Returns the quaternion `w + xi + yj + zk`.
    #[inline]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Returns a quaternion with scalar part `w` and vector part `v`.
    #[inline]
    pub fn from_parts(w: f64, v: Vec3) -> Self {
        let [x, y, z] = v.0;
        Self::new(w, x, y, z)
    }

    /// Returns the vector part of `self`.
    #[inline]
    pub fn vector(&self) -> Vec3 {
        vec3(self.x, self.y, self.z)
    }

    /// Returns the four-dimensional dot product of `self` and `other`.
    pub fn dot(&self, other: &Self) -> f64 {
        self.w * other.w
            + self.x * other.x
            + self.y * other.y
            + self.z * other.z
    }

    /// Returns the norm of `self`, squared.
    #[inline]
    pub fn len_sqr(&self) -> f64 {
        self.dot(self)
    }

    /// Returns the norm of `self`.
    ///
    /// Scaled by the largest absolute component, like [`Vector::len`],
    /// so that extreme magnitudes neither overflow nor underflow.
    ///
    /// [`Vector::len`]: crate::math::Vector::len
    pub fn len(&self) -> f64 {
        vec4(self.w, self.x, self.y, self.z).len()
    }

    /// Returns `self` scaled to unit norm.
    ///
    /// # Errors
    /// [`Error::ZeroLengthQuaternion`] if `self` is zero.
    pub fn normalize(&self) -> Result<Self> {
        let len = self.len();
        if len == 0.0 {
            Err(Error::ZeroLengthQuaternion)
        } else {
            Ok(*self / len)
        }
    }

    /// Returns the conjugate of `self`, `w - xi - yj - zk`.
    ///
    /// For a unit quaternion, the conjugate is also the inverse.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Returns the multiplicative inverse of `self`.
    ///
    /// # Errors
    /// [`Error::ZeroLengthQuaternion`] if `self` is zero.
    pub fn inverse(&self) -> Result<Self> {
        let len = self.len();
        if len == 0.0 {
            Err(Error::ZeroLengthQuaternion)
        } else {
            Ok(self.conjugate() / len / len)
        }
    }

    /// Rotates `v` by `self`.
    ///
    /// Equivalent to the sandwich product `q v q*`, but cheaper.
    pub fn rotate<B>(&self, v: Vec3<B>) -> Vec3<B> {
        let u: Vec3<B> = self.vector().to();
        let t = u.cross(&v) * 2.0;
        v + t * self.w + u.cross(&t)
    }

    /// Returns the rotation matrix equivalent to `self`.
    pub fn to_mat3(&self) -> Mat3 {
        let Self { w, x, y, z } = *self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Matrix::from_rows([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy)],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx)],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy)],
        ])
    }

    /// Returns the homogeneous rotation matrix equivalent to `self`.
    pub fn to_mat4(&self) -> Mat4 {
        self.to_mat3().into()
    }

    /// Returns the rotation quaternion equivalent to the rotation matrix `m`.
    ///
    /// Uses the trace of `m` when positive; otherwise, to avoid dividing by
    /// a small number, branches on the largest diagonal element. The result
    /// is only meaningful if `m` is orthonormal with determinant 1.
    pub fn from_mat3<F, T>(m: &Mat3<F, T>) -> Self {
        use crate::math::float::f64;
        let e = |r, c| m.at(r, c);
        let (m00, m11, m22) = (e(0, 0), e(1, 1), e(2, 2));
        let trace = m00 + m11 + m22;

        if trace > 0.0 {
            let s = f64::sqrt(trace + 1.0) * 2.0; // 4w
            Self::new(
                0.25 * s,
                (e(2, 1) - e(1, 2)) / s,
                (e(0, 2) - e(2, 0)) / s,
                (e(1, 0) - e(0, 1)) / s,
            )
        } else if m00 > m11 && m00 > m22 {
            let s = f64::sqrt(1.0 + m00 - m11 - m22) * 2.0; // 4x
            Self::new(
                (e(2, 1) - e(1, 2)) / s,
                0.25 * s,
                (e(0, 1) + e(1, 0)) / s,
                (e(0, 2) + e(2, 0)) / s,
            )
        } else if m11 > m22 {
            let s = f64::sqrt(1.0 + m11 - m00 - m22) * 2.0; // 4y
            Self::new(
                (e(0, 2) - e(2, 0)) / s,
                (e(0, 1) + e(1, 0)) / s,
                0.25 * s,
                (e(1, 2) + e(2, 1)) / s,
            )
        } else {
            let s = f64::sqrt(1.0 + m22 - m00 - m11) * 2.0; // 4z
            Self::new(
                (e(1, 0) - e(0, 1)) / s,
                (e(0, 2) + e(2, 0)) / s,
                (e(1, 2) + e(2, 1)) / s,
                0.25 * s,
            )
        }
    }
}

#[cfg(feature = "fp")]
impl Quat {
    /// Returns a quaternion representing a rotation by `angle` about `axis`.
    ///
    /// `axis` need not be of unit length.
    ///
    /// # Errors
    /// [`Error::DegenerateAxis`] if `axis` has length zero.
    ///
    /// # Examples
    /// ```
    /// use vantage_core::assert_approx_eq;
    /// use vantage_core::math::{Quat, degs, vec3};
    ///
    /// let q = Quat::from_axis_angle(vec3(0.0, 0.0, 2.0), degs(90.0)).unwrap();
    /// assert_approx_eq!(q.rotate(vec3(1.0, 0.0, 0.0)), vec3(0.0, 1.0, 0.0));
    /// ```
    pub fn from_axis_angle(axis: Vec3, angle: Angle) -> Result<Self> {
        let axis = axis.normalize().map_err(|_| Error::DegenerateAxis)?;
        let (s, c) = (angle / 2.0).sin_cos();
        Ok(Self::from_parts(c, axis * s))
    }

    /// Returns the rotation axis and angle of `self`.
    ///
    /// The angle is in the range [0°, 360°]. If `self` is the identity
    /// rotation, the axis is arbitrarily chosen to be the x axis.
    pub fn to_axis_angle(&self) -> (Vec3, Angle) {
        let v = self.vector();
        let len = v.len();
        if len == 0.0 {
            (Vec3::X, Angle::ZERO)
        } else {
            (v / len, acos(self.w / self.len()) * 2.0)
        }
    }

    /// Spherically interpolates between `self` and `other`.
    ///
    /// Both quaternions should be normalized. Interpolates along the shorter
    /// arc: if the four-dimensional dot product is negative, `other` is
    /// negated first, so the result at `t = 1` may equal `-other`, which
    /// represents the same rotation.
    ///
    /// Returns `self` if the quaternions are identical (up to sign). If they
    /// are nearly so, falls back to a normalized halfway blend.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `t` is not in the range [0, 1].
    pub fn slerp(&self, other: &Self, t: f64) -> Result<Self> {
        use crate::math::float::f64;

        if !(0.0..=1.0).contains(&t) {
            log::debug!("slerp parameter {t} out of range");
            return Err(Error::OutOfRange(t));
        }
        let (mut target, mut cos_half) = (*other, self.dot(other));
        if cos_half < 0.0 {
            target = -target;
            cos_half = -cos_half;
        }
        if cos_half >= 1.0 {
            return Ok(*self);
        }
        let sin_half = f64::sqrt(1.0 - cos_half * cos_half);
        if sin_half < 0.001 {
            return (*self * 0.5 + target * 0.5).normalize();
        }
        let half = acos(cos_half);
        let a = (half * (1.0 - t)).sin() / sin_half;
        let b = (half * t).sin() / sin_half;
        Ok(*self * a + target * b)
    }
}

impl Default for Quat {
    /// Returns the identity rotation.
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ApproxEq<Self, f64> for Quat {
    fn approx_eq_eps(&self, other: &Self, eps: &f64) -> bool {
        let Self { w, x, y, z } = *self;
        [w, x, y, z].approx_eq_eps(&[other.w, other.x, other.y, other.z], eps)
    }
    fn relative_epsilon() -> f64 {
        f64::relative_epsilon()
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Returns the Hamilton product of `self` and `rhs`.
    ///
    /// As a rotation, the product first applies `rhs`, then `self`.
    fn mul(self, rhs: Self) -> Self {
        let Self { w: aw, x: ax, y: ay, z: az } = self;
        let Self { w: bw, x: bx, y: by, z: bz } = rhs;
        Self::new(
            aw * bw - ax * bx - ay * by - az * bz,
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
        )
    }
}

impl MulAssign for Quat {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<f64> for Quat {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.w * rhs, self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Quat {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.w / rhs, self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Add for Quat {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.w + rhs.w,
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
        )
    }
}

impl Neg for Quat {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn hamilton_product_of_units() {
        let i = quat(0.0, 1.0, 0.0, 0.0);
        let j = quat(0.0, 0.0, 1.0, 0.0);
        let k = quat(0.0, 0.0, 0.0, 1.0);
        let one = Quat::IDENTITY;
        assert_eq!(i * j, k);
        assert_eq!(j * k, i);
        assert_eq!(k * i, j);
        assert_eq!(j * i, -k);
        assert_eq!(i * i, -one);
        assert_eq!(i * j * k, -one);
    }

    #[test]
    fn identity_is_neutral() {
        let q = quat(0.5, -1.0, 2.0, 3.0);
        assert_eq!(q * Quat::IDENTITY, q);
        assert_eq!(Quat::IDENTITY * q, q);
        assert_eq!(Quat::default(), Quat::IDENTITY);
    }

    #[test]
    fn normalize() {
        let q = quat(1.0, 1.0, 1.0, 1.0).normalize().unwrap();
        assert_eq!(q, quat(0.5, 0.5, 0.5, 0.5));
        let q = quat(3.0, -2.0, 0.1, 7.0).normalize().unwrap();
        assert_approx_eq!(q.len(), 1.0);
    }

    #[test]
    fn normalize_zero_fails() {
        assert_eq!(
            quat(0.0, 0.0, 0.0, 0.0).normalize(),
            Err(Error::ZeroLengthQuaternion)
        );
        assert_eq!(
            quat(0.0, 0.0, 0.0, 0.0).inverse(),
            Err(Error::ZeroLengthQuaternion)
        );
    }

    #[test]
    fn normalize_extreme_magnitudes() {
        let tiny = quat(1e-200, 0.0, 0.0, 0.0);
        assert_eq!(tiny.normalize(), Ok(Quat::IDENTITY));
        let huge = quat(-1e200, 0.0, 0.0, 0.0);
        assert_eq!(huge.normalize(), Ok(-Quat::IDENTITY));
        let q = quat(1e-200, 2e-200, -2e-200, 4e-200).normalize().unwrap();
        assert_approx_eq!(q, quat(0.2, 0.4, -0.4, 0.8));
        assert_approx_eq!(q.len(), 1.0);
    }

    #[test]
    fn inverse_extreme_magnitudes() {
        let q = quat(1e-200, 0.0, 0.0, 0.0);
        assert_approx_eq!(q.inverse().unwrap(), quat(1e200, 0.0, 0.0, 0.0));
        let q = quat(0.0, 3e150, 0.0, 4e150);
        assert_approx_eq!(q * q.inverse().unwrap(), Quat::IDENTITY);
    }

    #[test]
    fn inverse_and_conjugate() {
        let q = quat(1.0, 2.0, -3.0, 4.0);
        assert_eq!(q.conjugate(), quat(1.0, -2.0, 3.0, -4.0));
        assert_approx_eq!(q * q.inverse().unwrap(), Quat::IDENTITY);
        assert_approx_eq!(q.inverse().unwrap() * q, Quat::IDENTITY);
    }

    #[test]
    fn parts() {
        let q = Quat::from_parts(2.0, vec3(1.0, -1.0, 0.5));
        assert_eq!(q, quat(2.0, 1.0, -1.0, 0.5));
        assert_eq!(q.vector(), vec3(1.0, -1.0, 0.5));
    }

    #[test]
    fn identity_to_matrix() {
        assert_eq!(Quat::IDENTITY.to_mat3(), Mat3::identity());
        assert_eq!(Quat::IDENTITY.to_mat4(), Mat4::identity());
    }

    #[test]
    fn matrix_of_half_turn_about_x() {
        let m = quat(0.0, 1.0, 0.0, 0.0).to_mat3();
        assert_eq!(
            m,
            Mat3::from_rows([
                [1.0, 0.0, 0.0],
                [0.0, -1.0, 0.0],
                [0.0, 0.0, -1.0]
            ])
        );
    }

    #[test]
    fn from_mat3_all_branches() {
        // Trace positive, and each of the three diagonal branches
        for q in [
            quat(0.9, 0.1, -0.3, 0.2),
            quat(0.1, 0.9, 0.3, -0.2),
            quat(0.1, -0.3, 0.9, 0.2),
            quat(0.1, 0.2, -0.3, 0.9),
        ] {
            let q = q.normalize().unwrap();
            let r = Quat::from_mat3(&q.to_mat3());
            let r = if r.dot(&q) < 0.0 { -r } else { r };
            assert_approx_eq!(r, q);
        }
    }

    #[test]
    fn rotate_matches_matrix() {
        use crate::math::mat::Apply;
        let q = quat(0.3, -0.5, 0.2, 0.7).normalize().unwrap();
        let v = vec3(1.0, -2.0, 3.0);
        assert_approx_eq!(q.rotate(v), q.to_mat3().apply(&v));
        assert_approx_eq!(q.rotate(v), q.to_mat4().apply(&v));
    }

    #[test]
    fn approx_equality() {
        let q = quat(1.0, 2.0, 3.0, 4.0);
        assert!(q.approx_eq(&quat(1.0, 2.0, 3.0, 4.0 + 1e-12)));
        assert!(!q.approx_eq(&quat(1.0, 2.0, 3.0, 4.1)));
    }

    #[cfg(feature = "fp")]
    mod fp {
        use crate::math::angle::{degs, turns};

        use super::*;

        #[test]
        fn axis_angle_roundtrip() {
            let q = Quat::from_axis_angle(vec3(1.0, 2.0, 2.0), degs(60.0))
                .unwrap();
            let (axis, angle) = q.to_axis_angle();
            assert_approx_eq!(axis, vec3(1.0, 2.0, 2.0) / 3.0);
            assert_approx_eq!(angle, degs(60.0));
        }

        #[test]
        fn axis_angle_of_identity() {
            assert_eq!(Quat::IDENTITY.to_axis_angle(), (Vec3::X, Angle::ZERO));
        }

        #[test]
        fn zero_axis_fails() {
            assert_eq!(
                Quat::from_axis_angle(vec3(0.0, 0.0, 0.0), degs(30.0)),
                Err(Error::DegenerateAxis)
            );
        }

        #[test]
        fn rotation_by_axis_angle() {
            let q = Quat::from_axis_angle(Vec3::Y, turns(0.25)).unwrap();
            let (x, z): (Vec3, Vec3) = (Vec3::X, Vec3::Z);
            assert_approx_eq!(q.rotate(z), x);
            assert_approx_eq!(q.rotate(x), -z);
        }

        #[test]
        fn product_composes_rotations() {
            let a = Quat::from_axis_angle(Vec3::X, degs(90.0)).unwrap();
            let b = Quat::from_axis_angle(Vec3::Z, degs(90.0)).unwrap();
            let v = vec3(1.0, 2.0, 3.0);
            assert_approx_eq!((a * b).rotate(v), a.rotate(b.rotate(v)));
        }

        #[test]
        fn slerp_endpoints() {
            let a = Quat::IDENTITY;
            let b = Quat::from_axis_angle(Vec3::Z, degs(90.0)).unwrap();
            assert_approx_eq!(a.slerp(&b, 0.0).unwrap(), a);
            assert_approx_eq!(a.slerp(&b, 1.0).unwrap(), b);
        }

        #[test]
        fn slerp_halfway() {
            let a = Quat::IDENTITY;
            let b = Quat::from_axis_angle(Vec3::Z, degs(90.0)).unwrap();
            let expected =
                Quat::from_axis_angle(Vec3::Z, degs(45.0)).unwrap();
            let mid = a.slerp(&b, 0.5).unwrap();
            assert_approx_eq!(mid, expected);
            assert_approx_eq!(mid.len(), 1.0);
        }

        #[test]
        fn slerp_takes_shorter_arc() {
            let a = Quat::IDENTITY;
            let b = Quat::from_axis_angle(Vec3::Z, degs(90.0)).unwrap();
            let expected =
                Quat::from_axis_angle(Vec3::Z, degs(45.0)).unwrap();
            assert_approx_eq!(a.slerp(&-b, 0.5).unwrap(), expected);
            // The far endpoint is reached as the negation of the target
            assert_approx_eq!(a.slerp(&-b, 1.0).unwrap(), b);
        }

        #[test]
        fn slerp_identical_returns_self() {
            let q = Quat::from_axis_angle(Vec3::Y, degs(30.0)).unwrap();
            assert_approx_eq!(q.slerp(&q, 0.7).unwrap(), q);
            assert_eq!(
                Quat::IDENTITY.slerp(&-Quat::IDENTITY, 0.3),
                Ok(Quat::IDENTITY)
            );
        }

        #[test]
        fn slerp_nearly_identical_blends() {
            let a = Quat::IDENTITY;
            let b = Quat::from_axis_angle(Vec3::X, degs(0.1)).unwrap();
            let expected =
                Quat::from_axis_angle(Vec3::X, degs(0.05)).unwrap();
            // Falls back to the halfway blend regardless of t
            assert_approx_eq!(a.slerp(&b, 0.1).unwrap(), expected, eps = 1e-6);
        }

        #[test]
        fn slerp_out_of_range() {
            let a = Quat::IDENTITY;
            let b = Quat::from_axis_angle(Vec3::Z, degs(90.0)).unwrap();
            assert_eq!(a.slerp(&b, 1.5), Err(Error::OutOfRange(1.5)));
            assert_eq!(a.slerp(&b, -0.1), Err(Error::OutOfRange(-0.1)));
            assert!(a.slerp(&b, f64::NAN).is_err());
        }
    }
}

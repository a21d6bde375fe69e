//! Real-valued vectors of dimension 2, 3, and 4.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub,
    SubAssign,
};

use crate::error::{Error, Result};
#[cfg(feature = "fp")]
use crate::math::angle::{Angle, acos};
use crate::math::{Lerp, approx::ApproxEq, space::Real};

//
// Types
//

/// A generic vector type. Represents an element of a vector space,
/// parameterized on the component representation and the space.
///
/// The `Space` parameter is a zero-sized tag; vectors in different spaces
/// are distinct types and cannot be accidentally mixed.
#[repr(transparent)]
pub struct Vector<Repr, Space = ()>(pub Repr, PhantomData<Space>);

/// A 2-vector with `f64` components.
pub type Vec2<Basis = ()> = Vector<[f64; 2], Real<2, Basis>>;
/// A 3-vector with `f64` components.
pub type Vec3<Basis = ()> = Vector<[f64; 3], Real<3, Basis>>;
/// A 4-vector with `f64` components.
pub type Vec4<Basis = ()> = Vector<[f64; 4], Real<4, Basis>>;

//
// Free functions
//

/// Returns a 2-vector with components `x` and `y`.
#[inline]
pub const fn vec2(x: f64, y: f64) -> Vec2 {
    Vector::new([x, y])
}

/// Returns a 3-vector with components `x`, `y`, and `z`.
#[inline]
pub const fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vector::new([x, y, z])
}

/// Returns a 4-vector with components `x`, `y`, `z`, and `w`.
#[inline]
pub const fn vec4(x: f64, y: f64, z: f64, w: f64) -> Vec4 {
    Vector::new([x, y, z, w])
}

/// Returns a vector with all components equal to `s`.
///
/// # Examples
/// ```
/// use vantage_core::math::{Vec3, splat, vec3};
///
/// let v: Vec3 = splat(2.0);
/// assert_eq!(v, vec3(2.0, 2.0, 2.0));
/// ```
#[inline]
pub fn splat<Sp, const N: usize>(s: f64) -> Vector<[f64; N], Sp> {
    Vector::new([s; N])
}

//
// Inherent impls
//

impl<R, Sp> Vector<R, Sp> {
    /// Returns a new vector with representation `repr`.
    #[inline]
    pub const fn new(repr: R) -> Self {
        Self(repr, PhantomData)
    }

    /// Returns `self` with its space tag changed to `S`.
    ///
    /// This is a no-op; use it to move between spaces when there is no
    /// matrix describing the change, e.g. when passing a tagged vector to
    /// an untagged function.
    #[inline]
    pub fn to<S>(self) -> Vector<R, S> {
        Vector::new(self.0)
    }
}

impl<Sp, const N: usize> Vector<[f64; N], Sp> {
    /// Returns the dot product of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        let mut res = 0.0;
        for i in 0..N {
            res += self.0[i] * other.0[i];
        }
        res
    }

    /// Returns the length of `self`, squared.
    #[inline]
    pub fn len_sqr(&self) -> f64 {
        self.dot(self)
    }

    /// Returns the length (magnitude) of `self`.
    ///
    /// The components are scaled by the largest absolute component before
    /// squaring, so the result neither overflows nor underflows for very
    /// large or very small vectors.
    ///
    /// # Examples
    /// ```
    /// use vantage_core::{assert_approx_eq, math::vec3};
    ///
    /// assert_eq!(vec3(2.0, 3.0, 6.0).len(), 7.0);
    /// assert_approx_eq!(vec3(0.0, 3e200, 4e200).len(), 5e200, eps = 1e-12);
    /// ```
    pub fn len(&self) -> f64 {
        use crate::math::float::f64;
        let max = self.max_abs();
        if max == 0.0 || max.is_infinite() {
            // Zero, infinite, or all NaN
            return f64::sqrt(self.len_sqr());
        }
        max * f64::sqrt((*self / max).len_sqr())
    }

    fn max_abs(&self) -> f64 {
        self.0.iter().fold(0.0_f64, |max, c| max.max(c.abs()))
    }

    /// Returns `self` scaled to unit length.
    ///
    /// # Errors
    /// [`Error::ZeroLengthVector`] if `self` has length zero.
    ///
    /// # Examples
    /// ```
    /// use vantage_core::{Error, math::vec2};
    ///
    /// assert_eq!(vec2(3.0, 4.0).normalize(), Ok(vec2(0.6, 0.8)));
    /// assert_eq!(vec2(0.0, 0.0).normalize(), Err(Error::ZeroLengthVector));
    /// ```
    pub fn normalize(&self) -> Result<Self> {
        let len = self.len();
        if len == 0.0 {
            Err(Error::ZeroLengthVector)
        } else {
            Ok(*self / len)
        }
    }

    /// Returns the Euclidean distance between `self` and `other`.
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).len()
    }

    /// Returns the length of the projection of `self` onto `other`,
    /// in units of the length of `other`.
    pub fn scalar_project(&self, other: &Self) -> f64 {
        self.dot(other) / other.len_sqr()
    }

    /// Returns the vector projection of `self` onto `other`.
    pub fn vector_project(&self, other: &Self) -> Self {
        *other * self.scalar_project(other)
    }

    /// Returns the unsigned angle between `self` and `other`,
    /// in the range [0°, 180°].
    ///
    /// # Errors
    /// [`Error::ZeroLengthVector`] if either vector has length zero.
    #[cfg(feature = "fp")]
    pub fn angle(&self, other: &Self) -> Result<Angle> {
        let cos = self.normalize()?.dot(&other.normalize()?);
        Ok(acos(cos.clamp(-1.0, 1.0)))
    }

    /// Returns a vector with `f` applied to each component of `self`.
    #[inline]
    #[must_use]
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self::new(array::from_fn(|i| f(self.0[i])))
    }
}

impl<Sp> Vector<[f64; 2], Sp> {
    /// Returns the x component of `self`.
    #[inline]
    pub fn x(&self) -> f64 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub fn y(&self) -> f64 {
        self.0[1]
    }
}

impl<Sp> Vector<[f64; 3], Sp> {
    /// Returns the x component of `self`.
    #[inline]
    pub fn x(&self) -> f64 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub fn y(&self) -> f64 {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub fn z(&self) -> f64 {
        self.0[2]
    }

    /// Returns the cross product of `self` and `other`.
    ///
    /// The result is perpendicular to both inputs, oriented according to
    /// the right-hand rule, with length equal to the area of the
    /// parallelogram spanned by the inputs.
    ///
    /// # Examples
    /// ```
    /// use vantage_core::math::vec3;
    ///
    /// let x = vec3(1.0, 0.0, 0.0);
    /// let y = vec3(0.0, 1.0, 0.0);
    /// assert_eq!(x.cross(&y), vec3(0.0, 0.0, 1.0));
    /// assert_eq!(y.cross(&x), vec3(0.0, 0.0, -1.0));
    /// ```
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;
        Self::new([ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx])
    }
}

impl<Sp> Vector<[f64; 4], Sp> {
    /// Returns the x component of `self`.
    #[inline]
    pub fn x(&self) -> f64 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub fn y(&self) -> f64 {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub fn z(&self) -> f64 {
        self.0[2]
    }
    /// Returns the w component of `self`.
    #[inline]
    pub fn w(&self) -> f64 {
        self.0[3]
    }
}

impl<B> Vector<[f64; 3], Real<3, B>> {
    /// Unit vector in the direction of the positive x axis.
    pub const X: Self = Self::new([1.0, 0.0, 0.0]);
    /// Unit vector in the direction of the positive y axis.
    pub const Y: Self = Self::new([0.0, 1.0, 0.0]);
    /// Unit vector in the direction of the positive z axis.
    pub const Z: Self = Self::new([0.0, 0.0, 1.0]);
}

//
// Local trait impls
//

impl<Sp, const N: usize> ApproxEq<Self, f64> for Vector<[f64; N], Sp> {
    fn approx_eq_eps(&self, other: &Self, eps: &f64) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f64 {
        f64::relative_epsilon()
    }
}

impl<Sp, const N: usize> Lerp for Vector<[f64; N], Sp> {
    /// Linearly interpolates between `self` and `other`.
    ///
    /// Computes `self + (other - self) * t`. Values of `t` outside [0, 1]
    /// extrapolate; range checking, if needed, is up to the caller.
    fn lerp(&self, other: &Self, t: f64) -> Self {
        *self + (*other - *self) * t
    }
}

//
// Foreign trait impls
//

impl<R: Copy, Sp> Copy for Vector<R, Sp> {}

impl<R: Clone, Sp> Clone for Vector<R, Sp> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<R: PartialEq, Sp> PartialEq for Vector<R, Sp> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<Sp, const N: usize> Default for Vector<[f64; N], Sp> {
    fn default() -> Self {
        Self::new([0.0; N])
    }
}

impl<R: Debug, Sp: Debug + Default> Debug for Vector<R, Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Vec<{:?}>{:?}", Sp::default(), self.0)
    }
}

impl<Sp, const N: usize> From<[f64; N]> for Vector<[f64; N], Sp> {
    #[inline]
    fn from(els: [f64; N]) -> Self {
        Self::new(els)
    }
}

impl<Sp, const N: usize> TryFrom<&[f64]> for Vector<[f64; N], Sp> {
    type Error = Error;

    /// Converts a slice of exactly `N` elements into a vector.
    fn try_from(els: &[f64]) -> Result<Self> {
        <[f64; N]>::try_from(els).map(Self::new).map_err(|_| {
            Error::ShapeMismatch { expected: N, actual: els.len() }
        })
    }
}

impl<Sp, const N: usize> Index<usize> for Vector<[f64; N], Sp> {
    type Output = f64;
    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl<Sp, const N: usize> IndexMut<usize> for Vector<[f64; N], Sp> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[i]
    }
}

impl<Sp, const N: usize> AddAssign for Vector<[f64; N], Sp> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        for i in 0..N {
            self.0[i] += rhs.0[i];
        }
    }
}

impl<Sp, const N: usize> SubAssign for Vector<[f64; N], Sp> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        for i in 0..N {
            self.0[i] -= rhs.0[i];
        }
    }
}

impl<Sp, const N: usize> MulAssign<f64> for Vector<[f64; N], Sp> {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        for i in 0..N {
            self.0[i] *= rhs;
        }
    }
}

impl<Sp, const N: usize> DivAssign<f64> for Vector<[f64; N], Sp> {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        for i in 0..N {
            self.0[i] /= rhs;
        }
    }
}

/// Implements an operator trait in terms of an op-assign trait.
macro_rules! impl_op {
    ($trait:ident :: $method:ident, $rhs:ty, $op:tt) => {
        impl<Sp, const N: usize> $trait<$rhs> for Vector<[f64; N], Sp> {
            type Output = Self;
            #[inline]
            fn $method(mut self, rhs: $rhs) -> Self {
                self $op rhs;
                self
            }
        }
    };
}

impl_op!(Add::add, Self, +=);
impl_op!(Sub::sub, Self, -=);
impl_op!(Mul::mul, f64, *=);
impl_op!(Div::div, f64, /=);

impl<Sp, const N: usize> Neg for Vector<[f64; N], Sp> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<Sp, const N: usize> Mul<Vector<[f64; N], Sp>> for f64 {
    type Output = Vector<[f64; N], Sp>;
    #[inline]
    fn mul(self, rhs: Vector<[f64; N], Sp>) -> Self::Output {
        rhs * self
    }
}

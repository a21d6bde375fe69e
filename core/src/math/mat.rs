#![allow(clippy::needless_range_loop)]

//! Matrices and linear and affine transforms.
//!
//! Matrices are stored in column-major order: the outer array holds the
//! columns. The element at row `r`, column `c` is thus `m.0[c][r]`, and the
//! flat index of that element is `c * N + r`. Vectors are column vectors and
//! transforms are applied by multiplying from the left, so in a product
//! `a * b`, the transform `b` is applied first.

use core::array;
use core::fmt::{self, Debug, Display, Formatter, Write};
use core::marker::PhantomData;
use core::ops::Mul;

use crate::error::{Error, Result};
#[cfg(feature = "fp")]
use crate::math::angle::Angle;
use crate::math::{
    approx::ApproxEq,
    quat::Quat,
    vec::{Vec2, Vec3, Vec4, Vector, vec3},
};

/// A generic matrix type.
///
/// `Map` is a tag type describing the mapping the matrix represents, most
/// commonly [`RealToReal`].
#[repr(transparent)]
pub struct Matrix<Repr, Map>(pub Repr, PhantomData<Map>);

/// Tag type for a mapping from the space `Src` to the space `Dst`, where
/// both spaces are `DIM`-dimensional. Homogeneous 4x4 transforms of 3D
/// space have `DIM` equal to 3.
pub struct RealToReal<const DIM: usize, Src = (), Dst = Src>(
    PhantomData<(Src, Dst)>,
);

/// Type alias for a 2x2 matrix mapping `Src` to `Dst`.
pub type Mat2<Src = (), Dst = Src> =
    Matrix<[[f64; 2]; 2], RealToReal<2, Src, Dst>>;
/// Type alias for a 3x3 matrix mapping `Src` to `Dst`.
pub type Mat3<Src = (), Dst = Src> =
    Matrix<[[f64; 3]; 3], RealToReal<3, Src, Dst>>;
/// Type alias for a 4x4 homogeneous transform mapping 3D `Src` to 3D `Dst`.
pub type Mat4<Src = (), Dst = Src> =
    Matrix<[[f64; 4]; 4], RealToReal<3, Src, Dst>>;

/// Trait for applying a transform to a value.
pub trait Apply<T> {
    /// The transform codomain type.
    type Output;

    /// Applies this transform to a vector.
    fn apply(&self, t: &T) -> Self::Output;
}

//
// Inherent impls
//

impl<const N: usize, M> Matrix<[[f64; N]; N], M> {
    /// Returns a matrix with the given columns.
    #[inline]
    pub const fn from_cols(cols: [[f64; N]; N]) -> Self {
        Self(cols, PhantomData)
    }

    /// Returns a matrix with the given rows.
    ///
    /// Useful for writing matrix literals in the conventional
    /// mathematical layout.
    pub fn from_rows(rows: [[f64; N]; N]) -> Self {
        Self::from_cols(array::from_fn(|c| array::from_fn(|r| rows[r][c])))
    }

    /// Returns the identity matrix.
    pub fn identity() -> Self {
        Self::from_cols(array::from_fn(|c| {
            array::from_fn(|r| if r == c { 1.0 } else { 0.0 })
        }))
    }

    /// Returns the element at `row`, `col`.
    ///
    /// # Panics
    /// If `row` or `col` is greater than or equal to `N`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.0[col][row]
    }

    /// Returns the column at index `i`.
    #[inline]
    pub fn col(&self, i: usize) -> [f64; N] {
        self.0[i]
    }

    /// Returns the row at index `i`.
    #[inline]
    pub fn row(&self, i: usize) -> [f64; N] {
        array::from_fn(|c| self.0[c][i])
    }

    /// Returns the elements of `self` in column-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        self.0.as_flattened()
    }

    /// Returns `self` with its map tag changed to `M2`.
    #[inline]
    pub fn to<M2>(&self) -> Matrix<[[f64; N]; N], M2> {
        Matrix::from_cols(self.0)
    }
}

impl<const N: usize, const D: usize, F, T>
    Matrix<[[f64; N]; N], RealToReal<D, F, T>>
{
    /// Returns the composite transform of `self` and `other`.
    ///
    /// Computes the matrix product `self * other`. The resulting matrix
    /// first applies `other`, then `self`, mapping `G` to `T`.
    ///
    /// # Examples
    /// ```
    /// use vantage_core::math::{Apply, Mat4, scale, translate, vec3};
    ///
    /// let s = scale(vec3(2.0, 2.0, 2.0));
    /// let t = translate(vec3(1.0, 0.0, 0.0));
    ///
    /// let ts: Mat4 = t.compose(&s);
    /// assert_eq!(ts.apply(&vec3(1.0, 1.0, 1.0)), vec3(3.0, 2.0, 2.0));
    /// ```
    #[must_use]
    pub fn compose<G>(
        &self,
        other: &Matrix<[[f64; N]; N], RealToReal<D, G, F>>,
    ) -> Matrix<[[f64; N]; N], RealToReal<D, G, T>> {
        let (a, b) = (&self.0, &other.0);
        let mut cols = [[0.0; N]; N];
        for c in 0..N {
            for r in 0..N {
                let mut sum = 0.0;
                for k in 0..N {
                    sum += a[k][r] * b[c][k];
                }
                cols[c][r] = sum;
            }
        }
        Matrix::from_cols(cols)
    }

    /// Returns the composite transform of `self` and `other`.
    ///
    /// Computes the matrix product `other * self`. The resulting matrix
    /// first applies `self`, then `other`.
    #[must_use]
    pub fn then<U>(
        &self,
        other: &Matrix<[[f64; N]; N], RealToReal<D, T, U>>,
    ) -> Matrix<[[f64; N]; N], RealToReal<D, F, U>> {
        other.compose(self)
    }

    /// Returns the transpose of `self`.
    ///
    /// For a pure rotation, the transpose is also the inverse, and maps
    /// `T` back to `F`.
    #[must_use]
    pub fn transpose(&self) -> Matrix<[[f64; N]; N], RealToReal<D, T, F>> {
        Matrix::from_cols(array::from_fn(|c| array::from_fn(|r| self.0[r][c])))
    }
}

impl<const N: usize, const D: usize, B>
    Matrix<[[f64; N]; N], RealToReal<D, B>>
{
    /// Returns the product of the matrices in `ms`, in order.
    ///
    /// The fold starts from the identity, so the product of an empty
    /// sequence is the identity and `product([m])` equals `m`.
    pub fn product<I>(ms: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        ms.into_iter()
            .fold(Self::identity(), |acc, m| acc.compose(&m))
    }
}

impl<F, T> Mat2<F, T> {
    /// Returns the determinant of `self`.
    pub fn determinant(&self) -> f64 {
        let [[a, c], [b, d]] = self.0;
        a * d - b * c
    }

    /// Returns the inverse of `self`, mapping `T` back to `F`.
    ///
    /// # Errors
    /// [`Error::SingularMatrix`] if the determinant of `self` is zero.
    pub fn inverse(&self) -> Result<Mat2<T, F>> {
        let det = nonzero_det(self.determinant())?;
        let [[a, c], [b, d]] = self.0;
        Ok(Matrix::from_cols([[d / det, -c / det], [-b / det, a / det]]))
    }
}

impl<F, T> Mat3<F, T> {
    /// Returns the determinant of `self`.
    pub fn determinant(&self) -> f64 {
        (0..3).map(|c| self.at(0, c) * self.cofactor(0, c)).sum()
    }

    /// Returns the inverse of `self`, mapping `T` back to `F`.
    ///
    /// # Errors
    /// [`Error::SingularMatrix`] if the determinant of `self` is zero.
    pub fn inverse(&self) -> Result<Mat3<T, F>> {
        let det = nonzero_det(self.determinant())?;
        // The inverse is the adjugate (transposed cofactor matrix) / det
        Ok(Matrix::from_cols(array::from_fn(|c| {
            array::from_fn(|r| self.cofactor(c, r) / det)
        })))
    }

    fn cofactor(&self, row: usize, col: usize) -> f64 {
        let [r0, r1] = others3(row);
        let [c0, c1] = others3(col);
        let m = |r, c| self.at(r, c);
        let minor = m(r0, c0) * m(r1, c1) - m(r0, c1) * m(r1, c0);
        if (row + col) % 2 == 0 { minor } else { -minor }
    }
}

impl<F, T> Mat4<F, T> {
    /// Returns the determinant of `self`.
    ///
    /// Expands along the first row, reusing the six 2x2 determinants of
    /// the bottom two rows between the four 3x3 minors.
    pub fn determinant(&self) -> f64 {
        let m = |r, c| self.at(r, c);
        // 2x2 subdeterminants of rows 2 and 3
        let s = |i, j| m(2, i) * m(3, j) - m(2, j) * m(3, i);
        let (s01, s02, s03) = (s(0, 1), s(0, 2), s(0, 3));
        let (s12, s13, s23) = (s(1, 2), s(1, 3), s(2, 3));

        let c0 = m(1, 1) * s23 - m(1, 2) * s13 + m(1, 3) * s12;
        let c1 = m(1, 0) * s23 - m(1, 2) * s03 + m(1, 3) * s02;
        let c2 = m(1, 0) * s13 - m(1, 1) * s03 + m(1, 3) * s01;
        let c3 = m(1, 0) * s12 - m(1, 1) * s02 + m(1, 2) * s01;

        m(0, 0) * c0 - m(0, 1) * c1 + m(0, 2) * c2 - m(0, 3) * c3
    }

    /// Returns the inverse of `self`, mapping `T` back to `F`.
    ///
    /// Computes the adjugate of `self` divided by the determinant.
    ///
    /// # Errors
    /// [`Error::SingularMatrix`] if the determinant of `self` is zero.
    ///
    /// # Examples
    /// ```
    /// use vantage_core::{Error, math::*};
    ///
    /// let m = translate(vec3(1.0, 2.0, 3.0));
    /// let inv: Mat4 = m.inverse().unwrap();
    /// assert_eq!(inv.apply(&vec3(1.0, 2.0, 3.0)), vec3(0.0, 0.0, 0.0));
    ///
    /// let singular = scale(vec3(1.0, 0.0, 1.0));
    /// assert_eq!(singular.inverse(), Err(Error::SingularMatrix));
    /// ```
    pub fn inverse(&self) -> Result<Mat4<T, F>> {
        let det = nonzero_det(self.determinant())?;
        Ok(Matrix::from_cols(array::from_fn(|c| {
            array::from_fn(|r| self.cofactor(c, r) / det)
        })))
    }

    fn cofactor(&self, row: usize, col: usize) -> f64 {
        let [r0, r1, r2] = others4(row);
        let [c0, c1, c2] = others4(col);
        let m = |r, c| self.at(r, c);
        let minor = m(r0, c0) * (m(r1, c1) * m(r2, c2) - m(r1, c2) * m(r2, c1))
            - m(r0, c1) * (m(r1, c0) * m(r2, c2) - m(r1, c2) * m(r2, c0))
            + m(r0, c2) * (m(r1, c0) * m(r2, c1) - m(r1, c1) * m(r2, c0));
        if (row + col) % 2 == 0 { minor } else { -minor }
    }

    /// Returns the upper left 3x3 submatrix of `self`, the linear part of
    /// an affine transform.
    pub fn linear(&self) -> Mat3<F, T> {
        Matrix::from_cols(array::from_fn(|c| array::from_fn(|r| self.0[c][r])))
    }

    /// Decomposes an affine transform into translation, rotation, and
    /// scale, such that `trs(t, &r, s)` reproduces `self`.
    ///
    /// The scale factors are the lengths of the first three columns; the
    /// rotation is extracted from the columns divided by their scale.
    /// Negative (mirroring) scales cannot be recovered: the result always
    /// has positive scale factors.
    ///
    /// # Errors
    /// [`Error::ZeroLengthVector`] if any of the basis columns is zero.
    pub fn decompose(&self) -> Result<(Vec3, Quat, Vec3)> {
        let basis = |c: usize| {
            let [x, y, z, _] = self.0[c];
            vec3(x, y, z)
        };
        let [tx, ty, tz, _] = self.0[3];
        let (i, j, k) = (basis(0), basis(1), basis(2));

        let scale = vec3(i.len(), j.len(), k.len());
        let rot: Mat3 = Matrix::from_cols([
            i.normalize()?.0,
            j.normalize()?.0,
            k.normalize()?.0,
        ]);
        Ok((vec3(tx, ty, tz), Quat::from_mat3(&rot), scale))
    }
}

/// Returns the indices in 0..3 other than `i`, in increasing order.
fn others3(i: usize) -> [usize; 2] {
    match i {
        0 => [1, 2],
        1 => [0, 2],
        _ => [0, 1],
    }
}

/// Returns the indices in 0..4 other than `i`, in increasing order.
fn others4(i: usize) -> [usize; 3] {
    match i {
        0 => [1, 2, 3],
        1 => [0, 2, 3],
        2 => [0, 1, 3],
        _ => [0, 1, 2],
    }
}

fn nonzero_det(det: f64) -> Result<f64> {
    if det == 0.0 {
        log::debug!("cannot invert matrix with zero determinant");
        Err(Error::SingularMatrix)
    } else {
        Ok(det)
    }
}

//
// Free functions
//

/// Returns a matrix applying a scaling by `s`.
///
/// Tip: use [`splat`][super::splat] to scale uniformly:
/// ```
/// use vantage_core::math::{Apply, Mat4, scale, splat, vec3};
///
/// let m: Mat4 = scale(splat(2.0));
/// assert_eq!(m.apply(&vec3(1.0, -1.0, 0.5)), vec3(2.0, -2.0, 1.0));
/// ```
pub fn scale(s: Vec3) -> Mat4 {
    let [x, y, z] = s.0;
    Matrix::from_rows([
        [x, 0.0, 0.0, 0.0],
        [0.0, y, 0.0, 0.0],
        [0.0, 0.0, z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix applying a translation by `t`.
pub fn translate(t: Vec3) -> Mat4 {
    let [x, y, z] = t.0;
    Matrix::from_rows([
        [1.0, 0.0, 0.0, x],
        [0.0, 1.0, 0.0, y],
        [0.0, 0.0, 1.0, z],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix applying a rotation by `angle` about `axis`.
///
/// The rotation is counterclockwise when looking from the tip of `axis`
/// towards the origin. `axis` need not be of unit length.
///
/// # Errors
/// [`Error::DegenerateAxis`] if `axis` has length zero.
#[cfg(feature = "fp")]
pub fn rotate(axis: Vec3, angle: Angle) -> Result<Mat4> {
    let axis = axis.normalize().map_err(|_| Error::DegenerateAxis)?;
    let [x, y, z] = axis.0;
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    Ok(Matrix::from_rows([
        [t * x * x + c, t * x * y - s * z, t * x * z + s * y, 0.0],
        [t * x * y + s * z, t * y * y + c, t * y * z - s * x, 0.0],
        [t * x * z - s * y, t * y * z + s * x, t * z * z + c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]))
}

/// Returns a matrix applying a rotation by `a` about the x axis.
#[cfg(feature = "fp")]
pub fn rotate_x(a: Angle) -> Mat4 {
    let (s, c) = a.sin_cos();
    Matrix::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, -s, 0.0],
        [0.0, s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix applying a rotation by `a` about the y axis.
#[cfg(feature = "fp")]
pub fn rotate_y(a: Angle) -> Mat4 {
    let (s, c) = a.sin_cos();
    Matrix::from_rows([
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix applying a rotation by `a` about the z axis.
#[cfg(feature = "fp")]
pub fn rotate_z(a: Angle) -> Mat4 {
    let (s, c) = a.sin_cos();
    Matrix::from_rows([
        [c, -s, 0.0, 0.0],
        [s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns an affine transform that first scales by `scale`, then rotates
/// by `rotation`, then translates by `translation`.
///
/// This is the inverse of [`Mat4::decompose`] for positive scales.
pub fn trs(translation: Vec3, rotation: &Quat, scale: Vec3) -> Mat4 {
    let r = rotation.to_mat3();
    let col = |c: usize, s: f64| {
        let [x, y, z] = r.col(c);
        [x * s, y * s, z * s, 0.0]
    };
    let [sx, sy, sz] = scale.0;
    let [tx, ty, tz] = translation.0;
    Matrix::from_cols([col(0, sx), col(1, sy), col(2, sz), [tx, ty, tz, 1.0]])
}

/// Creates a perspective projection matrix.
///
/// The camera looks towards negative z in view space. Points with view
/// space z in `-far..=-near` are mapped to NDC z in `-1.0..=1.0`.
///
/// # Parameters
/// * `fov`: Vertical field of view.
/// * `aspect_ratio`: Ratio of viewport width to height.
/// * `near`: Distance to the near clipping plane. Must be positive.
/// * `far`: Distance to the far clipping plane. Must be greater than `near`.
///
/// # Errors
/// [`Error::InvalidProjectionParams`] if the clip plane distances are
/// invalid.
#[cfg(feature = "fp")]
pub fn perspective(
    fov: Angle,
    aspect_ratio: f64,
    near: f64,
    far: f64,
) -> Result<Mat4> {
    check_perspective(near, far)?;
    let f = 1.0 / (fov / 2.0).tan();
    let nf = near - far;
    Ok(Matrix::from_rows([
        [f / aspect_ratio, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) / nf, 2.0 * far * near / nf],
        [0.0, 0.0, -1.0, 0.0],
    ]))
}

/// Creates an orthographic projection matrix.
///
/// Maps the axis-aligned box with the given bounds to the NDC cube
/// `[-1, 1]³`. As with [`perspective`], `near` and `far` are distances
/// along the negative z axis.
///
/// # Errors
/// [`Error::InvalidProjectionParams`] if any of the box dimensions is zero.
pub fn orthographic(
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
    near: f64,
    far: f64,
) -> Result<Mat4> {
    check_orthographic(left, right, bottom, top, near, far)?;
    let (w, h, d) = (right - left, top - bottom, far - near);
    Ok(Matrix::from_rows([
        [2.0 / w, 0.0, 0.0, -(right + left) / w],
        [0.0, 2.0 / h, 0.0, -(top + bottom) / h],
        [0.0, 0.0, -2.0 / d, -(far + near) / d],
        [0.0, 0.0, 0.0, 1.0],
    ]))
}

/// Creates a view matrix for a camera at `eye` looking at `target`.
///
/// The resulting view space has the camera at the origin, looking towards
/// negative z, with `up` projected to the positive y axis.
///
/// # Errors
/// * [`Error::ZeroLengthVector`] if `eye` equals `target`.
/// * [`Error::DegenerateCameraOrientation`] if `up` is parallel to the
///   viewing direction.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Result<Mat4> {
    let fwd = (eye - target).normalize()?;
    let right = up.cross(&fwd).normalize().map_err(|_| {
        log::debug!("up vector {up:?} is parallel to view direction {fwd:?}");
        Error::DegenerateCameraOrientation
    })?;
    let up = fwd.cross(&right);
    Ok(Matrix::from_rows([
        [right.x(), right.y(), right.z(), -right.dot(&eye)],
        [up.x(), up.y(), up.z(), -up.dot(&eye)],
        [fwd.x(), fwd.y(), fwd.z(), -fwd.dot(&eye)],
        [0.0, 0.0, 0.0, 1.0],
    ]))
}

/// Creates a viewport transform matrix.
///
/// Maps NDC x and y coordinates in [-1, 1] to the screen rectangle with
/// the given bounds, with NDC y = 1 mapped to `top`. z and w are unchanged.
pub fn viewport(left: f64, top: f64, right: f64, bottom: f64) -> Mat4 {
    let h = (right - left) / 2.0;
    let v = (bottom - top) / 2.0;
    Matrix::from_rows([
        [h, 0.0, 0.0, h + left],
        [0.0, -v, 0.0, v + top],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub(crate) fn check_perspective(near: f64, far: f64) -> Result<()> {
    if near.is_nan() || near <= 0.0 {
        return Err(Error::InvalidProjectionParams("near must be positive"));
    }
    if far.is_nan() || far <= near {
        return Err(Error::InvalidProjectionParams(
            "far must be greater than near",
        ));
    }
    Ok(())
}

pub(crate) fn check_orthographic(
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
    near: f64,
    far: f64,
) -> Result<()> {
    if [left, right, bottom, top, near, far].iter().any(|x| x.is_nan()) {
        Err(Error::InvalidProjectionParams("bounds must not be NaN"))
    } else if left == right {
        Err(Error::InvalidProjectionParams("left equals right"))
    } else if bottom == top {
        Err(Error::InvalidProjectionParams("bottom equals top"))
    } else if near == far {
        Err(Error::InvalidProjectionParams("near equals far"))
    } else {
        Ok(())
    }
}

//
// Apply impls
//

fn mul_vec<const N: usize>(m: &[[f64; N]; N], v: &[f64; N]) -> [f64; N] {
    array::from_fn(|r| {
        let mut sum = 0.0;
        for k in 0..N {
            sum += m[k][r] * v[k];
        }
        sum
    })
}

impl<F, T> Apply<Vec2<F>> for Mat2<F, T> {
    type Output = Vec2<T>;

    fn apply(&self, v: &Vec2<F>) -> Vec2<T> {
        Vector::new(mul_vec(&self.0, &v.0))
    }
}

impl<F, T> Apply<Vec3<F>> for Mat3<F, T> {
    type Output = Vec3<T>;

    fn apply(&self, v: &Vec3<F>) -> Vec3<T> {
        Vector::new(mul_vec(&self.0, &v.0))
    }
}

impl<F, T> Apply<Vec4<F>> for Mat4<F, T> {
    type Output = Vec4<T>;

    fn apply(&self, v: &Vec4<F>) -> Vec4<T> {
        Vector::new(mul_vec(&self.0, &v.0))
    }
}

impl<F, T> Apply<Vec3<F>> for Mat4<F, T> {
    type Output = Vec3<T>;

    /// Transforms a point.
    ///
    /// Treats `v` as a point with w = 1. If the resulting w is neither 0
    /// nor 1, performs the perspective divide. Points that map to w = 0
    /// (at infinity) are returned undivided.
    fn apply(&self, v: &Vec3<F>) -> Vec3<T> {
        let [x, y, z] = v.0;
        let [x, y, z, w] = mul_vec(&self.0, &[x, y, z, 1.0]);
        if w != 0.0 && w != 1.0 {
            Vector::new([x / w, y / w, z / w])
        } else {
            Vector::new([x, y, z])
        }
    }
}

//
// Trait impls
//

impl<R: Copy, M> Copy for Matrix<R, M> {}

impl<R: Clone, M> Clone for Matrix<R, M> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<R: PartialEq, M> PartialEq for Matrix<R, M> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<const N: usize, M> Default for Matrix<[[f64; N]; N], M> {
    /// Returns the identity matrix.
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize, M> ApproxEq<Self, f64> for Matrix<[[f64; N]; N], M> {
    fn approx_eq_eps(&self, other: &Self, eps: &f64) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f64 {
        f64::relative_epsilon()
    }
}

impl<const N: usize, const D: usize, F, G, T>
    Mul<Matrix<[[f64; N]; N], RealToReal<D, G, F>>>
    for Matrix<[[f64; N]; N], RealToReal<D, F, T>>
{
    type Output = Matrix<[[f64; N]; N], RealToReal<D, G, T>>;

    /// Returns the matrix product `self * rhs`.
    ///
    /// Same as [`compose`][Self::compose].
    fn mul(
        self,
        rhs: Matrix<[[f64; N]; N], RealToReal<D, G, F>>,
    ) -> Self::Output {
        self.compose(&rhs)
    }
}

impl<F, T> From<Mat3<F, T>> for Mat4<F, T> {
    /// Embeds a linear transform into a 4x4 affine transform.
    fn from(m: Mat3<F, T>) -> Self {
        let col = |c: usize| {
            let [x, y, z] = m.0[c];
            [x, y, z, 0.0]
        };
        Matrix::from_cols([col(0), col(1), col(2), [0.0, 0.0, 0.0, 1.0]])
    }
}

impl<const N: usize, M> TryFrom<&[f64]> for Matrix<[[f64; N]; N], M> {
    type Error = Error;

    /// Creates a matrix from `N * N` elements in column-major order.
    fn try_from(els: &[f64]) -> Result<Self> {
        if els.len() != N * N {
            return Err(Error::ShapeMismatch {
                expected: N * N,
                actual: els.len(),
            });
        }
        Ok(Self::from_cols(array::from_fn(|c| {
            array::from_fn(|r| els[c * N + r])
        })))
    }
}

/// A matrix element as written by the `Debug` impl of `Matrix`.
struct Cell(f64);

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.abs() < 1e-10 {
            f.write_str("0")
        } else {
            write!(f, "{:.5}", self.0)
        }
    }
}

impl Cell {
    fn width(&self) -> usize {
        struct Count(usize);
        impl Write for Count {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                self.0 += s.chars().count();
                Ok(())
            }
        }
        let mut n = Count(0);
        // Count never fails
        let _ = write!(n, "{self}");
        n.0
    }
}

impl<const N: usize, M> Debug for Matrix<[[f64; N]; N], M> {
    /// Writes `self` one row per line, with five decimals per element and
    /// each column padded to equal width. Near-zero elements are shown as
    /// a plain `0`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let widths: [usize; N] = array::from_fn(|c| {
            self.0[c].iter().map(|&x| Cell(x).width()).max().unwrap_or(0)
        });
        writeln!(f, "Mat{N}(")?;
        for r in 0..N {
            f.write_str("    ")?;
            for c in 0..N {
                let cell = Cell(self.0[c][r]);
                if c > 0 {
                    f.write_str("  ")?;
                }
                let pad = widths[c] - cell.width();
                write!(f, "{cell}{:pad$}", "")?;
            }
            f.write_str("\n")?;
        }
        f.write_str(")")
    }
}

impl<const DIM: usize, S, D> Copy for RealToReal<DIM, S, D> {}

impl<const DIM: usize, S, D> Clone for RealToReal<DIM, S, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<const DIM: usize, S, D> Default for RealToReal<DIM, S, D> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<const DIM: usize, S: Debug + Default, D: Debug + Default> Debug
    for RealToReal<DIM, S, D>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ℝ{DIM}<{:?}> → ℝ{DIM}<{:?}>", S::default(), D::default())
    }
}

//! Cameras and camera transforms.

use crate::error::Result;
#[cfg(feature = "fp")]
use crate::math::{Angle, degs, mat::check_perspective, perspective};
use crate::math::{
    Apply, Mat4, Quat, Vec2, Vec3, Vector, look_at, mat::check_orthographic,
    orthographic,
};
use crate::util::Dims;

use super::{Ndc, Screen, View, World};

/// Camera projection mode and its parameters.
///
/// Near and far plane distances are measured from the camera along the
/// viewing direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Projection {
    /// Perspective projection with a vertical field of view `fov`.
    ///
    /// The aspect ratio is not stored but supplied when computing
    /// the projection matrix.
    #[cfg(feature = "fp")]
    Perspective { fov: Angle, near: f64, far: f64 },
    /// Orthographic projection of the given view-space box.
    ///
    /// The box bounds fully determine the projection; an aspect ratio
    /// passed to [`Projection::matrix`] is ignored.
    Orthographic {
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    },
}

/// Camera with a position, a look-at target, and a projection.
///
/// A camera is a plain data holder: the view and projection matrices are
/// derived from its current state on demand. The world up direction is
/// always the positive y axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// Position of the camera in **world** space.
    pub position: Vec3<World>,
    /// The point the camera looks at, in **world** space.
    pub target: Vec3<World>,
    projection: Projection,
}

#[cfg(feature = "fp")]
const DEFAULT_PROJECTION: Projection =
    Projection::Perspective { fov: degs(60.0), near: 0.1, far: 100.0 };

#[cfg(not(feature = "fp"))]
const DEFAULT_PROJECTION: Projection = Projection::Orthographic {
    left: -1.0,
    right: 1.0,
    bottom: -1.0,
    top: 1.0,
    near: 0.1,
    far: 100.0,
};

//
// Inherent impls
//

impl Projection {
    /// Checks that `self` describes a valid view volume.
    ///
    /// Applies the same checks as the [`perspective`] and [`orthographic`]
    /// matrix constructors.
    pub fn validate(&self) -> Result<()> {
        match *self {
            #[cfg(feature = "fp")]
            Self::Perspective { near, far, .. } => check_perspective(near, far),
            Self::Orthographic { left, right, bottom, top, near, far } => {
                check_orthographic(left, right, bottom, top, near, far)
            }
        }
    }

    /// Returns the view-to-NDC matrix of `self`.
    #[cfg_attr(not(feature = "fp"), allow(unused_variables))]
    pub fn matrix(&self, aspect_ratio: f64) -> Result<Mat4<View, Ndc>> {
        let m = match *self {
            #[cfg(feature = "fp")]
            Self::Perspective { fov, near, far } => {
                perspective(fov, aspect_ratio, near, far)?
            }
            Self::Orthographic { left, right, bottom, top, near, far } => {
                orthographic(left, right, bottom, top, near, far)?
            }
        };
        Ok(m.to())
    }
}

impl Camera {
    /// The world up direction.
    pub const UP: Vec3<World> = Vec3::Y;

    /// Creates a camera at `position`, looking at `target`.
    ///
    /// # Errors
    /// [`InvalidProjectionParams`][crate::Error::InvalidProjectionParams]
    /// if `projection` is invalid.
    pub fn new(
        position: Vec3<World>,
        target: Vec3<World>,
        projection: Projection,
    ) -> Result<Self> {
        projection.validate()?;
        Ok(Self { position, target, projection })
    }

    /// Returns the current projection.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Replaces the projection of `self`.
    ///
    /// # Errors
    /// [`InvalidProjectionParams`][crate::Error::InvalidProjectionParams]
    /// if `projection` is invalid. The current projection is then left
    /// unchanged.
    pub fn set_projection(&mut self, projection: Projection) -> Result<()> {
        projection.validate().inspect_err(|e| {
            log::debug!("rejected projection {projection:?}: {e}");
        })?;
        self.projection = projection;
        Ok(())
    }

    /// Returns the world-to-view matrix of `self`.
    ///
    /// # Errors
    /// See [`look_at`].
    pub fn view_matrix(&self) -> Result<Mat4<World, View>> {
        let m = look_at(self.position.to(), self.target.to(), Self::UP.to())?;
        Ok(m.to())
    }

    /// Returns the view-to-NDC matrix of `self`.
    ///
    /// `aspect_ratio` is only used by perspective projections.
    pub fn projection_matrix(
        &self,
        aspect_ratio: f64,
    ) -> Result<Mat4<View, Ndc>> {
        self.projection.matrix(aspect_ratio)
    }

    /// Returns the composed world-to-NDC matrix of `self`.
    pub fn world_to_ndc(&self, aspect_ratio: f64) -> Result<Mat4<World, Ndc>> {
        Ok(self
            .view_matrix()?
            .then(&self.projection_matrix(aspect_ratio)?))
    }

    /// Projects a world-space point to screen coordinates.
    ///
    /// Transforms `point` by `viewport · projection · view`, performing
    /// the perspective divide, then maps the resulting x and y from
    /// [-1, 1] to a screen of size `dims` with the origin at the top left
    /// and y increasing downwards.
    ///
    /// `viewport` is an additional NDC-space adjustment applied after
    /// projection; pass the identity matrix if none is needed.
    ///
    /// # Errors
    /// If the view or projection matrix cannot be computed.
    ///
    /// # Examples
    /// ```
    /// use vantage_core::math::{Mat4, vec3};
    /// use vantage_core::render::Camera;
    /// use vantage_core::util::Dims;
    ///
    /// let cam = Camera::default();
    /// let origin = vec3(0.0, 0.0, 0.0).to();
    /// let center = cam.project(origin, &Mat4::identity(), Dims(640, 480));
    /// assert_eq!(center.unwrap().0, [320.0, 240.0]);
    /// ```
    pub fn project(
        &self,
        point: Vec3<World>,
        viewport: &Mat4<Ndc>,
        dims: Dims,
    ) -> Result<Vec2<Screen>> {
        let proj = self.projection_matrix(dims.aspect_ratio())?;
        let view = self.view_matrix()?;
        let m = viewport.compose(&proj).compose(&view);

        let ndc = m.apply(&point);
        let (w, h) = (f64::from(dims.width()), f64::from(dims.height()));
        let screen: Vec2<Screen> = Vector::new([
            (ndc.x() + 1.0) / 2.0 * w,
            (1.0 - ndc.y()) / 2.0 * h,
        ]);
        log::trace!("projected {point:?} to {ndc:?}, screen {screen:?}");
        Ok(screen)
    }

    /// Rotates the position of `self` about the target by `rotation`.
    ///
    /// The distance to the target is preserved if `rotation` is a unit
    /// quaternion.
    pub fn orbit(&mut self, rotation: &Quat) {
        let offset = self.position - self.target;
        self.position = self.target + rotation.rotate(offset);
    }
}

impl Default for Camera {
    /// Returns a camera at (0, 0, 5) looking at the origin.
    ///
    /// With the `fp` feature, the projection is a 60° perspective with
    /// near and far planes at 0.1 and 100. Otherwise, it is an orthographic
    /// projection of the box x, y ∈ [-1, 1], z ∈ [-100, -0.1].
    fn default() -> Self {
        Self {
            position: Vector::new([0.0, 0.0, 5.0]),
            target: Vector::default(),
            projection: DEFAULT_PROJECTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::error::Error;
    use crate::math::{Matrix, scale, translate, vec3};

    use super::*;

    fn ortho() -> Projection {
        Projection::Orthographic {
            left: -2.0,
            right: 2.0,
            bottom: -2.0,
            top: 2.0,
            near: 1.0,
            far: 10.0,
        }
    }

    #[test]
    fn new_validates_projection() {
        let bad = Projection::Orthographic {
            left: 1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            near: 0.1,
            far: 10.0,
        };
        let res = Camera::new(Vector::default(), Vec3::Z, bad);
        assert_eq!(
            res,
            Err(Error::InvalidProjectionParams("left equals right"))
        );
    }

    #[test]
    fn set_projection_keeps_old_on_error() {
        let mut cam = Camera::default();
        let old = *cam.projection();
        let bad = Projection::Orthographic {
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            near: 5.0,
            far: 5.0,
        };
        assert!(cam.set_projection(bad).is_err());
        assert_eq!(cam.projection(), &old);

        cam.set_projection(ortho()).unwrap();
        assert_eq!(cam.projection(), &ortho());
    }

    #[test]
    fn view_matrix_moves_camera_to_origin() {
        let cam = Camera::default();
        let view = cam.view_matrix().unwrap();
        assert_eq!(view.apply(&cam.position), Vector::default());
        assert_eq!(
            view.apply(&cam.target),
            Vector::new([0.0, 0.0, -5.0])
        );
    }

    #[test]
    fn view_matrix_degenerate_when_looking_straight_down() {
        let cam =
            Camera::new(vec3(0.0, 5.0, 0.0).to(), Vector::default(), ortho())
                .unwrap();
        assert_eq!(cam.view_matrix(), Err(Error::DegenerateCameraOrientation));
    }

    #[test]
    fn orthographic_ignores_aspect_ratio() {
        let cam =
            Camera::new(vec3(0.0, 0.0, 5.0).to(), Vector::default(), ortho())
                .unwrap();
        assert_eq!(
            cam.projection_matrix(1.0).unwrap(),
            cam.projection_matrix(2.5).unwrap()
        );
    }

    #[test]
    fn orthographic_projection_to_screen() {
        let cam =
            Camera::new(vec3(0.0, 0.0, 5.0).to(), Vector::default(), ortho())
                .unwrap();
        let id = Matrix::identity();
        let dims = Dims(400, 200);

        let p = cam.project(vec3(0.0, 0.0, 0.0).to(), &id, dims).unwrap();
        assert_approx_eq!(p, Vector::new([200.0, 100.0]));

        // Top right corner of the view volume
        let p = cam.project(vec3(2.0, 2.0, 0.0).to(), &id, dims).unwrap();
        assert_approx_eq!(p, Vector::new([400.0, 0.0]));

        let p = cam.project(vec3(-1.0, -1.0, 0.0).to(), &id, dims).unwrap();
        assert_approx_eq!(p, Vector::new([100.0, 150.0]));
    }

    #[test]
    fn viewport_applies_after_projection() {
        let cam =
            Camera::new(vec3(0.0, 0.0, 5.0).to(), Vector::default(), ortho())
                .unwrap();
        let shift: Mat4<Ndc> = translate(vec3(0.5, 0.0, 0.0)).to();
        let dims = Dims(400, 200);

        // Projects to NDC (0.5, -0.5), then shifts right by half the NDC width
        let p = cam.project(vec3(1.0, -1.0, 0.0).to(), &shift, dims).unwrap();
        assert_approx_eq!(p, Vector::new([400.0, 150.0]));
    }

    #[test]
    fn orbit_preserves_distance() {
        let mut cam = Camera::default();
        let rot = Quat::new(1.0, 1.0, 0.0, 0.0).normalize().unwrap();
        cam.orbit(&rot);
        assert_approx_eq!(cam.position.distance(&cam.target), 5.0);
        // A quarter turn about x takes +z to -y
        assert_approx_eq!(cam.position, Vector::new([0.0, -5.0, 0.0]));
    }

    #[cfg(feature = "fp")]
    mod fp {
        use super::*;

        #[test]
        fn default_camera() {
            let cam = Camera::default();
            assert_eq!(cam.position, Vector::new([0.0, 0.0, 5.0]));
            assert_eq!(cam.target, Vector::default());
            assert_eq!(
                cam.projection(),
                &Projection::Perspective {
                    fov: degs(60.0),
                    near: 0.1,
                    far: 100.0
                }
            );
        }

        #[test]
        fn perspective_projection_uses_aspect_ratio() {
            let cam = Camera::default();
            let a = cam.projection_matrix(1.0).unwrap();
            let b = cam.projection_matrix(2.0).unwrap();
            assert_approx_eq!(a.at(0, 0), 2.0 * b.at(0, 0));
            assert_eq!(a.at(1, 1), b.at(1, 1));
        }

        #[test]
        fn perspective_validation() {
            let mut cam = Camera::default();
            let bad = Projection::Perspective {
                fov: degs(60.0),
                near: 0.0,
                far: 10.0,
            };
            assert_eq!(
                cam.set_projection(bad),
                Err(Error::InvalidProjectionParams("near must be positive"))
            );
        }

        #[test]
        fn nearer_points_project_further_from_center() {
            let cam = Camera::default();
            let id = Matrix::identity();
            let dims = Dims(100, 100);
            let near = cam.project(vec3(1.0, 0.0, 1.0).to(), &id, dims);
            let far = cam.project(vec3(1.0, 0.0, -1.0).to(), &id, dims);
            let (near, far) = (near.unwrap(), far.unwrap());
            assert!(near.x() > far.x());
            assert!(far.x() > 50.0);
            assert_approx_eq!(near.y(), 50.0);
        }

        #[test]
        fn perspective_projection_to_screen() {
            let proj = Projection::Perspective {
                fov: degs(90.0),
                near: 1.0,
                far: 10.0,
            };
            let cam =
                Camera::new(vec3(0.0, 0.0, 5.0).to(), Vector::default(), proj)
                    .unwrap();
            let dims = Dims(200, 100);
            let p: Vec3<World> = vec3(2.0, 1.0, 0.0).to();

            // Five units in front of the camera, at NDC (0.2, 0.2)
            let screen = cam.project(p, &Matrix::identity(), dims).unwrap();
            assert_approx_eq!(screen, Vector::new([120.0, 40.0]));

            // Halve NDC, then move it to the lower right quadrant
            let viewport: Mat4<Ndc> = translate(vec3(0.5, -0.5, 0.0))
                .compose(&scale(vec3(0.5, 0.5, 1.0)))
                .to();
            let screen = cam.project(p, &viewport, dims).unwrap();
            assert_approx_eq!(screen, Vector::new([160.0, 70.0]));
        }

        #[test]
        fn world_to_ndc_is_projection_after_view() {
            let cam = Camera::default();
            let m = cam.world_to_ndc(1.5).unwrap();
            let p: Vec3<World> = vec3(0.3, -0.2, 1.0).to();
            let expected = cam
                .projection_matrix(1.5)
                .unwrap()
                .apply(&cam.view_matrix().unwrap().apply(&p));
            assert_approx_eq!(m.apply(&p), expected);
        }
    }
}

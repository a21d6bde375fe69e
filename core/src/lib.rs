//! Core functionality of the `vantage` project.
//!
//! A strongly typed linear algebra library for interactive 3D graphics:
//! vectors, matrices, quaternions, and angles, plus a camera that turns
//! world-space points into screen coordinates.
//!
//! All values are plain `Copy` types. Operations return new values rather
//! than mutating their operands; compound assignment operators such as `+=`
//! are provided where they make sense. Operations that can fail on
//! degenerate input return a [`Result`].
//!
//! # Conventions
//!
//! * Matrices are stored column-major and act on column vectors.
//! * Quaternions are written scalar first: `w + xi + yj + zk`.
//! * View space is right-handed with the camera looking towards -z.
//! * NDC x, y, and z are in [-1, 1]; screen y grows downwards.
//!
//! # Crate features
//!
//! * `std`:
//!   Makes available any floating-point functions not included in `core`.
//!   In particular this means trigonometric functions. Enabled by default.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate, for `no_std` use.
//!
//! Without either, items requiring trigonometry are unavailable, and square
//! roots are computed by a fallback implementation.
//!
//! # Logging
//!
//! Rejected inputs are logged at `debug` level and camera projections at
//! `trace` level via the [log](https://crates.io/crates/log) facade. No
//! logger is installed by this crate.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod error;
pub mod math;
pub mod render;
pub mod util;

pub use error::{Error, Result};

pub mod prelude {
    #[cfg(feature = "fp")]
    pub use crate::math::{
        acos, perspective, rotate, rotate_x, rotate_y, rotate_z,
    };
    pub use crate::math::{
        Angle, ApproxEq, Apply, Lerp, Mat2, Mat3, Mat4, Matrix, Quat, Vec2,
        Vec3, Vec4, Vector, degs, lerp, look_at, orthographic, quat, rads,
        scale, splat, translate, trs, turns, vec2, vec3, vec4, viewport,
    };

    pub use crate::render::{
        Camera, Model, Ndc, Projection, Screen, View, World,
    };

    pub use crate::util::Dims;

    pub use crate::error::{Error, Result};
}

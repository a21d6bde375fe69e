//! Coordinate spaces of the viewing pipeline, and cameras.
//!
//! A point is carried from [model][Model] space through [world][World],
//! [view][View], and [normalized device][Ndc] coordinates to [screen][Screen]
//! space by a chain of matrices. The space tags below let the type system
//! check that the chain is assembled in the right order.

pub use cam::{Camera, Projection};

use crate::math::mat::RealToReal;

pub mod cam;

/// Model space coordinate basis.
#[derive(Copy, Clone, Debug, Default)]
pub struct Model;

/// World space coordinate basis.
#[derive(Copy, Clone, Debug, Default)]
pub struct World;

/// View (camera) space coordinate basis.
#[derive(Copy, Clone, Debug, Default)]
pub struct View;

/// NDC space coordinate basis (normalized device coordinates).
#[derive(Copy, Clone, Debug, Default)]
pub struct Ndc;

/// Screen space coordinate basis.
#[derive(Copy, Clone, Debug, Default)]
pub struct Screen;

/// Mapping from model space to world space.
pub type ModelToWorld = RealToReal<3, Model, World>;

/// Mapping from world space to view space.
pub type WorldToView = RealToReal<3, World, View>;

/// Mapping from view space to NDC space.
pub type ViewToNdc = RealToReal<3, View, Ndc>;

/// Mapping from NDC space to screen space.
pub type NdcToScreen = RealToReal<3, Ndc, Screen>;

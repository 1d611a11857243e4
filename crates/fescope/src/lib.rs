//! fescope: a viewer core for finite-element analysis results.
//!
//! fescope turns a time series of finite-element data - a mesh, per-step
//! point and cell fields, a displacement field - into render-ready
//! primitives: a deforming polygon soup colored by the active scalar, with
//! a color range and legend kept in sync as the user scrubs through steps
//! or switches fields.
//!
//! # Quick Start
//!
//! ```
//! use fescope::*;
//!
//! fn main() -> Result<()> {
//!     let points = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
//!     let mesh = Mesh::new(points, vec![vec![0, 1, 2]], CellType::Triangle)?;
//!
//!     let sample = FieldSample::at_time(0.0)
//!         .with_point_field("T", FieldArray::scalars(vec![0.0, 0.5, 1.0]));
//!     let series = MemorySeries::new(mesh).with_step("0", sample);
//!
//!     let mut binder = FieldBinder::new(HeadlessTarget::new());
//!     binder.open(Box::new(series))?;
//!     binder.select_field("T", Component::Index(0))?;
//!
//!     assert_eq!(binder.render().polygons.len(), 1);
//!     assert_eq!(binder.color_range(), Some((0.5, 0.5)));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Data flows one direction:
//!
//! - a [`TimeSeriesSource`] supplies the mesh and per-step data,
//! - the [`FieldBinder`] applies the displacement, selects the active
//!   field component and derives the color range and legend,
//! - the geometry decomposer (re-exported from `fescope-geometry`) turns
//!   cells into polygons via face masks or per-cell convex hulls,
//! - a [`RenderTarget`] receives primitives, values, range and legend.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod binding;
pub mod legend;
pub mod playback;
pub mod render;
pub mod source;

// Re-export core types
pub use fescope_core::{
    error::{FescopeError, Result},
    field::DISPLACEMENT_FIELD,
    CellType, Component, FaceConnectivity, FieldArray, FieldInfo, FieldLocation, FieldSample,
    Mesh, ScalarsInfo, Vec3, ViewOptions,
};

// Re-export the geometry decomposer
pub use fescope_geometry::{decompose, FieldValues, PrimitiveSet, SurfaceLayout};

pub use binding::{BindingPhase, FieldBinder};
pub use playback::Playback;
pub use render::{CameraPreset, HeadlessTarget, RenderTarget};
pub use source::{MemorySeries, TimeSeriesSource};

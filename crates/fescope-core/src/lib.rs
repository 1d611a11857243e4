//! Core abstractions for fescope.
//!
//! This crate provides the fundamental types used throughout fescope:
//! - [`Mesh`] — reference (undeformed) geometry plus a shared cell-type tag
//! - [`FieldArray`] / [`FieldSample`] — per-step point- and cell-located data
//! - [`CellType`] and the face-mask topology registry
//! - The error taxonomy and [`Result`] alias
//! - [`ViewOptions`] for display configuration

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod field;
pub mod mesh;
pub mod options;
pub mod topology;

pub use error::{FescopeError, Result};
pub use field::{Component, FieldArray, FieldInfo, FieldLocation, FieldSample, ScalarsInfo};
pub use mesh::Mesh;
pub use options::ViewOptions;
pub use topology::{CellType, FaceConnectivity};

// Re-export glam types for convenience
pub use glam::Vec3;

//! Geometry decomposition for fescope.
//!
//! Finite-element cells are topological tuples; renderers eat polygon
//! soups. This crate bridges the two:
//! - [`decompose`] — stateless (points, cells, cell type, values) →
//!   [`PrimitiveSet`]
//! - [`SurfaceLayout`] — resolved connectivity, reusable across time steps
//!   while the mesh is unchanged
//! - [`hull::convex_hull`] — deterministic per-cell boundary recovery for
//!   cells without a registered face mask

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Gathering loops index with validated u32 ids
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

pub mod decompose;
pub mod hull;

pub use decompose::{decompose, FieldValues, PrimitiveSet, SurfaceLayout};
pub use hull::convex_hull;

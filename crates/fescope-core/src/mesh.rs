//! Mesh geometry: reference points, cell connectivity, cell-type tag.

use glam::Vec3;

use crate::error::{FescopeError, Result};
use crate::topology::CellType;

/// A finite-element mesh.
///
/// Points are the undeformed reference coordinates (2-D meshes are embedded
/// at z = 0). Cells are ordered tuples of point indices; every cell in a
/// mesh shares one cell-type tag. Deformed coordinates are always derived
/// through [`Mesh::displaced`] - the reference is never mutated, so
/// displacements cannot silently compound across steps.
#[derive(Debug, Clone)]
pub struct Mesh {
    points: Vec<Vec3>,
    cells: Vec<Vec<u32>>,
    cell_type: CellType,
}

impl Mesh {
    /// Creates a mesh, validating connectivity.
    ///
    /// Every index in every cell must be below the point count, and cell
    /// types with a declared arity must match it exactly. Violations are
    /// reported as [`FescopeError::InvalidMesh`].
    pub fn new(points: Vec<Vec3>, cells: Vec<Vec<u32>>, cell_type: CellType) -> Result<Self> {
        let n_points = points.len();
        for (ci, cell) in cells.iter().enumerate() {
            if let Some(count) = cell_type.vertex_count() {
                if cell.len() != count {
                    return Err(FescopeError::InvalidMesh(format!(
                        "cell {ci} has {} vertices, {} expects {count}",
                        cell.len(),
                        cell_type.name()
                    )));
                }
            } else if cell.is_empty() {
                return Err(FescopeError::InvalidMesh(format!("cell {ci} is empty")));
            }
            for &p in cell {
                if p as usize >= n_points {
                    return Err(FescopeError::InvalidMesh(format!(
                        "cell {ci} references point {p}, mesh has {n_points} points"
                    )));
                }
            }
        }
        Ok(Self {
            points,
            cells,
            cell_type,
        })
    }

    /// Returns the number of points.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of cells.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Returns the reference (undeformed) point coordinates.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Returns the cell connectivity.
    pub fn cells(&self) -> &[Vec<u32>] {
        &self.cells
    }

    /// Returns the cell-type tag shared by all cells.
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// Returns deformed coordinates: reference points plus a per-point
    /// displacement.
    ///
    /// The reference coordinates are left untouched.
    pub fn displaced(&self, displacement: &[Vec3]) -> Result<Vec<Vec3>> {
        if displacement.len() != self.points.len() {
            return Err(FescopeError::SizeMismatch {
                expected: self.points.len(),
                actual: displacement.len(),
            });
        }
        Ok(self
            .points
            .iter()
            .zip(displacement)
            .map(|(p, du)| *p + *du)
            .collect())
    }

    /// Returns the axis-aligned bounding box, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        if self.points.is_empty() {
            return None;
        }

        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for &p in &self.points {
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }
}

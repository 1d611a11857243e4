//! Mesh-to-primitive decomposition.
//!
//! Turns (points, cells, cell type) into a flat polygon soup plus one
//! scalar per polygon. Masked cell types expand to one polygon per face
//! mask row per cell; irregular types recover their boundary with a
//! per-cell convex hull.
//!
//! Connectivity resolution is separated from coordinate/value gathering:
//! [`SurfaceLayout`] is built once per mesh and re-projected onto new
//! (deformed) coordinates every step, keeping primitive-to-value alignment
//! bit-stable while only values change.

use fescope_core::{CellType, FaceConnectivity, FescopeError, Result, Vec3};

use crate::hull::convex_hull;

/// One resolved face: its owning cell and global corner indices.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FaceRef {
    cell: u32,
    corners: Vec<u32>,
}

/// Resolved face connectivity for one mesh.
///
/// Valid for any coordinate or value set with the point and cell counts it
/// was built with; a mesh with different counts needs a rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceLayout {
    faces: Vec<FaceRef>,
    n_points: usize,
    n_cells: usize,
}

/// Scalar values to reduce onto faces.
#[derive(Debug, Clone, Copy)]
pub enum FieldValues<'a> {
    /// One scalar per mesh point; faces take the mean of their corners.
    PerPoint(&'a [f32]),
    /// One scalar per mesh cell; faces take their owning cell's value.
    PerCell(&'a [f32]),
}

/// A renderable polygon soup with one scalar per polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSet {
    /// World-coordinate polygons (2-vertex polygons are line segments).
    pub polygons: Vec<Vec<Vec3>>,
    /// One reduced scalar per polygon.
    pub values: Vec<f32>,
}

impl SurfaceLayout {
    /// Resolves the face connectivity of a mesh.
    ///
    /// Degenerate irregular cells (fewer than four affinely independent
    /// points) contribute zero faces instead of failing the build.
    pub fn build(points: &[Vec3], cells: &[Vec<u32>], cell_type: CellType) -> Result<Self> {
        let faces = match cell_type.faces() {
            FaceConnectivity::Masked(mask) => masked_faces(points.len(), cells, mask)?,
            FaceConnectivity::ConvexHull => hull_faces(points, cells)?,
        };
        Ok(Self {
            faces,
            n_points: points.len(),
            n_cells: cells.len(),
        })
    }

    /// Returns the number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if no cell produced a face.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Returns whether this layout is valid for a mesh with the given
    /// point and cell counts.
    pub fn matches(&self, n_points: usize, n_cells: usize) -> bool {
        self.n_points == n_points && self.n_cells == n_cells
    }

    /// Gathers world-coordinate polygons from a coordinate set.
    ///
    /// `coords` must have the layout's point count (validated).
    pub fn project(&self, coords: &[Vec3]) -> Result<Vec<Vec<Vec3>>> {
        if coords.len() != self.n_points {
            return Err(FescopeError::SizeMismatch {
                expected: self.n_points,
                actual: coords.len(),
            });
        }
        Ok(self
            .faces
            .iter()
            .map(|face| face.corners.iter().map(|&i| coords[i as usize]).collect())
            .collect())
    }

    /// Reduces scalar values onto faces, one scalar per face.
    pub fn reduce(&self, values: FieldValues<'_>) -> Result<Vec<f32>> {
        match values {
            FieldValues::PerPoint(v) => {
                if v.len() != self.n_points {
                    return Err(FescopeError::SizeMismatch {
                        expected: self.n_points,
                        actual: v.len(),
                    });
                }
                Ok(self
                    .faces
                    .iter()
                    .map(|face| {
                        let sum: f32 = face.corners.iter().map(|&i| v[i as usize]).sum();
                        sum / face.corners.len() as f32
                    })
                    .collect())
            }
            FieldValues::PerCell(v) => {
                if v.len() != self.n_cells {
                    return Err(FescopeError::SizeMismatch {
                        expected: self.n_cells,
                        actual: v.len(),
                    });
                }
                Ok(self.faces.iter().map(|face| v[face.cell as usize]).collect())
            }
        }
    }
}

/// Decomposes a mesh into renderable primitives with one value each.
///
/// Stateless entry point: resolves connectivity, projects coordinates and
/// reduces values in one pass. Callers that redisplay the same mesh across
/// time steps should hold a [`SurfaceLayout`] instead and re-project.
pub fn decompose(
    points: &[Vec3],
    cells: &[Vec<u32>],
    cell_type: CellType,
    values: FieldValues<'_>,
) -> Result<PrimitiveSet> {
    let layout = SurfaceLayout::build(points, cells, cell_type)?;
    let polygons = layout.project(points)?;
    let values = layout.reduce(values)?;
    Ok(PrimitiveSet { polygons, values })
}

/// One face per mask row per cell, in cell-then-row order.
fn masked_faces(
    n_points: usize,
    cells: &[Vec<u32>],
    mask: &[&[usize]],
) -> Result<Vec<FaceRef>> {
    let mut faces = Vec::with_capacity(cells.len() * mask.len());
    for (ci, cell) in cells.iter().enumerate() {
        for row in mask {
            let mut corners = Vec::with_capacity(row.len());
            for &local in *row {
                let Some(&global) = cell.get(local) else {
                    return Err(FescopeError::InvalidMesh(format!(
                        "cell {ci} has {} vertices, face mask needs local index {local}",
                        cell.len()
                    )));
                };
                if global as usize >= n_points {
                    return Err(FescopeError::InvalidMesh(format!(
                        "cell {ci} references point {global}, mesh has {n_points} points"
                    )));
                }
                corners.push(global);
            }
            faces.push(FaceRef {
                cell: ci as u32,
                corners,
            });
        }
    }
    Ok(faces)
}

/// Per-cell convex hull fallback.
///
/// Cell vertex indices are sorted (and deduplicated) before the hull runs,
/// so identical connectivity always yields identical facets regardless of
/// the tuple order the reader produced.
fn hull_faces(points: &[Vec3], cells: &[Vec<u32>]) -> Result<Vec<FaceRef>> {
    let mut faces = Vec::new();
    for (ci, cell) in cells.iter().enumerate() {
        let mut ids = cell.clone();
        ids.sort_unstable();
        ids.dedup();
        for &global in &ids {
            if global as usize >= points.len() {
                return Err(FescopeError::InvalidMesh(format!(
                    "cell {ci} references point {global}, mesh has {} points",
                    points.len()
                )));
            }
        }

        let coords: Vec<Vec3> = ids.iter().map(|&i| points[i as usize]).collect();
        match convex_hull(&coords) {
            Ok(facets) => {
                faces.extend(facets.into_iter().map(|[a, b, c]| FaceRef {
                    cell: ci as u32,
                    corners: vec![ids[a], ids[b], ids[c]],
                }));
            }
            Err(FescopeError::DegenerateCell) => {
                log::debug!("cell {ci} is degenerate, emitting no primitives");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two unit hexahedra sharing the x = 1 face.
    /// 12 points: 3 slabs of 4 corners each.
    fn hex_pair() -> (Vec<Vec3>, Vec<Vec<u32>>) {
        let mut points = Vec::new();
        for slab in 0..3 {
            let x = slab as f32;
            points.push(Vec3::new(x, 0.0, 0.0));
            points.push(Vec3::new(x, 1.0, 0.0));
            points.push(Vec3::new(x, 1.0, 1.0));
            points.push(Vec3::new(x, 0.0, 1.0));
        }
        let cells = vec![
            vec![0, 4, 5, 1, 3, 7, 6, 2],
            vec![4, 8, 9, 5, 7, 11, 10, 6],
        ];
        (points, cells)
    }

    #[test]
    fn test_single_triangle() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let cells = vec![vec![0, 1, 2]];
        let set = decompose(
            &points,
            &cells,
            CellType::Triangle,
            FieldValues::PerPoint(&[0.0, 1.0, 2.0]),
        )
        .expect("valid input");

        assert_eq!(set.polygons.len(), 1);
        assert_eq!(set.values, vec![1.0]);
        assert_eq!(set.polygons[0], points);
    }

    #[test]
    fn test_hex_pair_keeps_shared_face() {
        let (points, cells) = hex_pair();
        let values: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let set = decompose(
            &points,
            &cells,
            CellType::Hexahedron,
            FieldValues::PerPoint(&values),
        )
        .expect("valid input");

        // 6 faces per hex, interior faces included.
        assert_eq!(set.polygons.len(), 12);
        assert_eq!(set.values.len(), 12);
        assert!(set.polygons.iter().all(|p| p.len() == 4));
    }

    #[test]
    fn test_cell_values_assign_per_face() {
        let (points, cells) = hex_pair();
        let set = decompose(
            &points,
            &cells,
            CellType::Hexahedron,
            FieldValues::PerCell(&[3.0, 7.0]),
        )
        .expect("valid input");

        assert_eq!(&set.values[..6], &[3.0; 6]);
        assert_eq!(&set.values[6..], &[7.0; 6]);
    }

    #[test]
    fn test_line_cells_become_segments() {
        let points = vec![Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)];
        let cells = vec![vec![0, 1], vec![1, 2]];
        let set = decompose(
            &points,
            &cells,
            CellType::Line,
            FieldValues::PerPoint(&[0.0, 2.0, 4.0]),
        )
        .expect("valid input");

        assert_eq!(set.polygons.len(), 2);
        assert!(set.polygons.iter().all(|p| p.len() == 2));
        assert_eq!(set.values, vec![1.0, 3.0]);
    }

    #[test]
    fn test_quadratic_triangle_uses_corners_only() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
        ];
        let cells = vec![vec![0, 1, 2, 3, 4, 5]];
        let values = [0.0, 3.0, 6.0, 100.0, 100.0, 100.0];
        let set = decompose(
            &points,
            &cells,
            CellType::Triangle6,
            FieldValues::PerPoint(&values),
        )
        .expect("valid input");

        assert_eq!(set.polygons.len(), 1);
        assert_eq!(set.polygons[0].len(), 3);
        // Midside values never reach the face.
        assert_eq!(set.values, vec![3.0]);
    }

    #[test]
    fn test_irregular_tetra_via_hull() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        // Scrambled tuple order must not matter.
        let cells = vec![vec![3, 0, 2, 1]];
        let set = decompose(
            &points,
            &cells,
            CellType::Irregular,
            FieldValues::PerPoint(&[0.0, 1.0, 2.0, 3.0]),
        )
        .expect("valid input");

        assert_eq!(set.polygons.len(), 4);
        assert_eq!(set.values.len(), 4);
        assert!(set.polygons.iter().all(|p| p.len() == 3));
    }

    #[test]
    fn test_degenerate_cell_skipped() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        // First cell is coplanar; second is a proper simplex.
        let cells = vec![vec![0, 1, 2, 3], vec![0, 1, 3, 4]];
        let set = decompose(
            &points,
            &cells,
            CellType::Irregular,
            FieldValues::PerPoint(&[0.0; 5]),
        )
        .expect("degenerate cells are skipped, not fatal");

        assert_eq!(set.polygons.len(), 4);
        assert_eq!(set.values.len(), 4);
    }

    #[test]
    fn test_layout_reuse_across_coordinates() {
        let (points, cells) = hex_pair();
        let layout =
            SurfaceLayout::build(&points, &cells, CellType::Hexahedron).expect("valid input");

        let shifted: Vec<Vec3> = points.iter().map(|p| *p + Vec3::Z).collect();
        let reference = layout.project(&points).expect("matching length");
        let deformed = layout.project(&shifted).expect("matching length");

        assert_eq!(reference.len(), deformed.len());
        for (r, d) in reference.iter().zip(&deformed) {
            for (rv, dv) in r.iter().zip(d) {
                assert_eq!(*rv + Vec3::Z, *dv);
            }
        }
    }

    #[test]
    fn test_layout_matches_counts() {
        let (points, cells) = hex_pair();
        let layout =
            SurfaceLayout::build(&points, &cells, CellType::Hexahedron).expect("valid input");
        assert!(layout.matches(12, 2));
        assert!(!layout.matches(12, 3));
        assert!(!layout.matches(8, 2));
    }

    #[test]
    fn test_mask_needs_more_vertices_than_cell_has() {
        let points = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let cells = vec![vec![0, 1, 2]];
        let err = SurfaceLayout::build(&points, &cells, CellType::Quad).unwrap_err();
        assert!(matches!(err, FescopeError::InvalidMesh(_)));
    }

    #[test]
    fn test_value_length_mismatch() {
        let points = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let cells = vec![vec![0, 1, 2]];
        let layout =
            SurfaceLayout::build(&points, &cells, CellType::Triangle).expect("valid input");
        assert!(matches!(
            layout.reduce(FieldValues::PerPoint(&[0.0, 1.0])),
            Err(FescopeError::SizeMismatch { .. })
        ));
        assert!(matches!(
            layout.reduce(FieldValues::PerCell(&[0.0, 1.0])),
            Err(FescopeError::SizeMismatch { .. })
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_points(n: usize) -> impl Strategy<Value = Vec<Vec3>> {
            prop::collection::vec(
                (-10.0f32..10.0, -10.0f32..10.0, -10.0f32..10.0)
                    .prop_map(|(x, y, z)| Vec3::new(x, y, z)),
                n..n + 1,
            )
        }

        proptest! {
            /// Primitive count always equals value count, on both paths.
            #[test]
            fn prop_counts_align(points in arb_points(9), per_point in prop::collection::vec(-1.0f32..1.0, 9)) {
                let cells = vec![vec![0u32, 1, 2, 3], vec![4, 5, 6, 7]];
                for cell_type in [CellType::Tetra, CellType::Irregular] {
                    let set = decompose(&points, &cells, cell_type, FieldValues::PerPoint(&per_point))
                        .expect("degeneracy is skipped, never fatal");
                    prop_assert_eq!(set.polygons.len(), set.values.len());
                }
            }

            /// Rebuilding a hull layout from identical input is structurally identical.
            #[test]
            fn prop_hull_layout_deterministic(points in arb_points(8)) {
                let cells = vec![vec![0u32, 1, 2, 3, 4, 5, 6, 7]];
                let first = SurfaceLayout::build(&points, &cells, CellType::Irregular)
                    .expect("degeneracy is skipped, never fatal");
                let second = SurfaceLayout::build(&points, &cells, CellType::Irregular)
                    .expect("degeneracy is skipped, never fatal");
                prop_assert_eq!(first, second);
            }
        }
    }
}

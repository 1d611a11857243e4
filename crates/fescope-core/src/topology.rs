//! Cell-topology registry: face masks per cell type.
//!
//! Finite elements are topological cells described by ordered vertex-index
//! tuples; the renderer consumes flat polygon soups. Each registered cell
//! type maps to a fixed face mask enumerating which local vertex indices
//! form each visible face. Cell types without a registered mask fall back
//! to a per-cell convex-hull triangulation.
//!
//! All masks wind their faces outward with respect to the reference cell
//! documented next to each table, so back-face culling and shading in the
//! render collaborator are correct.
//!
//! Adding a cell type is a data addition: one [`CellType`] tag, one row in
//! the registry table.

/// Tag for the cell types the registry knows about.
///
/// The name vocabulary follows the mesh readers this library is fed from:
/// `_sk` variants carry the scikit-fem vertex ordering, numeric suffixes
/// are second-order elements (displayed by their corner vertices only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    /// Two-point line element.
    Line,
    /// Linear triangle.
    Triangle,
    /// Quadratic triangle (6 nodes, corners 0-2).
    Triangle6,
    /// Bilinear quadrilateral.
    Quad,
    /// Biquadratic quadrilateral (9 nodes, corners 0-3).
    Quad9,
    /// Linear tetrahedron, VTK corner order.
    Tetra,
    /// Linear tetrahedron, scikit-fem ordering (opposite face winding).
    TetraSk,
    /// Quadratic tetrahedron (10 nodes, corners 0-3).
    Tetra10,
    /// Trilinear hexahedron, VTK corner order.
    Hexahedron,
    /// Trilinear hexahedron, scikit-fem vertex ordering.
    HexahedronSk,
    /// Triquadratic hexahedron (27 nodes, corners 0-7 in VTK order).
    Hexahedron27,
    /// Linear wedge (triangular prism).
    Wedge,
    /// Connectivity with no registered face pattern; rendered per cell via
    /// convex hull.
    Irregular,
}

/// How a cell type decomposes into renderable faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceConnectivity {
    /// Fixed face mask: one polygon per row, entries are local vertex
    /// indices. A two-entry row is a line segment.
    Masked(&'static [&'static [usize]]),
    /// No fixed pattern; compute a convex hull per cell.
    ConvexHull,
}

const LINE_FACES: &[&[usize]] = &[&[0, 1]];

const TRIANGLE_FACES: &[&[usize]] = &[&[0, 1, 2]];

const QUAD_FACES: &[&[usize]] = &[&[0, 1, 2, 3]];

/// VTK tetra: 0..3 with the base (0,1,2) counterclockwise seen from
/// outside, apex 3 above.
const TETRA_FACES: &[&[usize]] = &[&[0, 2, 1], &[0, 1, 3], &[0, 3, 2], &[1, 2, 3]];

/// scikit-fem tetra: same corner coordinates, mirrored face winding.
const TETRA_SK_FACES: &[&[usize]] = &[&[0, 1, 2], &[0, 3, 1], &[0, 2, 3], &[1, 3, 2]];

/// VTK hexahedron: 0-3 the bottom quad counterclockwise from above,
/// 4-7 the top quad stacked over them.
const HEXAHEDRON_FACES: &[&[usize]] = &[
    &[2, 1, 0, 3], // bottom
    &[4, 0, 1, 5], // front
    &[5, 1, 2, 6], // right
    &[7, 3, 0, 4], // left
    &[6, 2, 3, 7], // back
    &[7, 4, 5, 6], // top
];

/// scikit-fem hexahedron: 0 at the origin, 1/2/3 its x/y/z neighbours,
/// 4 = xy, 5 = xz, 6 = yz, 7 = xyz.
const HEXAHEDRON_SK_FACES: &[&[usize]] = &[
    &[0, 2, 4, 1], // z = 0
    &[0, 1, 5, 3], // y = 0
    &[0, 3, 6, 2], // x = 0
    &[1, 4, 7, 5], // x = 1
    &[2, 6, 7, 4], // y = 1
    &[3, 5, 7, 6], // z = 1
];

/// VTK wedge: bottom triangle 0-2, top triangle 3-5.
const WEDGE_FACES: &[&[usize]] = &[
    &[0, 2, 1],
    &[3, 4, 5],
    &[0, 1, 4, 3],
    &[1, 2, 5, 4],
    &[2, 0, 3, 5],
];

/// One registry row per cell type.
struct TopologyEntry {
    cell: CellType,
    name: &'static str,
    vertex_count: Option<usize>,
    faces: FaceConnectivity,
}

/// The registry itself. Adding a cell type means adding a row here (and
/// its tag above); nothing else changes.
const REGISTRY: &[TopologyEntry] = &[
    TopologyEntry {
        cell: CellType::Line,
        name: "line",
        vertex_count: Some(2),
        faces: FaceConnectivity::Masked(LINE_FACES),
    },
    TopologyEntry {
        cell: CellType::Triangle,
        name: "triangle",
        vertex_count: Some(3),
        faces: FaceConnectivity::Masked(TRIANGLE_FACES),
    },
    TopologyEntry {
        cell: CellType::Triangle6,
        name: "triangle6",
        vertex_count: Some(6),
        faces: FaceConnectivity::Masked(TRIANGLE_FACES),
    },
    TopologyEntry {
        cell: CellType::Quad,
        name: "quad",
        vertex_count: Some(4),
        faces: FaceConnectivity::Masked(QUAD_FACES),
    },
    TopologyEntry {
        cell: CellType::Quad9,
        name: "quad9",
        vertex_count: Some(9),
        faces: FaceConnectivity::Masked(QUAD_FACES),
    },
    TopologyEntry {
        cell: CellType::Tetra,
        name: "tetra",
        vertex_count: Some(4),
        faces: FaceConnectivity::Masked(TETRA_FACES),
    },
    TopologyEntry {
        cell: CellType::TetraSk,
        name: "tetra_sk",
        vertex_count: Some(4),
        faces: FaceConnectivity::Masked(TETRA_SK_FACES),
    },
    TopologyEntry {
        cell: CellType::Tetra10,
        name: "tetra10",
        vertex_count: Some(10),
        faces: FaceConnectivity::Masked(TETRA_FACES),
    },
    TopologyEntry {
        cell: CellType::Hexahedron,
        name: "hexahedron",
        vertex_count: Some(8),
        faces: FaceConnectivity::Masked(HEXAHEDRON_FACES),
    },
    TopologyEntry {
        cell: CellType::HexahedronSk,
        name: "hexahedron_sk",
        vertex_count: Some(8),
        faces: FaceConnectivity::Masked(HEXAHEDRON_SK_FACES),
    },
    TopologyEntry {
        cell: CellType::Hexahedron27,
        name: "hexahedron27",
        vertex_count: Some(27),
        faces: FaceConnectivity::Masked(HEXAHEDRON_FACES),
    },
    TopologyEntry {
        cell: CellType::Wedge,
        name: "wedge",
        vertex_count: Some(6),
        faces: FaceConnectivity::Masked(WEDGE_FACES),
    },
    TopologyEntry {
        cell: CellType::Irregular,
        name: "irregular",
        vertex_count: None,
        faces: FaceConnectivity::ConvexHull,
    },
];

impl CellType {
    /// Resolves a cell-type name to its tag.
    ///
    /// Unknown or unregistered higher-order names map to
    /// [`CellType::Irregular`], whose faces are recovered per cell by
    /// convex hull.
    pub fn from_name(name: &str) -> Self {
        match REGISTRY.iter().find(|e| e.name == name) {
            Some(entry) => entry.cell,
            None => {
                log::debug!("cell type '{name}' has no registered face mask, using convex hull");
                CellType::Irregular
            }
        }
    }

    /// Returns the registered name of this cell type.
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Returns the face connectivity for this cell type.
    pub fn faces(self) -> FaceConnectivity {
        self.entry().faces
    }

    /// Returns the declared vertex count, or `None` for irregular cells
    /// (which may have any arity).
    pub fn vertex_count(self) -> Option<usize> {
        self.entry().vertex_count
    }

    /// Returns every registered cell type.
    pub fn all() -> impl Iterator<Item = CellType> {
        REGISTRY.iter().map(|e| e.cell)
    }

    fn entry(self) -> &'static TopologyEntry {
        REGISTRY
            .iter()
            .find(|e| e.cell == self)
            .unwrap_or(&REGISTRY[REGISTRY.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every mask's maximum local index stays below the declared vertex count.
    #[test]
    fn test_masks_fit_vertex_counts() {
        for cell in CellType::all() {
            if let FaceConnectivity::Masked(mask) = cell.faces() {
                let count = cell
                    .vertex_count()
                    .expect("masked cell types declare a vertex count");
                for face in mask {
                    for &local in *face {
                        assert!(
                            local < count,
                            "{}: local index {local} >= vertex count {count}",
                            cell.name()
                        );
                    }
                }
            }
        }
    }

    /// Faces are segments or proper polygons, never empty or single-vertex.
    #[test]
    fn test_masks_have_renderable_faces() {
        for cell in CellType::all() {
            if let FaceConnectivity::Masked(mask) = cell.faces() {
                assert!(!mask.is_empty(), "{} has an empty mask", cell.name());
                for face in mask {
                    assert!(face.len() >= 2, "{} has a degenerate face row", cell.name());
                }
            }
        }
    }

    #[test]
    fn test_name_round_trip() {
        for cell in CellType::all() {
            assert_eq!(CellType::from_name(cell.name()), cell);
        }
    }

    #[test]
    fn test_unknown_names_fall_back_to_hull() {
        let cell = CellType::from_name("polyhedron42");
        assert_eq!(cell, CellType::Irregular);
        assert_eq!(cell.faces(), FaceConnectivity::ConvexHull);
        assert_eq!(cell.vertex_count(), None);
    }

    /// Second-order types display with the corner mask of their linear kin.
    #[test]
    fn test_second_order_uses_corner_faces() {
        assert_eq!(CellType::Triangle6.faces(), CellType::Triangle.faces());
        assert_eq!(CellType::Tetra10.faces(), CellType::Tetra.faces());
        assert_eq!(CellType::Hexahedron27.faces(), CellType::Hexahedron.faces());
    }

    /// Hex masks cover all six sides: every corner appears on exactly
    /// three faces.
    #[test]
    fn test_hex_masks_cover_all_corners() {
        for cell in [CellType::Hexahedron, CellType::HexahedronSk] {
            let FaceConnectivity::Masked(mask) = cell.faces() else {
                panic!("hexahedra are masked");
            };
            assert_eq!(mask.len(), 6);
            let mut seen = [0usize; 8];
            for face in mask {
                assert_eq!(face.len(), 4);
                for &local in *face {
                    seen[local] += 1;
                }
            }
            assert_eq!(seen, [3; 8], "{}", cell.name());
        }
    }

    /// Tetra masks: every corner appears on exactly three of the four faces.
    #[test]
    fn test_tetra_masks_cover_all_corners() {
        for cell in [CellType::Tetra, CellType::TetraSk] {
            let FaceConnectivity::Masked(mask) = cell.faces() else {
                panic!("tetrahedra are masked");
            };
            assert_eq!(mask.len(), 4);
            let mut seen = [0usize; 4];
            for face in mask {
                for &local in *face {
                    seen[local] += 1;
                }
            }
            assert_eq!(seen, [3; 4], "{}", cell.name());
        }
    }
}

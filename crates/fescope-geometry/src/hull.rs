//! Convex hull of a small point set.
//!
//! Used to recover a renderable boundary for cells without a registered
//! face mask. Cells are tiny (tens of vertices at most), so an incremental
//! construction with an epsilon tolerance is plenty; what matters here is
//! determinism - identical input must produce identical facets, because
//! the binding pipeline aligns per-facet values with facets by position.

use fescope_core::{FescopeError, Result};
use glam::Vec3;

/// Relative tolerance for visibility and independence tests.
const EPS_SCALE: f32 = 1e-5;

/// Computes the convex hull of `points`, returning triangular facets as
/// index triples with outward winding.
///
/// The facet list is canonicalized (each triangle rotated so its smallest
/// index leads, facets sorted lexicographically), so equal inputs yield
/// structurally equal output.
///
/// Fails with [`FescopeError::DegenerateCell`] when the points have fewer
/// than four affinely independent members (coincident, collinear or
/// coplanar input).
pub fn convex_hull(points: &[Vec3]) -> Result<Vec<[usize; 3]>> {
    if points.len() < 4 {
        return Err(FescopeError::DegenerateCell);
    }

    let eps = tolerance(points);
    let (i0, i1, i2, i3) = initial_simplex(points, eps)?;

    // Seed faces of the simplex, each wound away from its centroid.
    let centroid = (points[i0] + points[i1] + points[i2] + points[i3]) / 4.0;
    let mut faces: Vec<[usize; 3]> = [[i0, i1, i2], [i0, i1, i3], [i0, i2, i3], [i1, i2, i3]]
        .into_iter()
        .map(|face| orient_outward(points, face, centroid))
        .collect();

    for p in 0..points.len() {
        if p == i0 || p == i1 || p == i2 || p == i3 {
            continue;
        }

        let visible: Vec<bool> = faces
            .iter()
            .map(|&face| signed_distance(points, face, points[p]) > eps)
            .collect();
        if !visible.contains(&true) {
            continue;
        }

        // Horizon: directed edges of visible faces whose reverse edge is
        // not itself part of a visible face.
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for (face, _) in faces.iter().zip(&visible).filter(|(_, &v)| v) {
            edges.push((face[0], face[1]));
            edges.push((face[1], face[2]));
            edges.push((face[2], face[0]));
        }
        let horizon: Vec<(usize, usize)> = edges
            .iter()
            .copied()
            .filter(|&(a, b)| !edges.contains(&(b, a)))
            .collect();

        let mut kept = visible.iter();
        faces.retain(|_| !*kept.next().unwrap_or(&false));
        faces.extend(horizon.into_iter().map(|(a, b)| [a, b, p]));
    }

    Ok(canonicalize(faces))
}

/// Scale-relative epsilon from the input's extent.
fn tolerance(points: &[Vec3]) -> f32 {
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for &p in points {
        min = min.min(p);
        max = max.max(p);
    }
    EPS_SCALE * (max - min).length().max(f32::EPSILON)
}

/// Picks four affinely independent seed points, deterministically.
fn initial_simplex(points: &[Vec3], eps: f32) -> Result<(usize, usize, usize, usize)> {
    // Lexicographically smallest point anchors the search.
    let mut i0 = 0;
    for (i, p) in points.iter().enumerate() {
        let q = points[i0];
        if (p.x, p.y, p.z) < (q.x, q.y, q.z) {
            i0 = i;
        }
    }

    let i1 = argmax(points, |p| p.distance(points[i0]));
    if points[i1].distance(points[i0]) <= eps {
        return Err(FescopeError::DegenerateCell);
    }

    let axis = points[i1] - points[i0];
    let i2 = argmax(points, |p| axis.cross(p - points[i0]).length());
    let normal = axis.cross(points[i2] - points[i0]);
    if normal.length() <= eps * axis.length() {
        return Err(FescopeError::DegenerateCell);
    }

    let unit = normal.normalize();
    let i3 = argmax(points, |p| unit.dot(p - points[i0]).abs());
    if unit.dot(points[i3] - points[i0]).abs() <= eps {
        return Err(FescopeError::DegenerateCell);
    }

    Ok((i0, i1, i2, i3))
}

/// Index of the point maximizing `key`; ties resolve to the lowest index.
fn argmax(points: &[Vec3], key: impl Fn(Vec3) -> f32) -> usize {
    let mut best = 0;
    let mut best_key = key(points[0]);
    for (i, &p) in points.iter().enumerate().skip(1) {
        let k = key(p);
        if k > best_key {
            best = i;
            best_key = k;
        }
    }
    best
}

/// Signed distance of `p` from the face's plane, positive outside.
fn signed_distance(points: &[Vec3], face: [usize; 3], p: Vec3) -> f32 {
    let a = points[face[0]];
    let normal = (points[face[1]] - a).cross(points[face[2]] - a);
    normal.normalize_or_zero().dot(p - a)
}

/// Flips the face if its normal points toward `interior`.
fn orient_outward(points: &[Vec3], face: [usize; 3], interior: Vec3) -> [usize; 3] {
    if signed_distance(points, face, interior) > 0.0 {
        [face[0], face[2], face[1]]
    } else {
        face
    }
}

/// Rotation-normalizes each facet (smallest index first, winding kept) and
/// sorts the facet list.
fn canonicalize(mut faces: Vec<[usize; 3]>) -> Vec<[usize; 3]> {
    for face in &mut faces {
        let lead = (0..3).min_by_key(|&i| face[i]).unwrap_or(0);
        *face = [face[lead], face[(lead + 1) % 3], face[(lead + 2) % 3]];
    }
    faces.sort_unstable();
    faces
}

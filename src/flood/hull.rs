//! 3D convex hull metrics for solidity and convexity.
//!
//! Incremental hull over voxel-center point sets. Only the volume and
//! surface area of the hull are exposed; the face list is an internal
//! intermediate. Degenerate (coplanar or thinner) point sets yield `None`
//! and are handled upstream by the flat-axis extrusion rule.

use nalgebra::Vector3;

/// Volume and surface area of a convex hull.
#[derive(Clone, Copy, Debug)]
pub struct HullMetrics {
    pub volume: f64,
    pub area: f64,
}

/// Computes hull volume and surface area of a 3D point set, or `None` when
/// the set has fewer than four non-coplanar points.
pub fn convex_hull_metrics(points: &[[f64; 3]]) -> Option<HullMetrics> {
    let mut pts: Vec<Vector3<f64>> = points
        .iter()
        .map(|p| Vector3::new(p[0], p[1], p[2]))
        .collect();
    pts.sort_by(|a, b| {
        (a.x, a.y, a.z)
            .partial_cmp(&(b.x, b.y, b.z))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pts.dedup_by(|a, b| a == b);
    if pts.len() < 4 {
        return None;
    }

    let scale = pts
        .iter()
        .map(|p| p.amax())
        .fold(1.0f64, |acc, v| acc.max(v));
    let eps = 1e-9 * scale;

    let mut faces = initial_tetrahedron(&pts, eps)?;

    for (idx, p) in pts.iter().enumerate() {
        let visible: Vec<usize> = faces
            .iter()
            .enumerate()
            .filter(|(_, f)| signed_distance(&pts, f, p) > eps)
            .map(|(i, _)| i)
            .collect();
        if visible.is_empty() {
            continue;
        }

        // Horizon: directed edges of visible faces whose reverse edge does
        // not belong to another visible face.
        let mut horizon: Vec<(usize, usize)> = Vec::new();
        for &fi in &visible {
            let [a, b, c] = faces[fi];
            for (u, v) in [(a, b), (b, c), (c, a)] {
                let shared = visible
                    .iter()
                    .any(|&fj| fj != fi && has_directed_edge(&faces[fj], v, u));
                if !shared {
                    horizon.push((u, v));
                }
            }
        }

        let mut keep: Vec<[usize; 3]> = faces
            .iter()
            .enumerate()
            .filter(|(i, _)| !visible.contains(i))
            .map(|(_, f)| *f)
            .collect();
        for (u, v) in horizon {
            keep.push([u, v, idx]);
        }
        faces = keep;
    }

    let mut volume = 0.0f64;
    let mut area = 0.0f64;
    for f in &faces {
        let (a, b, c) = (pts[f[0]], pts[f[1]], pts[f[2]]);
        volume += a.dot(&(b.cross(&c))) / 6.0;
        area += (b - a).cross(&(c - a)).norm() * 0.5;
    }
    Some(HullMetrics {
        volume: volume.abs(),
        area,
    })
}

fn has_directed_edge(face: &[usize; 3], u: usize, v: usize) -> bool {
    let [a, b, c] = *face;
    (a, b) == (u, v) || (b, c) == (u, v) || (c, a) == (u, v)
}

fn signed_distance(pts: &[Vector3<f64>], face: &[usize; 3], p: &Vector3<f64>) -> f64 {
    let (a, b, c) = (pts[face[0]], pts[face[1]], pts[face[2]]);
    let normal = (b - a).cross(&(c - a));
    let norm = normal.norm();
    if norm <= f64::EPSILON {
        return 0.0;
    }
    normal.dot(&(p - a)) / norm
}

/// Builds a non-degenerate starting tetrahedron with outward-facing
/// orientation, or `None` when all points are (near) coplanar.
fn initial_tetrahedron(pts: &[Vector3<f64>], eps: f64) -> Option<Vec<[usize; 3]>> {
    let i0 = 0usize;
    let i1 = (1..pts.len()).max_by(|&a, &b| {
        let da = (pts[a] - pts[i0]).norm_squared();
        let db = (pts[b] - pts[i0]).norm_squared();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    })?;
    if (pts[i1] - pts[i0]).norm() <= eps {
        return None;
    }

    let dir = pts[i1] - pts[i0];
    let i2 = (0..pts.len())
        .filter(|&i| i != i0 && i != i1)
        .max_by(|&a, &b| {
            let da = dir.cross(&(pts[a] - pts[i0])).norm_squared();
            let db = dir.cross(&(pts[b] - pts[i0])).norm_squared();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })?;
    if dir.cross(&(pts[i2] - pts[i0])).norm() <= eps * dir.norm() {
        return None;
    }

    let base = [i0, i1, i2];
    let i3 = (0..pts.len())
        .filter(|&i| !base.contains(&i))
        .max_by(|&a, &b| {
            let da = signed_distance(pts, &base, &pts[a]).abs();
            let db = signed_distance(pts, &base, &pts[b]).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })?;
    if signed_distance(pts, &base, &pts[i3]).abs() <= eps {
        return None;
    }

    let mut faces = vec![
        [i0, i1, i2],
        [i0, i2, i3],
        [i0, i3, i1],
        [i1, i3, i2],
    ];
    let centroid = (pts[i0] + pts[i1] + pts[i2] + pts[i3]) / 4.0;
    for f in &mut faces {
        if signed_distance(pts, f, &centroid) > 0.0 {
            f.swap(1, 2);
        }
    }
    Some(faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn unit_cube_metrics() {
        let mut pts = Vec::new();
        for z in 0..2 {
            for y in 0..2 {
                for x in 0..2 {
                    pts.push([x as f64, y as f64, z as f64]);
                }
            }
        }
        let hull = convex_hull_metrics(&pts).expect("cube hull");
        assert!(approx(hull.volume, 1.0, 1e-9), "volume={}", hull.volume);
        assert!(approx(hull.area, 6.0, 1e-9), "area={}", hull.area);
    }

    #[test]
    fn interior_points_do_not_change_the_hull() {
        let mut pts = Vec::new();
        for z in 0..5 {
            for y in 0..5 {
                for x in 0..5 {
                    pts.push([x as f64, y as f64, z as f64]);
                }
            }
        }
        let hull = convex_hull_metrics(&pts).expect("cube hull");
        assert!(approx(hull.volume, 64.0, 1e-6), "volume={}", hull.volume);
        assert!(approx(hull.area, 96.0, 1e-6), "area={}", hull.area);
    }

    #[test]
    fn tetrahedron_volume() {
        let pts = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        let hull = convex_hull_metrics(&pts).expect("tetra hull");
        assert!(approx(hull.volume, 1.0 / 6.0, 1e-9), "volume={}", hull.volume);
    }

    #[test]
    fn coplanar_points_are_degenerate() {
        let pts = [
            [0.0, 0.0, 0.0],
            [4.0, 0.0, 0.0],
            [4.0, 3.0, 0.0],
            [0.0, 3.0, 0.0],
            [2.0, 1.0, 0.0],
        ];
        assert!(convex_hull_metrics(&pts).is_none());
    }

    #[test]
    fn fewer_than_four_points_are_degenerate() {
        assert!(convex_hull_metrics(&[[0.0, 0.0, 0.0]]).is_none());
        let pts = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert!(convex_hull_metrics(&pts).is_none());
    }
}

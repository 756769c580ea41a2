use std::collections::HashSet;

use nalgebra::{Matrix3, SymmetricEigen};
use serde::Serialize;

use super::hull::convex_hull_metrics;
use crate::types::{BoundingBox, Coord3};
use crate::volume::{VolumeRef, VoxelValue};

/// Intensity statistics of an object sampled from a companion volume.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntensityStats {
    pub mean: f64,
    pub sd: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

/// Measurement record of one connected object.
///
/// Produced per flood invocation and immediately consumed; the voxels
/// themselves live only in the buffer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Object3d {
    /// Lexicographically smallest member in `(z, y, x)` order. Canonical,
    /// traversal-independent identity of the object.
    pub first_voxel: Coord3,
    pub bounding_box: BoundingBox,
    pub centroid: [f64; 3],
    /// Voxel count.
    pub volume_voxels: usize,
    /// Number of voxels with at least one exposed face.
    pub surface_voxels: usize,
    /// Number of exposed voxel faces, the discrete surface area.
    pub surface_area: usize,
    pub compactness: f64,
    pub sphericity: f64,
    pub elongation: f64,
    pub flatness: f64,
    /// Object volume over the volume of the moment-fitted ellipsoid.
    pub ellipsoid_ratio: f64,
    /// Normalized second-order moment invariants (J1, J2, J3).
    pub moment_invariants: [f64; 3],
    /// Object volume over convex hull volume.
    pub solidity: f64,
    /// Convex hull area over discrete surface area.
    pub convexity: f64,
    pub intensity: Option<IntensityStats>,
}

/// Measures a voxel list into an [`Object3d`] record.
///
/// Returns `None` for an empty list. Every divide is guarded: measures
/// whose denominator degenerates fall back to 1.0 instead of producing
/// infinities.
pub fn measure_voxels<T: VoxelValue>(
    voxels: &[Coord3],
    intensity: Option<&VolumeRef<'_, T>>,
) -> Option<Object3d> {
    if voxels.is_empty() {
        return None;
    }
    let count = voxels.len();
    let count_f = count as f64;

    let first_voxel = *voxels
        .iter()
        .min_by_key(|c| c.zyx_key())
        .expect("non-empty voxel list");
    let mut bounding_box = BoundingBox::at(voxels[0]);
    let mut sum = [0.0f64; 3];
    for &c in voxels {
        bounding_box.include(c);
        sum[0] += f64::from(c.x);
        sum[1] += f64::from(c.y);
        sum[2] += f64::from(c.z);
    }
    let centroid = [sum[0] / count_f, sum[1] / count_f, sum[2] / count_f];

    let members: HashSet<Coord3> = voxels.iter().copied().collect();
    let mut surface_voxels = 0usize;
    let mut surface_area = 0usize;
    let mut surface: Vec<Coord3> = Vec::new();
    for &c in voxels {
        let exposed = FACE_OFFSETS
            .iter()
            .filter(|&&(dx, dy, dz)| !members.contains(&c.offset(dx, dy, dz)))
            .count();
        if exposed > 0 {
            surface_voxels += 1;
            surface_area += exposed;
            surface.push(c);
        }
    }

    let shape = shape_from_moments(voxels, centroid, count_f);
    let (compactness, sphericity) = compactness_measures(count_f, surface_area);
    let (solidity, convexity) =
        hull_measures(&surface, &bounding_box, count_f, surface_area);

    Some(Object3d {
        first_voxel,
        bounding_box,
        centroid,
        volume_voxels: count,
        surface_voxels,
        surface_area,
        compactness,
        sphericity,
        elongation: shape.elongation,
        flatness: shape.flatness,
        ellipsoid_ratio: shape.ellipsoid_ratio,
        moment_invariants: shape.invariants,
        solidity,
        convexity,
        intensity: intensity.and_then(|vol| intensity_stats(voxels, vol)),
    })
}

const FACE_OFFSETS: [(i32, i32, i32); 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

struct ShapeMoments {
    elongation: f64,
    flatness: f64,
    ellipsoid_ratio: f64,
    invariants: [f64; 3],
}

/// Second-order central moments: eigen elongation/flatness, moment-fitted
/// ellipsoid volume ratio and the normalized invariants J1..J3.
fn shape_from_moments(voxels: &[Coord3], centroid: [f64; 3], count_f: f64) -> ShapeMoments {
    let mut m = [[0.0f64; 3]; 3];
    for &c in voxels {
        let d = [
            f64::from(c.x) - centroid[0],
            f64::from(c.y) - centroid[1],
            f64::from(c.z) - centroid[2],
        ];
        for i in 0..3 {
            for j in i..3 {
                m[i][j] += d[i] * d[j];
            }
        }
    }
    let cov = Matrix3::new(
        m[0][0] / count_f,
        m[0][1] / count_f,
        m[0][2] / count_f,
        m[0][1] / count_f,
        m[1][1] / count_f,
        m[1][2] / count_f,
        m[0][2] / count_f,
        m[1][2] / count_f,
        m[2][2] / count_f,
    );

    let eigen = SymmetricEigen::new(cov);
    let mut lambda = [
        eigen.eigenvalues[0].max(0.0),
        eigen.eigenvalues[1].max(0.0),
        eigen.eigenvalues[2].max(0.0),
    ];
    lambda.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    let elongation = guarded_sqrt_ratio(lambda[0], lambda[1]);
    let flatness = guarded_sqrt_ratio(lambda[1], lambda[2]);

    // Ellipsoid with matching second moments has semi-axes sqrt(5 * lambda).
    let ellipsoid_volume = 4.0 / 3.0
        * std::f64::consts::PI
        * (5.0 * lambda[0]).sqrt()
        * (5.0 * lambda[1]).sqrt()
        * (5.0 * lambda[2]).sqrt();
    let ellipsoid_ratio = if ellipsoid_volume > f64::EPSILON {
        count_f / ellipsoid_volume
    } else {
        1.0
    };

    // Scale-normalized moments: eta = mu / n^(5/3) for second order.
    let norm = count_f.powf(5.0 / 3.0);
    let e = |i: usize, j: usize| m[i.min(j)][i.max(j)] / norm;
    let j1 = e(0, 0) + e(1, 1) + e(2, 2);
    let j2 = e(0, 0) * e(1, 1) + e(0, 0) * e(2, 2) + e(1, 1) * e(2, 2)
        - e(0, 1) * e(0, 1)
        - e(0, 2) * e(0, 2)
        - e(1, 2) * e(1, 2);
    let j3 = e(0, 0) * (e(1, 1) * e(2, 2) - e(1, 2) * e(1, 2))
        - e(0, 1) * (e(0, 1) * e(2, 2) - e(1, 2) * e(0, 2))
        + e(0, 2) * (e(0, 1) * e(1, 2) - e(1, 1) * e(0, 2));

    ShapeMoments {
        elongation,
        flatness,
        ellipsoid_ratio,
        invariants: [j1, j2, j3],
    }
}

fn guarded_sqrt_ratio(num: f64, den: f64) -> f64 {
    if den > f64::EPSILON {
        (num / den).sqrt()
    } else {
        1.0
    }
}

/// `36 pi V^2 / S^3` and its cube root, computed on the discrete face
/// area. A sphere scores 1, a cube about 0.52 / 0.81.
fn compactness_measures(count_f: f64, surface_area: usize) -> (f64, f64) {
    if surface_area == 0 {
        return (1.0, 1.0);
    }
    let s = surface_area as f64;
    let compactness = 36.0 * std::f64::consts::PI * count_f * count_f / (s * s * s);
    (compactness, compactness.cbrt())
}

/// Convex-hull solidity and convexity over the surface voxel centers.
///
/// Objects flat in exactly one axis are extruded first: the voxel set is
/// duplicated offset by one unit along each flat axis jointly, which gives
/// the hull a nonzero extent there. Objects flat in two or more axes keep
/// the 1.0 defaults.
fn hull_measures(
    surface: &[Coord3],
    bounding_box: &BoundingBox,
    count_f: f64,
    surface_area: usize,
) -> (f64, f64) {
    let extents = bounding_box.extents();
    let flat: Vec<usize> = (0..3).filter(|&a| extents[a] == 1).collect();
    if flat.len() >= 2 {
        return (1.0, 1.0);
    }

    let mut pts: Vec<[f64; 3]> = surface
        .iter()
        .map(|c| [f64::from(c.x), f64::from(c.y), f64::from(c.z)])
        .collect();
    if !flat.is_empty() {
        let offset = [
            flat.contains(&0) as u8 as f64,
            flat.contains(&1) as u8 as f64,
            flat.contains(&2) as u8 as f64,
        ];
        let shifted: Vec<[f64; 3]> = pts
            .iter()
            .map(|p| [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]])
            .collect();
        pts.extend(shifted);
    }

    match convex_hull_metrics(&pts) {
        Some(hull) if hull.volume > f64::EPSILON && surface_area > 0 => (
            count_f / hull.volume,
            hull.area / surface_area as f64,
        ),
        _ => (1.0, 1.0),
    }
}

fn intensity_stats<T: VoxelValue>(
    voxels: &[Coord3],
    vol: &VolumeRef<'_, T>,
) -> Option<IntensityStats> {
    let mut n = 0usize;
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &c in voxels {
        let Some(raw) = vol.get_checked(c) else {
            continue;
        };
        let v = f64::from(Into::<u16>::into(raw));
        n += 1;
        sum += v;
        sum_sq += v * v;
        min = min.min(v);
        max = max.max(v);
    }
    if n == 0 {
        return None;
    }
    let mean = sum / n as f64;
    let sd = if n > 1 {
        ((sum_sq - sum * sum / n as f64) / (n as f64 - 1.0))
            .max(0.0)
            .sqrt()
    } else {
        0.0
    };
    Some(IntensityStats {
        mean,
        sd,
        min,
        max,
        sum,
    })
}

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cursor::CircularCursor;
use crate::walk::{Axis, BoundaryWalk, EdgeBreach, EdgeContact, PixelPolygon};

/// Sentinel replacing the parallel coordinate of a point scheduled for
/// removal during the rebuild pass.
const REMOVED: i32 = -1;

/// Which edge of an axis the cropper trimmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeCrop {
    /// The ROI does not touch either edge of the axis, or the exclusion
    /// depth is zero.
    None,
    /// The low-coordinate edge (x = 0 or y = 0) was cropped.
    Start,
    /// The high-coordinate edge (x = w-1 or y = h-1) was cropped.
    End,
}

/// Cropped polygon plus the per-axis record of which edge was trimmed.
#[derive(Clone, Debug)]
pub struct ExclusionZoneResult {
    pub polygon: PixelPolygon,
    /// Crop classification for the x and y axis, in that order.
    pub crop: [EdgeCrop; 2],
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Keep,
    Remove,
    /// Survivor re-threaded onto the buffer line.
    Pin,
}

/// Trims ROI outlines inward from whichever image edge they contact.
#[derive(Clone, Copy, Debug)]
pub struct ExclusionCropper {
    width: i32,
    height: i32,
    depth_x: i32,
    depth_y: i32,
}

impl ExclusionCropper {
    pub fn new(width: i32, height: i32, depth_x: i32, depth_y: i32) -> Self {
        Self {
            width,
            height,
            depth_x,
            depth_y,
        }
    }

    /// Crops the walk along x, then along y, and rebuilds a polygon from
    /// the surviving points.
    ///
    /// Each axis is handled independently: both of its image edges are
    /// scanned for contact, the edge with the longer contact wins (equal
    /// nonzero contact deterministically picks the end edge), and every
    /// on-edge run is retracted to the buffer line `|edge - depth|`. A
    /// zero depth leaves the axis untouched.
    pub fn crop(&self, walk: &BoundaryWalk) -> ExclusionZoneResult {
        let mut xs = walk.coords(Axis::X);
        let mut ys = walk.coords(Axis::Y);

        let crop_x = if self.depth_x > 0 {
            crop_axis(&mut xs, &mut ys, self.width - 1, self.depth_x)
        } else {
            EdgeCrop::None
        };
        let crop_y = if self.depth_y > 0 {
            crop_axis(&mut ys, &mut xs, self.height - 1, self.depth_y)
        } else {
            EdgeCrop::None
        };

        debug!(
            "ExclusionCropper::crop walk_len={} crop_x={:?} crop_y={:?} kept={}",
            walk.len(),
            crop_x,
            crop_y,
            xs.len()
        );

        ExclusionZoneResult {
            polygon: PixelPolygon::from_coords(&xs, &ys),
            crop: [crop_x, crop_y],
        }
    }
}

/// Crops one axis in place. `par` holds the coordinates parallel to the
/// axis (the ones compared against the edges), `orth` the orthogonal ones;
/// both are rewritten to the surviving points.
fn crop_axis(par: &mut Vec<i32>, orth: &mut Vec<i32>, edge_end: i32, depth: i32) -> EdgeCrop {
    let n = par.len();
    if n == 0 {
        return EdgeCrop::None;
    }

    let start_contact = EdgeContact::scan(par, orth, 0);
    let end_contact = EdgeContact::scan(par, orth, edge_end);
    if !start_contact.has_contact() && !end_contact.has_contact() {
        return EdgeCrop::None;
    }

    // The longer contact wins; an exact nonzero tie goes to the end edge.
    let (outcome, contact) = if start_contact.total_length() > end_contact.total_length() {
        (EdgeCrop::Start, start_contact)
    } else {
        (EdgeCrop::End, end_contact)
    };
    let edge = contact.edge();
    let buffer = (edge - depth).abs();
    let breach = EdgeBreach::new(edge, buffer);

    let mut marks = vec![Mark::Keep; n];
    for run in contact.runs() {
        mark_run_interior(&mut marks, run.start, run.end);
        // Retract both ends of the run: down the walk from its low end, up
        // the walk from its high end.
        outward_walk(par, &mut marks, run.start, false, &breach);
        outward_walk(par, &mut marks, run.end, true, &breach);
    }

    for (i, mark) in marks.iter().enumerate() {
        match mark {
            Mark::Keep => {}
            Mark::Remove => par[i] = REMOVED,
            Mark::Pin => par[i] = buffer,
        }
    }
    rebuild(par, orth, &breach, buffer);
    outcome
}

/// Marks the points strictly between a run's paired endpoints.
fn mark_run_interior(marks: &mut [Mark], start: usize, end: usize) {
    if start == end {
        return;
    }
    let mut cursor = CircularCursor::at(marks.len(), start);
    while cursor.step_toward(end) {
        marks[cursor.index()] = Mark::Remove;
    }
}

/// Walks outward from a run endpoint until the buffer line is crossed,
/// pins the last point before the crossing onto the buffer, and removes
/// the points strictly between the pin and the run.
///
/// If the walk never breaches (the whole outline lies inside the exclusion
/// band) nothing is marked; the rebuild pass then discards the outline.
fn outward_walk(par: &[i32], marks: &mut [Mark], endpoint: usize, forward: bool, breach: &EdgeBreach) {
    let n = par.len();
    let mut cursor = CircularCursor::at(n, endpoint);
    let mut prev = endpoint;
    let mut steps = 0usize;
    loop {
        let i = if forward {
            cursor.advance()
        } else {
            cursor.retreat()
        };
        steps += 1;
        if steps > n {
            return;
        }
        if breach.has_breached(par[i]) {
            marks[prev] = Mark::Pin;
            remove_between(marks, endpoint, prev, forward);
            return;
        }
        prev = i;
    }
}

/// Removes the points strictly between `from` and `to`, walking in the
/// given direction. Pins placed by other runs are left standing.
fn remove_between(marks: &mut [Mark], from: usize, to: usize, forward: bool) {
    if from == to {
        return;
    }
    let mut cursor = CircularCursor::at(marks.len(), from);
    loop {
        let i = if forward {
            cursor.advance()
        } else {
            cursor.retreat()
        };
        if i == to {
            return;
        }
        if marks[i] == Mark::Keep {
            marks[i] = Mark::Remove;
        }
    }
}

/// Single pass keeping the points still on the buffer side of the breach
/// predicate plus the pinned endpoints, dropping everything else and
/// collapsing consecutive duplicates.
fn rebuild(par: &mut Vec<i32>, orth: &mut Vec<i32>, breach: &EdgeBreach, buffer: i32) {
    let n = par.len();
    let mut new_par = Vec::with_capacity(n);
    let mut new_orth = Vec::with_capacity(n);
    for i in 0..n {
        let p = par[i];
        if p == REMOVED {
            continue;
        }
        if !breach.has_breached(p) && p != buffer {
            continue;
        }
        if new_par.last() == Some(&p) && new_orth.last() == Some(&orth[i]) {
            continue;
        }
        new_par.push(p);
        new_orth.push(orth[i]);
    }
    *par = new_par;
    *orth = new_orth;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::{trace_boundary, Point2i, RoiTest};

    fn polygon(coords: &[(i32, i32)]) -> PixelPolygon {
        PixelPolygon::new(coords.iter().map(|&(x, y)| Point2i::new(x, y)).collect())
    }

    fn bounds(poly: &PixelPolygon) -> (i32, i32, i32, i32) {
        let xs: Vec<i32> = poly.points().iter().map(|p| p.x).collect();
        let ys: Vec<i32> = poly.points().iter().map(|p| p.y).collect();
        (
            xs.iter().copied().min().unwrap(),
            xs.iter().copied().max().unwrap(),
            ys.iter().copied().min().unwrap(),
            ys.iter().copied().max().unwrap(),
        )
    }

    #[test]
    fn zero_depth_returns_identical_polygon() {
        let roi = polygon(&[(0, 0), (99, 0), (99, 99), (0, 99)]);
        let walk = trace_boundary(&roi, 100, 100);
        let result = ExclusionCropper::new(100, 100, 0, 0).crop(&walk);
        assert_eq!(result.crop, [EdgeCrop::None, EdgeCrop::None]);
        assert_eq!(result.polygon.len(), walk.len());
        assert_eq!(result.polygon.points(), walk.points());
    }

    #[test]
    fn interior_roi_is_never_cropped() {
        let roi = polygon(&[(20, 20), (60, 20), (60, 60), (20, 60)]);
        let walk = trace_boundary(&roi, 100, 100);
        let result = ExclusionCropper::new(100, 100, 10, 10).crop(&walk);
        assert_eq!(result.crop, [EdgeCrop::None, EdgeCrop::None]);
        assert_eq!(bounds(&result.polygon), (20, 60, 20, 60));
    }

    #[test]
    fn equal_contact_crops_the_end_edge() {
        // ROI spanning the whole image: all four edge contacts are equal,
        // so the end edge is trimmed on both axes.
        let roi = polygon(&[(0, 0), (99, 0), (99, 99), (0, 99)]);
        let walk = trace_boundary(&roi, 100, 100);
        let result = ExclusionCropper::new(100, 100, 10, 10).crop(&walk);
        assert_eq!(result.crop, [EdgeCrop::End, EdgeCrop::End]);
        // The end edge retracts to the buffer line |99 - 10| = 89.
        assert_eq!(bounds(&result.polygon), (0, 89, 0, 89));
    }

    #[test]
    fn start_edge_with_longer_contact_wins() {
        // Touches x=0 along its full left side and x=99 not at all.
        let roi = polygon(&[(0, 10), (50, 10), (50, 90), (0, 90)]);
        let walk = trace_boundary(&roi, 100, 100);
        let result = ExclusionCropper::new(100, 100, 10, 0).crop(&walk);
        assert_eq!(result.crop[0], EdgeCrop::Start);
        // The left side retracts to the buffer line |0 - 10| = 10.
        let (x_min, x_max, y_min, y_max) = bounds(&result.polygon);
        assert_eq!((x_min, x_max), (10, 50));
        assert_eq!((y_min, y_max), (10, 90));
    }

    #[test]
    fn cropped_area_is_monotone() {
        let roi = polygon(&[(0, 0), (79, 0), (79, 59), (0, 59)]);
        let walk = trace_boundary(&roi, 80, 60);
        let result = ExclusionCropper::new(80, 60, 8, 8).crop(&walk);

        let mut original_area = 0usize;
        let mut cropped_area = 0usize;
        for y in 0..60 {
            for x in 0..80 {
                if roi.contains(x, y) {
                    original_area += 1;
                }
                if result.polygon.contains(x, y) {
                    cropped_area += 1;
                }
            }
        }
        assert!(cropped_area <= original_area);
        assert!(cropped_area > 0);
    }

    #[test]
    fn pinned_points_land_exactly_on_the_buffer() {
        let roi = polygon(&[(0, 0), (99, 0), (99, 99), (0, 99)]);
        let walk = trace_boundary(&roi, 100, 100);
        let result = ExclusionCropper::new(100, 100, 10, 0).crop(&walk);
        assert_eq!(result.crop[0], EdgeCrop::End);
        let max_x = result.polygon.points().iter().map(|p| p.x).max().unwrap();
        assert_eq!(max_x, 89);
        // Both corners of the trimmed side are re-threaded at x = 89.
        let pinned: Vec<&Point2i> = result
            .polygon
            .points()
            .iter()
            .filter(|p| p.x == 89)
            .collect();
        assert!(pinned.iter().any(|p| p.y == 0));
        assert!(pinned.iter().any(|p| p.y == 99));
    }
}

mod common;

use common::synthetic_volume::{empty_volume, paint_cube, x_ramp_volume};
use disector::prelude::*;
use disector::types::Coord3;
use disector::volume::VolumeRef;
use disector::AssessmentMode;

/// Rectangle ROI covering the pixel range `[x0..=x1] x [y0..=y1]` under the
/// even-odd membership test.
fn rect_roi(x0: i32, y0: i32, x1: i32, y1: i32) -> PixelPolygon {
    PixelPolygon::new(vec![
        Point2i::new(x0, y0),
        Point2i::new(x1 + 1, y0),
        Point2i::new(x1 + 1, y1 + 1),
        Point2i::new(x0, y1 + 1),
    ])
}

#[test]
fn counts_two_separate_objects_in_one_roi() {
    let (w, h, d) = (32usize, 32usize, 8usize);
    let mut data = empty_volume(w, h, d);
    paint_cube(&mut data, w, h, (2, 2, 2), 4, 255);
    paint_cube(&mut data, w, h, (20, 20, 3), 3, 255);

    let mut assessor = RoiAssessor::new(AssessParams::default());
    let mut volume = VolumeMut::new(w, h, d, &mut data);
    let report = assessor.assess(&mut volume, None, &[rect_roi(0, 0, 31, 31)]);

    assert_eq!(report.rois.len(), 1);
    let roi = &report.rois[0];
    assert_eq!(roi.object_count, 2);
    assert_eq!(roi.volume_voxels, 64 + 27);
    assert_eq!(report.objects.len(), 2);

    // Objects arrive in scan order; the canonical first voxels identify them.
    assert_eq!(report.objects[0].first_voxel, Coord3::new(2, 2, 2));
    assert_eq!(report.objects[1].first_voxel, Coord3::new(20, 20, 3));

    let volume_stats = roi
        .attributes
        .iter()
        .find(|a| a.name == "volume")
        .expect("volume attribute");
    assert_eq!(volume_stats.stats.n, 2);
    assert!((volume_stats.stats.mean - 45.5).abs() < 1e-9);
    assert_eq!(volume_stats.stats.min, 27.0);
    assert_eq!(volume_stats.stats.max, 64.0);
}

#[test]
fn majority_vote_assigns_a_straddling_object_once() {
    let (w, h, d) = (32usize, 32usize, 8usize);
    let mut data = empty_volume(w, h, d);
    // Columns 13..=16: three columns fall into the left ROI's expanded
    // frame, one into the right one.
    paint_cube(&mut data, w, h, (13, 8, 2), 4, 255);
    paint_cube(&mut data, w, h, (24, 10, 2), 3, 255);

    let left = rect_roi(0, 0, 15, 31);
    let right = rect_roi(16, 0, 31, 31);

    let mut assessor = RoiAssessor::new(AssessParams::default());
    let mut volume = VolumeMut::new(w, h, d, &mut data);
    let report = assessor.assess(&mut volume, None, &[left, right]);

    let left_result = &report.rois[0];
    let right_result = &report.rois[1];
    assert_eq!(left_result.object_count, 1);
    assert_eq!(left_result.volume_voxels, 64);
    // The straddler votes outside the right frame; only the interior cube
    // counts there.
    assert_eq!(right_result.object_count, 1);
    assert_eq!(right_result.volume_voxels, 27);

    let right_stage = &report.trace.rois[1];
    assert_eq!(right_stage.objects_found, 2);
    assert_eq!(right_stage.rejected_outside, 1);
}

#[test]
fn fragment_mode_counts_the_in_frame_part() {
    let (w, h, d) = (32usize, 32usize, 8usize);
    let mut data = empty_volume(w, h, d);
    paint_cube(&mut data, w, h, (13, 8, 2), 4, 255);

    let right = rect_roi(16, 0, 31, 31);
    let params = AssessParams {
        mode: AssessmentMode::ObjectAndFragments,
        ..Default::default()
    };
    let mut assessor = RoiAssessor::new(params);
    let mut volume = VolumeMut::new(w, h, d, &mut data);
    let report = assessor.assess(&mut volume, None, &[right]);

    // Only the x = 16 column of the cube lies inside the right frame.
    let roi = &report.rois[0];
    assert_eq!(roi.object_count, 1);
    assert_eq!(roi.volume_voxels, 16);
    assert_eq!(report.objects[0].first_voxel, Coord3::new(16, 8, 2));
}

#[test]
fn z_guard_rejects_objects_touching_the_stack_faces() {
    let (w, h, d) = (16usize, 16usize, 6usize);
    let mut data = empty_volume(w, h, d);
    // Touches the bottom slice.
    paint_cube(&mut data, w, h, (2, 2, 0), 2, 255);
    // Clear of both guard slabs.
    paint_cube(&mut data, w, h, (8, 8, 2), 2, 255);

    let params = AssessParams {
        exclusion: disector::ExclusionParams {
            depth_z: 1.0,
            apply_z: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut assessor = RoiAssessor::new(params);
    let mut volume = VolumeMut::new(w, h, d, &mut data);
    let report = assessor.assess(&mut volume, None, &[rect_roi(0, 0, 15, 15)]);

    let roi = &report.rois[0];
    assert_eq!(roi.object_count, 1);
    assert_eq!(report.objects[0].first_voxel, Coord3::new(8, 8, 2));

    let stage = &report.trace.rois[0];
    assert_eq!(stage.z_guard_slices, 1);
    assert_eq!(stage.rejected_z, 1);
}

#[test]
fn intensity_attributes_follow_the_companion_volume() {
    let (w, h, d) = (16usize, 16usize, 4usize);
    let mut data = empty_volume(w, h, d);
    paint_cube(&mut data, w, h, (4, 4, 1), 2, 255);
    let intensity = x_ramp_volume(w, h, d);

    let mut assessor = RoiAssessor::new(AssessParams::default());
    let mut volume = VolumeMut::new(w, h, d, &mut data);
    let intensity_ref = VolumeRef::new(w, h, d, &intensity);
    let report = assessor.assess(&mut volume, Some(&intensity_ref), &[rect_roi(0, 0, 15, 15)]);

    let record = &report.objects[0];
    let mean = record.intensity_mean.expect("intensity mean");
    // Cube spans x = 4..=5 on a ramp of x * 255 / 16.
    let expected: f64 = (4.0 * 255.0 / 16.0 + 5.0 * 255.0 / 16.0) / 2.0;
    assert!((mean - expected.floor()).abs() <= 1.0, "mean={mean}");
    assert!(record.intensity_min.is_some());
    assert!(record.intensity_max.is_some());

    let roi = &report.rois[0];
    assert!(roi.attributes.iter().any(|a| a.name == "intensity_mean"));
}

#[test]
fn buffer_survives_a_counting_run() {
    let (w, h, d) = (16usize, 16usize, 4usize);
    let mut data = empty_volume(w, h, d);
    paint_cube(&mut data, w, h, (3, 3, 1), 3, 255);
    let reference = data.clone();

    let mut assessor = RoiAssessor::new(AssessParams::default());
    let mut volume = VolumeMut::new(w, h, d, &mut data);
    let _ = assessor.assess(&mut volume, None, &[rect_roi(0, 0, 15, 15)]);
    assert_eq!(data, reference);
}

#[test]
fn report_serializes_to_json() {
    let (w, h, d) = (16usize, 16usize, 4usize);
    let mut data = empty_volume(w, h, d);
    paint_cube(&mut data, w, h, (3, 3, 1), 3, 255);

    let mut assessor = RoiAssessor::new(AssessParams::default());
    let mut volume = VolumeMut::new(w, h, d, &mut data);
    let report = assessor.assess(&mut volume, None, &[rect_roi(0, 0, 15, 15)]);

    let json = serde_json::to_string(&report).expect("serializable report");
    assert!(json.contains("\"objectCount\":1"));
    assert!(json.contains("\"timings\""));
}

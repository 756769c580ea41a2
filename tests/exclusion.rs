mod common;

use common::synthetic_volume::{empty_volume, paint_cube};
use disector::exclusion::EdgeCrop;
use disector::prelude::*;
use disector::ExclusionParams;

/// ROI whose four corners coincide with the image corners, the classic
/// full-frame counting setup.
fn full_frame(width: i32, height: i32) -> PixelPolygon {
    PixelPolygon::new(vec![
        Point2i::new(0, 0),
        Point2i::new(width - 1, 0),
        Point2i::new(width - 1, height - 1),
        Point2i::new(0, height - 1),
    ])
}

#[test]
fn exclusion_zone_rejects_objects_in_the_cropped_band() {
    let (w, h, d) = (20usize, 20usize, 4usize);
    let mut data = empty_volume(w, h, d);
    // Inside the cropped frame.
    paint_cube(&mut data, w, h, (5, 5, 1), 3, 255);
    // Inside the original ROI but within the exclusion band.
    paint_cube(&mut data, w, h, (17, 17, 1), 2, 255);

    let params = AssessParams {
        exclusion: ExclusionParams {
            depth_x: 4,
            depth_y: 4,
            apply_xy: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut assessor = RoiAssessor::new(params);
    let mut volume = VolumeMut::new(w, h, d, &mut data);
    let report = assessor.assess(&mut volume, None, &[full_frame(20, 20)]);

    let stage = &report.trace.rois[0];
    // Equal contact on both edges of each axis: the end edge is cropped.
    assert_eq!(stage.crop, [EdgeCrop::End, EdgeCrop::End]);
    assert_eq!(stage.objects_found, 2);
    assert_eq!(stage.rejected_outside, 1);

    let roi = &report.rois[0];
    assert_eq!(roi.object_count, 1);
    assert_eq!(roi.volume_voxels, 27);
}

#[test]
fn zero_depth_exclusion_changes_nothing() {
    let (w, h, d) = (20usize, 20usize, 4usize);
    let mut data = empty_volume(w, h, d);
    paint_cube(&mut data, w, h, (5, 5, 1), 3, 255);
    paint_cube(&mut data, w, h, (15, 15, 1), 2, 255);

    let run = |apply_xy: bool, data: &mut Vec<u8>| {
        let params = AssessParams {
            exclusion: ExclusionParams {
                depth_x: 0,
                depth_y: 0,
                apply_xy,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut assessor = RoiAssessor::new(params);
        let mut volume = VolumeMut::new(w, h, d, data);
        assessor.assess(&mut volume, None, &[full_frame(20, 20)])
    };

    let with_exclusion = run(true, &mut data);
    let without = run(false, &mut data);
    assert_eq!(
        with_exclusion.rois[0].object_count,
        without.rois[0].object_count
    );
    assert_eq!(
        with_exclusion.rois[0].volume_voxels,
        without.rois[0].volume_voxels
    );
    assert_eq!(
        with_exclusion.trace.rois[0].crop,
        [EdgeCrop::None, EdgeCrop::None]
    );
}

#[test]
fn one_sided_contact_crops_the_touching_edge_only() {
    let (w, h, d) = (24usize, 20usize, 4usize);
    let mut data = empty_volume(w, h, d);
    // Sits just inside the left exclusion band.
    paint_cube(&mut data, w, h, (1, 8, 1), 2, 255);
    // Well inside.
    paint_cube(&mut data, w, h, (12, 8, 1), 2, 255);

    // ROI touching only the x start edge.
    let roi = PixelPolygon::new(vec![
        Point2i::new(0, 2),
        Point2i::new(17, 2),
        Point2i::new(17, 17),
        Point2i::new(0, 17),
    ]);
    let params = AssessParams {
        exclusion: ExclusionParams {
            depth_x: 4,
            depth_y: 4,
            apply_xy: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut assessor = RoiAssessor::new(params);
    let mut volume = VolumeMut::new(w, h, d, &mut data);
    let report = assessor.assess(&mut volume, None, &[roi]);

    let stage = &report.trace.rois[0];
    assert_eq!(stage.crop, [EdgeCrop::Start, EdgeCrop::None]);
    // The cube at x = 1..=2 falls inside the cropped band.
    assert_eq!(report.rois[0].object_count, 1);
    assert_eq!(report.objects[0].first_voxel.x, 12);
}

/// Allocates an all-background volume.
pub fn empty_volume(width: usize, height: usize, depth: usize) -> Vec<u8> {
    assert!(
        width > 0 && height > 0 && depth > 0,
        "volume dimensions must be positive"
    );
    vec![0u8; width * height * depth]
}

/// Paints a solid axis-aligned cube of `value` into the volume.
pub fn paint_cube(
    data: &mut [u8],
    width: usize,
    height: usize,
    origin: (usize, usize, usize),
    side: usize,
    value: u8,
) {
    assert!(side > 0, "cube side must be positive");
    let (x0, y0, z0) = origin;
    for z in z0..z0 + side {
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                data[(z * height + y) * width + x] = value;
            }
        }
    }
}

/// Ramp intensity volume: the value grows with the x coordinate.
pub fn x_ramp_volume(width: usize, height: usize, depth: usize) -> Vec<u8> {
    let mut data = empty_volume(width, height, depth);
    for z in 0..depth {
        for y in 0..height {
            for x in 0..width {
                data[(z * height + y) * width + x] = (x * 255 / width.max(1)) as u8;
            }
        }
    }
    data
}

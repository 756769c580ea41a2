use super::types::{BoundaryWalk, PixelPolygon, Point2i};

/// Rasterizes a polygon outline into a closed unit-step boundary walk.
///
/// Every polygon edge is expanded one axis at a time: intermediate points
/// are synthesized along x while the y coordinate is held, then along y at
/// the target x, each in the direction the edge runs. Vertices are clamped
/// to `[0, width-1] x [0, height-1]` before expansion. The resulting walk
/// contains every (clamped) vertex, never stores the duplicate closing
/// point, and satisfies the unit-step invariant cyclically.
pub fn trace_boundary(polygon: &PixelPolygon, width: i32, height: i32) -> BoundaryWalk {
    let n = polygon.len();
    if n == 0 {
        return BoundaryWalk::from_points(Vec::new());
    }

    let clamp = |p: Point2i| Point2i::new(p.x.clamp(0, width - 1), p.y.clamp(0, height - 1));

    let mut points: Vec<Point2i> = Vec::with_capacity(n * 4);
    let mut push = |points: &mut Vec<Point2i>, p: Point2i| {
        if points.last() != Some(&p) {
            points.push(p);
        }
    };

    for i in 0..n {
        let a = clamp(polygon.vertex(i));
        let b = clamp(polygon.vertex((i + 1) % n));
        push(&mut points, a);

        let step_x = (b.x - a.x).signum();
        let mut x = a.x;
        while x != b.x {
            x += step_x;
            push(&mut points, Point2i::new(x, a.y));
        }
        let step_y = (b.y - a.y).signum();
        let mut y = a.y;
        while y != b.y {
            y += step_y;
            push(&mut points, Point2i::new(b.x, y));
        }
    }

    // The final edge lands back on the first vertex; drop the duplicate so
    // the closure stays implicit.
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    BoundaryWalk::from_points(points)
}

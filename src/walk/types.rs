use serde::{Deserialize, Serialize};

/// Integer pixel coordinate in a 2D slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point2i {
    pub x: i32,
    pub y: i32,
}

impl Point2i {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// In-plane axis selector used when projecting a walk onto one coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The orthogonal in-plane axis.
    #[inline]
    pub fn ortho(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Projects a point onto this axis.
    #[inline]
    pub fn of(self, p: Point2i) -> i32 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }
}

/// Point-in-region test, the seam between the counting core and the ROI
/// provider. Implemented by [`PixelPolygon`], by [`ExpandedRoi`], and via
/// [`RoiFn`] by plain closures in tests.
pub trait RoiTest {
    fn contains(&self, x: i32, y: i32) -> bool;
}

/// Adapter lifting a closure into a [`RoiTest`].
pub struct RoiFn<F>(pub F);

impl<F> RoiTest for RoiFn<F>
where
    F: Fn(i32, i32) -> bool,
{
    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        (self.0)(x, y)
    }
}

/// Closed ROI outline given as an ordered vertex list. The last vertex
/// connects implicitly back to the first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPolygon {
    points: Vec<Point2i>,
}

impl PixelPolygon {
    pub fn new(points: Vec<Point2i>) -> Self {
        Self { points }
    }

    /// Builds a polygon from parallel coordinate slices of equal length.
    pub fn from_coords(xs: &[i32], ys: &[i32]) -> Self {
        debug_assert_eq!(xs.len(), ys.len());
        Self {
            points: xs
                .iter()
                .zip(ys)
                .map(|(&x, &y)| Point2i::new(x, y))
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point2i] {
        &self.points
    }

    #[inline]
    pub fn vertex(&self, i: usize) -> Point2i {
        self.points[i]
    }
}

impl RoiTest for PixelPolygon {
    /// Even-odd ray-cast membership test.
    fn contains(&self, x: i32, y: i32) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        let (px, py) = (x as f64, y as f64);
        let mut inside = false;
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (self.points[i].x as f64, self.points[i].y as f64);
            let (xj, yj) = (self.points[j].x as f64, self.points[j].y as f64);
            if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// Contiguity-expanded region membership.
///
/// A pixel belongs to the expanded region when it, or its neighbor one step
/// back in x, in y, or in both, belongs to the wrapped region. This is the
/// point set of the region unioned with itself shifted +1 in x, +1 in y and
/// +1 in both, which closes the 1-pixel rasterization gap between adjacent
/// ROIs.
pub struct ExpandedRoi<'a, R: RoiTest + ?Sized> {
    inner: &'a R,
}

impl<'a, R: RoiTest + ?Sized> ExpandedRoi<'a, R> {
    pub fn new(inner: &'a R) -> Self {
        Self { inner }
    }
}

impl<R: RoiTest + ?Sized> RoiTest for ExpandedRoi<'_, R> {
    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        self.inner.contains(x, y)
            || self.inner.contains(x - 1, y)
            || self.inner.contains(x, y - 1)
            || self.inner.contains(x - 1, y - 1)
    }
}

/// Closed sequence of unit-step pixel coordinates tracing an ROI outline.
///
/// Consecutive points (cyclically) differ by at most one unit per axis.
/// Every vertex of the source polygon appears in the walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundaryWalk {
    points: Vec<Point2i>,
}

impl BoundaryWalk {
    pub(crate) fn from_points(points: Vec<Point2i>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point2i] {
        &self.points
    }

    #[inline]
    pub fn point(&self, i: usize) -> Point2i {
        self.points[i]
    }

    /// Materializes the projection of the walk onto `axis`.
    pub fn coords(&self, axis: Axis) -> Vec<i32> {
        self.points.iter().map(|&p| axis.of(p)).collect()
    }
}

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Axis-aligned 3D bounding box.
///
/// Field order follows the common city-model convention
/// `(minx, miny, minz, maxx, maxy, maxz)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox {
    pub minx: f64,
    pub miny: f64,
    pub minz: f64,
    pub maxx: f64,
    pub maxy: f64,
    pub maxz: f64,
}

impl Bbox {
    /// Creates a new bounding box from its six extents.
    #[must_use]
    pub fn new(minx: f64, miny: f64, minz: f64, maxx: f64, maxy: f64, maxz: f64) -> Self {
        Self {
            minx,
            miny,
            minz,
            maxx,
            maxy,
            maxz,
        }
    }

    /// Extent along the x axis.
    #[must_use]
    pub fn dx(&self) -> f64 {
        self.maxx - self.minx
    }

    /// Extent along the y axis.
    #[must_use]
    pub fn dy(&self) -> f64 {
        self.maxy - self.miny
    }

    /// Extent along the z axis.
    #[must_use]
    pub fn dz(&self) -> f64 {
        self.maxz - self.minz
    }

    /// Midpoint of the x extent.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        (self.minx + self.maxx) / 2.0
    }

    /// Midpoint of the y extent.
    #[must_use]
    pub fn center_y(&self) -> f64 {
        (self.miny + self.maxy) / 2.0
    }

    /// Midpoint of the z extent.
    #[must_use]
    pub fn center_z(&self) -> f64 {
        (self.minz + self.maxz) / 2.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn bbox_extents_and_centers() {
        let b = Bbox::new(0.0, 2.0, -1.0, 10.0, 6.0, 3.0);
        assert_abs_diff_eq!(b.dx(), 10.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(b.dy(), 4.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(b.dz(), 4.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(b.center_x(), 5.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(b.center_y(), 4.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(b.center_z(), 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn bbox_degenerate_extent_is_zero() {
        let b = Bbox::new(1.0, 1.0, 1.0, 1.0, 5.0, 1.0);
        assert_abs_diff_eq!(b.dx(), 0.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(b.dy(), 4.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(b.dz(), 0.0, epsilon = TOLERANCE);
    }
}

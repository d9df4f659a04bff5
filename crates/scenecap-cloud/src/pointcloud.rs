use glam::DVec3;

/// A colored point cloud reconstructed from a scene buffer.
///
/// Points and colors are parallel, row-major sequences. In world mode both
/// have one entry per scanned pixel. In camera-relative mode pixels without
/// a valid depth are filtered from the points but still contribute a color,
/// so the points sequence may be shorter than the colors sequence.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    // The reconstructed points, in cm.
    points: Vec<[f64; 3]>,
    // The sRGB colors of the scanned pixels.
    colors: Vec<[u8; 3]>,
}

impl PointCloud {
    /// Create a new point cloud from points and colors.
    pub fn new(points: Vec<[f64; 3]>, colors: Vec<[u8; 3]>) -> Self {
        Self { points, colors }
    }

    /// Get the number of points in the point cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get as reference the points in the point cloud.
    pub fn points(&self) -> &Vec<[f64; 3]> {
        &self.points
    }

    /// Get as reference the colors of the scanned pixels.
    pub fn colors(&self) -> &Vec<[u8; 3]> {
        &self.colors
    }

    /// Convert a point from [f64; 3] to DVec3.
    fn point_to_dvec3(point: &[f64; 3]) -> DVec3 {
        DVec3::from_array(*point)
    }

    /// Get the minimum bound of the point cloud.
    pub fn get_min_bound(&self) -> DVec3 {
        if self.points.is_empty() {
            return DVec3::ZERO;
        }
        self.points
            .iter()
            .map(Self::point_to_dvec3)
            .fold(Self::point_to_dvec3(&self.points[0]), |a, b| a.min(b))
    }

    /// Get the maximum bound of the point cloud.
    pub fn get_max_bound(&self) -> DVec3 {
        if self.points.is_empty() {
            return DVec3::ZERO;
        }
        self.points
            .iter()
            .map(Self::point_to_dvec3)
            .fold(Self::point_to_dvec3(&self.points[0]), |a, b| a.max(b))
    }
}

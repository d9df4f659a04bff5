use glam::{DVec2, DVec3};
use scenecap_camera::{projection, screen, CaptureDevice};

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    /// The minimum corner of the rectangle.
    pub min: DVec2,
    /// The maximum corner of the rectangle.
    pub max: DVec2,
}

impl Bounds2 {
    /// Create a new rectangle from its corners.
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// The size of the rectangle in pixels.
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }
}

impl std::fmt::Display for Bounds2 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "[({}, {}) - ({}, {})]",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

/// The screen-space bounds of a projected 3D volume.
#[derive(Debug, Clone, Copy)]
pub struct ProjectedBounds {
    /// The clamped bounding rectangle in pixel space.
    pub bounds: Bounds2,
    /// True when no edge of the rectangle had to be clamped.
    pub fully_visible: bool,
    /// The 8 world-space corners of the projected box.
    pub world_corners: [DVec3; 8],
    /// The raw pixel positions of the 8 corners.
    pub screen_corners: [DVec2; 8],
}

/// Clamp a rectangle min edge against the image border margins.
fn clamp_min_edge(value: f64, extent: f64, margin: f64) -> Option<f64> {
    if value < margin {
        Some(margin)
    } else if value > extent - margin * 2.0 {
        Some(extent - margin * 2.0)
    } else {
        None
    }
}

/// Clamp a rectangle max edge against the image border margins.
fn clamp_max_edge(value: f64, extent: f64, margin: f64) -> Option<f64> {
    if value > extent - margin {
        Some(extent - margin)
    } else if value < margin * 2.0 {
        Some(margin * 2.0)
    } else {
        None
    }
}

/// Project an axis-aligned box to its screen-space bounding rectangle.
///
/// # Arguments
///
/// * `device` - The capture device, posed in world space.
/// * `origin` - Center of the box in world-space cm.
/// * `half_extents` - Half extents of the box along the world axes, in cm.
/// * `border_clamp` - Margin in pixels the rectangle is clamped into.
///
/// # Returns
///
/// The clamped rectangle, a flag that is true only when no clamping was
/// needed, and the intermediate world/screen corner arrays for diagnostics.
///
/// Corners behind the camera plane keep the engine convention of projecting
/// to pixel (0, 0). The min edges are clamped into
/// `[border_clamp, extent - 2 * border_clamp]` and the max edges into
/// `[2 * border_clamp, extent - border_clamp]`, each clamp clearing the
/// visibility flag.
pub fn project_bounds_to_screen(
    device: &CaptureDevice,
    origin: DVec3,
    half_extents: DVec3,
    border_clamp: f64,
) -> ProjectedBounds {
    let size = device.target_size;
    let view_projection = projection::view_projection_matrix(device);

    let e = half_extents;
    let world_corners = [
        origin + DVec3::new(e.x, e.y, e.z),
        origin + DVec3::new(-e.x, e.y, e.z),
        origin + DVec3::new(e.x, -e.y, e.z),
        origin + DVec3::new(-e.x, -e.y, e.z),
        origin + DVec3::new(e.x, e.y, -e.z),
        origin + DVec3::new(-e.x, e.y, -e.z),
        origin + DVec3::new(e.x, -e.y, -e.z),
        origin + DVec3::new(-e.x, -e.y, -e.z),
    ];

    let mut min_pixel = DVec2::new(size.width as f64, size.height as f64);
    let mut max_pixel = DVec2::ZERO;
    let mut screen_corners = [DVec2::ZERO; 8];
    for (corner, screen_corner) in world_corners.iter().zip(screen_corners.iter_mut()) {
        let pixel = screen::project_world_to_screen(*corner, size, &view_projection)
            .unwrap_or(DVec2::ZERO);
        *screen_corner = pixel;
        min_pixel = min_pixel.min(pixel);
        max_pixel = max_pixel.max(pixel);
    }

    let mut bounds = Bounds2::new(min_pixel, max_pixel);
    let mut fully_visible = true;
    let width = size.width as f64;
    let height = size.height as f64;

    if let Some(v) = clamp_min_edge(bounds.min.x, width, border_clamp) {
        bounds.min.x = v;
        fully_visible = false;
    }
    if let Some(v) = clamp_min_edge(bounds.min.y, height, border_clamp) {
        bounds.min.y = v;
        fully_visible = false;
    }
    if let Some(v) = clamp_max_edge(bounds.max.x, width, border_clamp) {
        bounds.max.x = v;
        fully_visible = false;
    }
    if let Some(v) = clamp_max_edge(bounds.max.y, height, border_clamp) {
        bounds.max.y = v;
        fully_visible = false;
    }

    ProjectedBounds {
        bounds,
        fully_visible,
        world_corners,
        screen_corners,
    }
}

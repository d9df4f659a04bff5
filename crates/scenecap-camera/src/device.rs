use glam::{DMat4, DQuat, DVec3};

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use scenecap_camera::ImageSize;
///
/// let image_size = ImageSize {
///   width: 640,
///   height: 480,
/// };
///
/// assert_eq!(image_size.width, 640);
/// assert_eq!(image_size.height, 480);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// The projection model of a capture device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Perspective projection from the device field of view.
    #[default]
    Perspective,
    /// Orthographic projection from the device ortho width.
    Orthographic,
}

/// A virtual scene-capture camera.
///
/// Bundles the device pose, intrinsics and the size of the render target it
/// writes to. Positions and distances are in world-space centimeters. The
/// struct is a plain value snapshot; one instance describes the device for
/// the duration of a single projection or deprojection call.
#[derive(Clone, Copy, Debug)]
pub struct CaptureDevice {
    /// World-space position of the device in cm.
    pub position: DVec3,
    /// World-space rotation of the device.
    pub rotation: DQuat,
    /// Full horizontal field of view in degrees (perspective mode).
    pub fov_degrees: f64,
    /// The projection model used when no custom projection is set.
    pub projection_mode: ProjectionMode,
    /// Optional explicit projection matrix, used verbatim when present.
    pub custom_projection: Option<DMat4>,
    /// Width of the orthographic frustum in cm (orthographic mode).
    pub ortho_width: f64,
    /// Size of the output render target in pixels.
    pub target_size: ImageSize,
}

impl CaptureDevice {
    /// Default orthographic frustum width in cm.
    pub const DEFAULT_ORTHO_WIDTH: f64 = 512.0;

    /// Create a new capture device with no custom projection and the default
    /// orthographic width.
    pub fn new(
        position: DVec3,
        rotation: DQuat,
        fov_degrees: f64,
        projection_mode: ProjectionMode,
        target_size: ImageSize,
    ) -> Self {
        Self {
            position,
            rotation,
            fov_degrees,
            projection_mode,
            custom_projection: None,
            ortho_width: Self::DEFAULT_ORTHO_WIDTH,
            target_size,
        }
    }

    /// Set an explicit projection matrix to be used verbatim.
    pub fn with_custom_projection(mut self, projection: DMat4) -> Self {
        self.custom_projection = Some(projection);
        self
    }

    /// Set the orthographic frustum width in cm.
    pub fn with_ortho_width(mut self, ortho_width: f64) -> Self {
        self.ortho_width = ortho_width;
        self
    }

    /// Aspect ratio of the output target, width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.target_size.width as f64 / self.target_size.height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_size() {
        let size = ImageSize::from([320, 240]);
        assert_eq!(size.width, 320);
        assert_eq!(size.height, 240);
    }

    #[test]
    fn test_capture_device_defaults() {
        let device = CaptureDevice::new(
            DVec3::ZERO,
            DQuat::IDENTITY,
            90.0,
            ProjectionMode::Perspective,
            ImageSize {
                width: 200,
                height: 100,
            },
        );
        assert!(device.custom_projection.is_none());
        assert_eq!(device.ortho_width, CaptureDevice::DEFAULT_ORTHO_WIDTH);
        assert_eq!(device.aspect_ratio(), 2.0);
    }
}

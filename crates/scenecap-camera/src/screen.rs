use glam::{DMat4, DVec2, DVec3, DVec4};

use crate::device::ImageSize;

/// Project a world-space point to pixel coordinates.
///
/// # Arguments
///
/// * `world` - The point to project, in world-space cm.
/// * `viewport` - Size of the output image in pixels.
/// * `view_projection` - Combined view-projection matrix of the device.
///
/// # Returns
///
/// The pixel position, with y growing downwards, or `None` when the point is
/// behind the camera plane.
///
/// Example:
///
/// ```
/// use glam::{DQuat, DVec3};
/// use scenecap_camera::{projection, screen, CaptureDevice, ImageSize, ProjectionMode};
///
/// let device = CaptureDevice::new(
///     DVec3::ZERO,
///     DQuat::IDENTITY,
///     90.0,
///     ProjectionMode::Perspective,
///     ImageSize { width: 100, height: 100 },
/// );
/// let vp = projection::view_projection_matrix(&device);
/// let pixel = screen::project_world_to_screen(
///     DVec3::new(10.0, 0.0, 0.0), device.target_size, &vp,
/// ).unwrap();
/// assert_eq!(pixel, glam::DVec2::new(50.0, 50.0));
/// ```
pub fn project_world_to_screen(
    world: DVec3,
    viewport: ImageSize,
    view_projection: &DMat4,
) -> Option<DVec2> {
    let clip = *view_projection * world.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let rhw = 1.0 / clip.w;
    let normalized_x = clip.x * rhw / 2.0 + 0.5;
    let normalized_y = 1.0 - clip.y * rhw / 2.0 - 0.5;
    Some(DVec2::new(
        normalized_x * viewport.width as f64,
        normalized_y * viewport.height as f64,
    ))
}

/// Deproject a pixel to a view-space ray.
///
/// # Arguments
///
/// * `pixel` - The pixel position; fractional parts are truncated.
/// * `viewport` - Size of the image in pixels.
/// * `inverse_projection` - Inverse of the device projection matrix.
///
/// # Returns
///
/// The ray origin on the near plane and its normalized direction. Both are
/// expressed in the space the inverse matrix maps clip space into; passing
/// the inverse projection alone yields view-space coordinates (x-right,
/// y-up, z-forward), passing an inverse view-projection yields world space.
pub fn deproject_screen_to_world(
    pixel: DVec2,
    viewport: ImageSize,
    inverse_projection: &DMat4,
) -> (DVec3, DVec3) {
    let normalized_x = pixel.x.trunc() / viewport.width as f64;
    let normalized_y = pixel.y.trunc() / viewport.height as f64;
    let screen_x = (normalized_x - 0.5) * 2.0;
    let screen_y = (1.0 - normalized_y - 0.5) * 2.0;

    // reversed z: the ray starts on the near plane (ndc z = 1) and ends just
    // short of infinity (ndc z = 0.01) to keep the homogeneous divide finite
    let start_h = *inverse_projection * DVec4::new(screen_x, screen_y, 1.0, 1.0);
    let end_h = *inverse_projection * DVec4::new(screen_x, screen_y, 0.01, 1.0);

    let mut start = start_h.truncate();
    if start_h.w != 0.0 {
        start /= start_h.w;
    }
    let mut end = end_h.truncate();
    if end_h.w != 0.0 {
        end /= end_h.w;
    }

    (start, (end - start).normalize_or_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{CaptureDevice, ProjectionMode};
    use crate::projection;
    use approx::assert_relative_eq;
    use glam::DQuat;

    fn square_device() -> CaptureDevice {
        CaptureDevice::new(
            DVec3::ZERO,
            DQuat::IDENTITY,
            90.0,
            ProjectionMode::Perspective,
            ImageSize {
                width: 100,
                height: 100,
            },
        )
    }

    #[test]
    fn test_project_center() {
        let device = square_device();
        let vp = projection::view_projection_matrix(&device);
        let pixel =
            project_world_to_screen(DVec3::new(10.0, 0.0, 0.0), device.target_size, &vp);
        let pixel = pixel.unwrap();
        assert_relative_eq!(pixel.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(pixel.y, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_project_off_center() {
        let device = square_device();
        let vp = projection::view_projection_matrix(&device);
        // view point (2, 3, 10): ndc (0.2, 0.3), y flipped on screen
        let pixel =
            project_world_to_screen(DVec3::new(10.0, 2.0, 3.0), device.target_size, &vp);
        let pixel = pixel.unwrap();
        assert_relative_eq!(pixel.x, 60.0, epsilon = 1e-9);
        assert_relative_eq!(pixel.y, 35.0, epsilon = 1e-9);
    }

    #[test]
    fn test_project_behind_camera() {
        let device = square_device();
        let vp = projection::view_projection_matrix(&device);
        let pixel =
            project_world_to_screen(DVec3::new(-10.0, 0.0, 0.0), device.target_size, &vp);
        assert!(pixel.is_none());
    }

    #[test]
    fn test_deproject_center_ray() {
        let device = square_device();
        let inv = projection::inverse_projection_matrix(&device);
        let (origin, direction) =
            deproject_screen_to_world(DVec2::new(50.0, 50.0), device.target_size, &inv);
        assert_relative_eq!(origin.z, projection::NEAR_CLIP, epsilon = 1e-9);
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(direction.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_project_deproject_roundtrip() {
        let device = square_device();
        let vp = projection::view_projection_matrix(&device);
        let inv = projection::inverse_projection_matrix(&device);

        let world = DVec3::new(10.0, 2.0, 3.0);
        let pixel = project_world_to_screen(world, device.target_size, &vp).unwrap();
        let (origin, direction) =
            deproject_screen_to_world(pixel, device.target_size, &inv);

        // the recovered ray is in view space; pixel truncation quantizes it,
        // so the closest approach stays within a pixel footprint at 10cm depth
        let view_point = projection::view_matrix(&device).transform_point3(world);
        let to_point = view_point - origin;
        let closest = origin + direction * to_point.dot(direction);
        assert!((closest - view_point).length() < 0.5);
    }

    #[test]
    fn test_deproject_orthographic_ray() {
        let mut device = square_device();
        device.projection_mode = ProjectionMode::Orthographic;
        let inv = projection::inverse_projection_matrix(&device);
        let (origin, direction) =
            deproject_screen_to_world(DVec2::new(50.0, 50.0), device.target_size, &inv);
        assert_relative_eq!(origin.z, projection::NEAR_CLIP, epsilon = 1e-9);
        assert_relative_eq!(direction.z, 1.0, epsilon = 1e-9);
    }
}

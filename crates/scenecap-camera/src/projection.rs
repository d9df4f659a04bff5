use glam::{DMat4, DQuat, DVec4};

use crate::device::{CaptureDevice, ProjectionMode};

/// Near clip plane distance in cm.
pub const NEAR_CLIP: f64 = 1.0;

/// Far clip plane distance in cm.
pub const FAR_CLIP: f64 = 1000.0;

/// Constant change of basis from world axes to view axes.
///
/// World space is x-forward, y-right, z-up; view space is x-right, y-up,
/// z-forward. The matrix maps `(x, y, z)` to `(y, z, x)`.
pub const AXIS_SWAP: DMat4 = DMat4::from_cols(
    DVec4::new(0.0, 0.0, 1.0, 0.0),
    DVec4::new(1.0, 0.0, 0.0, 0.0),
    DVec4::new(0.0, 1.0, 0.0, 0.0),
    DVec4::new(0.0, 0.0, 0.0, 1.0),
);

/// Build the view rotation matrix for a device rotation.
///
/// Composes the inverse device rotation with the fixed [`AXIS_SWAP`] basis
/// change, so that a world-space direction expressed in the rotated device
/// frame lands on the view axes.
pub fn view_rotation_matrix(rotation: &DQuat) -> DMat4 {
    AXIS_SWAP * DMat4::from_quat(rotation.inverse())
}

/// Build the full view matrix (translation then rotation) for a device.
pub fn view_matrix(device: &CaptureDevice) -> DMat4 {
    view_rotation_matrix(&device.rotation) * DMat4::from_translation(-device.position)
}

/// Reversed-Z perspective projection with an infinite far plane.
///
/// # Arguments
///
/// * `fov_degrees` - Full horizontal field of view in degrees.
/// * `aspect_ratio` - Width over height of the viewport.
///
/// The aspect ratio is constrained to the supplied value; clip z is the
/// constant [`NEAR_CLIP`] and clip w carries the view-space depth, so ndc z
/// is `near / depth` (1 at the near plane, 0 at infinity).
pub fn perspective_projection(fov_degrees: f64, aspect_ratio: f64) -> DMat4 {
    let tan_half_fov = (fov_degrees.max(0.001).to_radians() / 2.0).tan();
    let sx = 1.0 / tan_half_fov;
    let sy = aspect_ratio / tan_half_fov;
    DMat4::from_cols(
        DVec4::new(sx, 0.0, 0.0, 0.0),
        DVec4::new(0.0, sy, 0.0, 0.0),
        DVec4::new(0.0, 0.0, 0.0, 1.0),
        DVec4::new(0.0, 0.0, NEAR_CLIP, 0.0),
    )
}

/// Reversed-Z orthographic projection between [`NEAR_CLIP`] and [`FAR_CLIP`].
///
/// # Arguments
///
/// * `ortho_width` - Width of the frustum in cm; the height is derived from
///   the aspect ratio.
/// * `aspect_ratio` - Width over height of the viewport.
///
/// Ndc z maps the near plane to 1 and the far plane to 0, matching the ray
/// depths used by the inverse mapping.
pub fn orthographic_projection(ortho_width: f64, aspect_ratio: f64) -> DMat4 {
    let half_width = ortho_width / 2.0;
    let half_height = half_width / aspect_ratio;
    let z_scale = 1.0 / (FAR_CLIP - NEAR_CLIP);
    DMat4::from_cols(
        DVec4::new(1.0 / half_width, 0.0, 0.0, 0.0),
        DVec4::new(0.0, 1.0 / half_height, 0.0, 0.0),
        DVec4::new(0.0, 0.0, -z_scale, 0.0),
        DVec4::new(0.0, 0.0, FAR_CLIP * z_scale, 1.0),
    )
}

/// Projection matrix of a device.
///
/// An explicit custom projection takes precedence; otherwise the matrix is
/// derived from the device mode, field of view and target aspect ratio.
pub fn projection_matrix(device: &CaptureDevice) -> DMat4 {
    if let Some(custom) = device.custom_projection {
        return custom;
    }
    match device.projection_mode {
        ProjectionMode::Perspective => {
            perspective_projection(device.fov_degrees, device.aspect_ratio())
        }
        ProjectionMode::Orthographic => {
            orthographic_projection(device.ortho_width, device.aspect_ratio())
        }
    }
}

/// Inverse projection matrix of a device, for screen-to-world deprojection.
pub fn inverse_projection_matrix(device: &CaptureDevice) -> DMat4 {
    projection_matrix(device).inverse()
}

/// Combined view-projection matrix mapping world points to clip space.
pub fn view_projection_matrix(device: &CaptureDevice) -> DMat4 {
    projection_matrix(device) * view_matrix(device)
}

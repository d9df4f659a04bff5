use glam::DVec2;
use log::debug;
use scenecap_camera::{projection, screen, CaptureDevice};

use crate::bounds::Bounds2;
use crate::buffer::SceneBuffer;
use crate::error::CloudError;
use crate::pointcloud::PointCloud;

/// Reconstruct a colored point cloud from a region of a scene buffer.
///
/// Scans every pixel of `region` (closed interval on both axes, so an N by M
/// region yields `(N + 1) * (M + 1)` samples), deprojects it through the
/// inverse device projection and pairs it with the sRGB-encoded buffer
/// color.
///
/// In world mode (`camera_relative = false`) every scanned pixel emits the
/// deprojected near-plane point transformed by the device pose; the depth
/// channel is ignored. In camera-relative mode the auxiliary channel is read
/// as a linear depth `z` in cm and the point is emitted as
/// `[z, x3d, -y3d]` in forward-x, right-y, up-z device coordinates, but only
/// when `z > 1.0`; shallower depths mean background and are dropped. Colors
/// are recorded for every scanned pixel in both modes, so in camera-relative
/// mode the points sequence can be shorter than the colors sequence (see
/// [`PointCloud`]).
///
/// # Errors
///
/// Returns [`CloudError::RegionOutOfBounds`] when the region does not fit
/// the buffer; no partial result is produced.
pub fn deproject_region(
    device: &CaptureDevice,
    buffer: &SceneBuffer,
    region: &Bounds2,
    camera_relative: bool,
) -> Result<PointCloud, CloudError> {
    let size = buffer.size();
    let width = size.width as f64;
    let height = size.height as f64;

    if region.min.x < 0.0 || region.max.x > width || region.min.y < 0.0 || region.max.y > height
    {
        return Err(CloudError::RegionOutOfBounds {
            region: *region,
            size,
        });
    }
    if region.max.x < region.min.x || region.max.y < region.min.y {
        return Ok(PointCloud::default());
    }

    let x0 = region.min.x as usize;
    let y0 = region.min.y as usize;
    let x1 = region.max.x as usize;
    let y1 = region.max.y as usize;
    // a max edge sitting exactly on the image size would scan one past the
    // buffer under the closed-interval policy
    if x1 >= size.width || y1 >= size.height {
        return Err(CloudError::RegionOutOfBounds {
            region: *region,
            size,
        });
    }

    let inverse_projection = projection::inverse_projection_matrix(device);
    let (mid_point, _) = screen::deproject_screen_to_world(
        DVec2::new(width / 2.0, height / 2.0),
        size,
        &inverse_projection,
    );

    let pixel_count = (x1 - x0 + 1) * (y1 - y0 + 1);
    let mut points = Vec::with_capacity(pixel_count);
    let mut colors = Vec::with_capacity(pixel_count);

    for y in y0..=y1 {
        for x in x0..=x1 {
            colors.push(buffer.color_srgb(x, y));

            let (ray_point, _) = screen::deproject_screen_to_world(
                DVec2::new(x as f64, y as f64),
                size,
                &inverse_projection,
            );
            if camera_relative {
                let z = buffer.depth(x, y) as f64;
                let scale = z / ray_point.z;
                let x3d = (ray_point.x - mid_point.x) * scale;
                let y3d = -(ray_point.y - mid_point.y) * scale;
                if z > 1.0 {
                    points.push([z, x3d, -y3d]);
                }
            } else {
                let world = device.rotation * ray_point + device.position;
                points.push(world.to_array());
            }
        }
    }

    debug!(
        "deprojected {} pixels into {} points (camera_relative: {})",
        colors.len(),
        points.len(),
        camera_relative
    );

    Ok(PointCloud::new(points, colors))
}

use scenecap_camera::ImageSize;

use crate::error::CloudError;

/// A snapshot of a rendered scene as linear color samples.
///
/// Each sample carries linear RGB in the first three channels and a linear
/// depth in cm in the fourth, written there by the capture material in place
/// of alpha. Samples are stored row-major, `x + y * width`. Depth values at
/// or below 1.0 cm mean the pixel has no valid depth.
#[derive(Debug, Clone)]
pub struct SceneBuffer {
    size: ImageSize,
    data: Vec<[f32; 4]>,
}

impl SceneBuffer {
    /// Create a new scene buffer from per-pixel samples.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidBufferSize`] if the sample count does
    /// not match `width * height`.
    pub fn new(size: ImageSize, data: Vec<[f32; 4]>) -> Result<Self, CloudError> {
        if data.len() != size.width * size.height {
            return Err(CloudError::InvalidBufferSize(
                data.len(),
                size.width * size.height,
            ));
        }
        Ok(Self { size, data })
    }

    /// Create a buffer filled with a single sample value.
    pub fn from_sample(size: ImageSize, sample: [f32; 4]) -> Self {
        Self {
            data: vec![sample; size.width * size.height],
            size,
        }
    }

    /// The buffer dimensions in pixels.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the sample at a specific pixel.
    ///
    /// PRECONDITION: `x < width` and `y < height`.
    #[inline]
    pub fn sample(&self, x: usize, y: usize) -> [f32; 4] {
        self.data[x + y * self.size.width]
    }

    /// Get the depth channel at a specific pixel, in cm.
    #[inline]
    pub fn depth(&self, x: usize, y: usize) -> f32 {
        self.sample(x, y)[3]
    }

    /// Get the color at a specific pixel, sRGB-encoded to 8 bit.
    #[inline]
    pub fn color_srgb(&self, x: usize, y: usize) -> [u8; 3] {
        let s = self.sample(x, y);
        [
            linear_to_srgb(s[0]),
            linear_to_srgb(s[1]),
            linear_to_srgb(s[2]),
        ]
    }

    /// Mutable access to the raw samples, row-major.
    pub fn samples_mut(&mut self) -> &mut [[f32; 4]] {
        &mut self.data
    }
}

/// Encode a linear color channel to an 8-bit sRGB value.
///
/// Uses the piecewise sRGB transfer function and the engine's `* 255.999`
/// truncating quantization.
pub fn linear_to_srgb(value: f32) -> u8 {
    let v = value.clamp(0.0, 1.0);
    let v = if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    };
    (v.clamp(0.0, 1.0) * 255.999) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        let size = ImageSize {
            width: 4,
            height: 3,
        };
        assert!(SceneBuffer::new(size, vec![[0.0; 4]; 12]).is_ok());
        assert!(matches!(
            SceneBuffer::new(size, vec![[0.0; 4]; 11]),
            Err(CloudError::InvalidBufferSize(11, 12))
        ));
    }

    #[test]
    fn test_sample_indexing() {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let mut data = vec![[0.0; 4]; 6];
        data[1 + 1 * 3] = [0.25, 0.5, 0.75, 100.0];
        let buffer = SceneBuffer::new(size, data).unwrap();
        assert_eq!(buffer.depth(1, 1), 100.0);
        assert_eq!(buffer.sample(0, 0), [0.0; 4]);
    }

    #[test]
    fn test_linear_to_srgb_endpoints() {
        assert_eq!(linear_to_srgb(0.0), 0);
        assert_eq!(linear_to_srgb(1.0), 255);
        assert_eq!(linear_to_srgb(-1.0), 0);
        assert_eq!(linear_to_srgb(2.0), 255);
    }

    #[test]
    fn test_linear_to_srgb_monotone() {
        let mut last = 0u8;
        for i in 0..=100 {
            let v = linear_to_srgb(i as f32 / 100.0);
            assert!(v >= last);
            last = v;
        }
        // mid grey brightens under the transfer function
        assert_eq!(linear_to_srgb(0.5), 188);
    }
}

use scenecap_camera::ImageSize;

use crate::bounds::Bounds2;

/// An error type for the cloud module.
#[derive(thiserror::Error, Debug)]
pub enum CloudError {
    /// Error when the requested region does not fit the scene buffer.
    #[error("Region {region} is out of bounds for buffer {size}")]
    RegionOutOfBounds {
        /// The offending region.
        region: Bounds2,
        /// The buffer size the region was checked against.
        size: ImageSize,
    },

    /// Error when the buffer data length does not match its dimensions.
    #[error("Data length ({0}) does not match the buffer size ({1})")]
    InvalidBufferSize(usize, usize),
}

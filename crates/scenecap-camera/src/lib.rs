#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Capture device descriptor and image size types.
pub mod device;

/// Projection and view matrix construction.
pub mod projection;

/// Forward and inverse mappings between world space and pixel space.
pub mod screen;

pub use device::{CaptureDevice, ImageSize, ProjectionMode};

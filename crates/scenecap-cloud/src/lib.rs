#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Rendered color+depth scene buffers.
pub mod buffer;

/// Screen-space bounding regions of 3D volumes.
pub mod bounds;

/// Point cloud reconstruction from scene buffers.
pub mod deproject;

/// Error types for the cloud module.
pub mod error;

/// Point cloud container.
pub mod pointcloud;

pub use bounds::{project_bounds_to_screen, Bounds2, ProjectedBounds};
pub use buffer::SceneBuffer;
pub use deproject::deproject_region;
pub use error::CloudError;
pub use pointcloud::PointCloud;

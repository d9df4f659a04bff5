#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use scenecap_camera as camera;

#[doc(inline)]
pub use scenecap_cloud as cloud;

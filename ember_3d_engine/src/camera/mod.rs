//! Camera module — passive camera data.
//!
//! The engine does NOT manage cameras: the caller owns the camera and
//! hands it to the frame packer every frame.

mod camera;

pub use camera::Camera;

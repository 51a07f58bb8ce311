//! Per-frame uniform data
//!
//! The frame packer writes the global block (camera, lights) and one block
//! per entity into a single shared uniform buffer, once per frame.

mod frame_packer;

pub use frame_packer::{BlockRange, FrameLayout, FramePacker};

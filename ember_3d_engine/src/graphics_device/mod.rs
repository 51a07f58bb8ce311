/// Graphics device module - the boundary every GPU backend implements

// Module declarations
pub mod graphics_device;
pub mod buffer;
pub mod vertex_array;
pub mod program;
pub mod texture;
pub mod frame_buffer;
pub mod command_list;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer::*;
pub use vertex_array::*;
pub use program::*;
pub use texture::*;
pub use frame_buffer::*;
pub use command_list::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;

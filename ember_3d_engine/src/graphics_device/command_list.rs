/// CommandList trait - for recording rendering commands

use std::sync::Arc;
use bitflags::bitflags;
use crate::error::Result;
use crate::graphics_device::{Buffer, Framebuffer, Program, Texture, VertexArray};

/// Command list for recording rendering commands
///
/// Commands are recorded and later submitted via `GraphicsDevice::submit()`.
pub trait CommandList: Send + Sync {
    /// Begin recording commands
    fn begin(&mut self) -> Result<()>;

    /// End recording commands
    fn end(&mut self) -> Result<()>;

    /// Render into `framebuffer`, or into the default framebuffer when `None`
    fn bind_framebuffer(&mut self, framebuffer: Option<&Arc<dyn Framebuffer>>) -> Result<()>;

    /// Set the viewport
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Clear the bound framebuffer
    fn clear(&mut self, flags: ClearFlags, color: [f32; 4]) -> Result<()>;

    /// Make `program` current
    fn use_program(&mut self, program: &Arc<dyn Program>) -> Result<()>;

    /// Bind a vertex array (vertex buffer, index buffer, attributes)
    fn bind_vertex_array(&mut self, vertex_array: &Arc<dyn VertexArray>) -> Result<()>;

    /// Bind a texture to a sampler unit
    fn bind_texture(&mut self, unit: u32, texture: &Arc<dyn Texture>) -> Result<()>;

    /// Bind a byte range of a uniform buffer to a uniform block binding point
    ///
    /// # Arguments
    ///
    /// * `binding` - Uniform block binding point
    /// * `buffer` - Uniform buffer
    /// * `offset` - Start of the range; must be a multiple of the device's offset alignment
    /// * `size` - Length of the range in bytes
    fn bind_uniform_range(&mut self, binding: u32, buffer: &Arc<dyn Buffer>, offset: u32, size: u32) -> Result<()>;

    /// Draw indexed primitives from the bound vertex array
    ///
    /// # Arguments
    ///
    /// * `topology` - Primitive topology
    /// * `index_count` - Number of indices to draw
    /// * `index_byte_offset` - Byte offset of the first index in the index buffer
    fn draw_indexed(&mut self, topology: PrimitiveTopology, index_count: u32, index_byte_offset: u32) -> Result<()>;
}

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    TriangleList,
    LineList,
    PointList,
}

bitflags! {
    /// Framebuffer aspects to clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = 0b01;
        const DEPTH = 0b10;
    }
}

/// Viewport dimensions and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-surface viewport with the [0, 1] depth range
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// GraphicsDevice trait - factory for GPU objects and command submission

use std::sync::{Arc, Mutex, MutexGuard};
use crate::error::{Error, Result};
use crate::graphics_device::{
    Buffer, BufferDesc, VertexArray, VertexArrayDesc, Program, ProgramDesc,
    Texture, TextureDesc, Framebuffer, FramebufferDesc, CommandList,
};

/// Device limits, constant for the lifetime of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceLimits {
    /// Required alignment (bytes) of the offset passed to `bind_uniform_range`
    pub uniform_buffer_offset_alignment: u32,
    /// Largest uniform block the device can bind (bytes)
    pub max_uniform_block_size: u32,
}

/// Identification of the device, reported once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// GPU / driver name
    pub name: String,
    /// Graphics API version string
    pub api_version: String,
}

/// Main graphics device trait
///
/// Central factory interface for creating GPU objects and submitting commands.
/// Implemented by backend-specific devices. Every returned object is released
/// when its last `Arc` is dropped.
pub trait GraphicsDevice: Send + Sync {
    /// Device identification
    fn info(&self) -> DeviceInfo;

    /// Device limits
    fn limits(&self) -> DeviceLimits;

    /// Create a buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor
    /// * `data` - Initial contents (`desc.size` bytes), or `None` for a zero-filled buffer
    fn create_buffer(&mut self, desc: &BufferDesc, data: Option<&[u8]>) -> Result<Arc<dyn Buffer>>;

    /// Create a vertex array binding a vertex buffer, an index buffer and a set of attributes
    fn create_vertex_array(&mut self, desc: &VertexArrayDesc) -> Result<Arc<dyn VertexArray>>;

    /// Compile and link a program
    fn create_program(&mut self, desc: &ProgramDesc) -> Result<Arc<dyn Program>>;

    /// Create a texture, optionally with initial texel data
    fn create_texture(&mut self, desc: &TextureDesc, data: Option<&[u8]>) -> Result<Arc<dyn Texture>>;

    /// Create a framebuffer from texture attachments
    ///
    /// Completeness is not validated here: query `Framebuffer::status()`.
    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> Result<Arc<dyn Framebuffer>>;

    /// Create a command list for recording rendering commands
    fn create_command_list(&self) -> Result<Box<dyn CommandList>>;

    /// Submit recorded command lists for execution
    fn submit(&mut self, commands: &[&dyn CommandList]) -> Result<()>;
}

/// Shared handle to the graphics device
pub type SharedGraphicsDevice = Arc<Mutex<dyn GraphicsDevice>>;

/// Lock the shared device, mapping a poisoned lock to `Error::BackendError`
pub(crate) fn lock_device(device: &SharedGraphicsDevice) -> Result<MutexGuard<'_, dyn GraphicsDevice + 'static>> {
    device.lock().map_err(|_| {
        crate::engine_error!("ember3d::GraphicsDevice", "GraphicsDevice lock poisoned");
        Error::BackendError("GraphicsDevice lock poisoned".to_string())
    })
}

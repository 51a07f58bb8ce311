/// VertexArray trait - a vertex buffer, an index buffer and the enabled attributes

use std::sync::Arc;
use crate::graphics_device::Buffer;

/// One enabled vertex attribute: float components read from the vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttributeBinding {
    /// Shader input location
    pub location: u8,
    /// Number of f32 components (1..=4)
    pub component_count: u8,
    /// Distance in bytes between two vertices
    pub stride: u32,
    /// Byte offset of the first component from the start of the vertex buffer
    pub offset: u32,
}

/// Descriptor for creating a vertex array
pub struct VertexArrayDesc {
    /// Source of vertex data
    pub vertex_buffer: Arc<dyn Buffer>,
    /// Source of indices
    pub index_buffer: Arc<dyn Buffer>,
    /// Enabled attributes, one per shader input
    pub attributes: Vec<VertexAttributeBinding>,
}

/// Vertex array object
pub trait VertexArray: Send + Sync {
    /// Attributes enabled on this vertex array
    fn attributes(&self) -> &[VertexAttributeBinding];
}

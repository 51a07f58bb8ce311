/// Buffer trait and buffer descriptor

use crate::error::Result;

/// What a buffer is bound as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Uniform/constant buffer
    Uniform,
    /// Vertex buffer
    Vertex,
    /// Index buffer (u32 indices)
    Index,
}

/// How often the host rewrites the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsageHint {
    /// Uploaded once at creation
    Static,
    /// Rewritten every frame
    Stream,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u32,
    /// Binding kind
    pub kind: BufferKind,
    /// Update frequency
    pub usage: BufferUsageHint,
}

/// Host access requested when mapping a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapAccess {
    /// Write only, previous contents preserved
    Write,
    /// Write only, previous contents may be discarded
    WriteInvalidate,
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types.
/// The buffer is automatically destroyed when dropped.
pub trait Buffer: Send + Sync {
    /// Size in bytes
    fn size(&self) -> u32;

    /// Binding kind
    fn kind(&self) -> BufferKind;

    /// Map the buffer for host writes
    fn map(&self, access: MapAccess) -> Result<()>;

    /// Write into mapped memory
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset into the buffer in bytes
    /// * `data` - Data to write
    fn update(&self, offset: u32, data: &[u8]) -> Result<()>;

    /// Unmap the buffer, making host writes visible to the GPU
    fn unmap(&self) -> Result<()>;
}

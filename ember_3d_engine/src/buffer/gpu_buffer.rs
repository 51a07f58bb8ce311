/// Host-side view of a fixed-capacity GPU buffer
///
/// A GpuBuffer pairs the device handle with the linear write cursor (head)
/// used while the buffer is mapped. Buffers are created by `BufferManager`
/// and released when dropped.

use std::sync::Arc;
use crate::graphics_device::{Buffer, BufferKind, BufferUsageHint};

pub struct GpuBuffer {
    pub(crate) handle: Arc<dyn Buffer>,
    kind: BufferKind,
    usage: BufferUsageHint,
    capacity: u32,
    pub(crate) head: u32,
}

impl GpuBuffer {
    pub(crate) fn new(handle: Arc<dyn Buffer>, kind: BufferKind, usage: BufferUsageHint, capacity: u32, head: u32) -> Self {
        Self { handle, kind, usage, capacity, head }
    }

    /// Device buffer handle (bound by vertex arrays and uniform ranges)
    pub fn handle(&self) -> &Arc<dyn Buffer> {
        &self.handle
    }

    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    pub fn usage(&self) -> BufferUsageHint {
        self.usage
    }

    /// Capacity in bytes
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Bytes written during the last mapping (or the full size for static uploads)
    pub fn head(&self) -> u32 {
        self.head
    }
}

impl std::fmt::Debug for GpuBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuBuffer")
            .field("kind", &self.kind)
            .field("usage", &self.usage)
            .field("capacity", &self.capacity)
            .field("head", &self.head)
            .finish()
    }
}

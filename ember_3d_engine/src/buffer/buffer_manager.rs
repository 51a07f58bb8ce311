/// BufferManager - the single place GPU buffers are created, mapped and unmapped
///
/// Device limits are queried once at construction and stay constant for the
/// lifetime of the manager.

use crate::buffer::{GpuBuffer, MappedBuffer};
use crate::error::Result;
use crate::graphics_device::{
    lock_device, SharedGraphicsDevice, BufferDesc, BufferKind, BufferUsageHint,
    DeviceLimits, MapAccess,
};

pub struct BufferManager {
    device: SharedGraphicsDevice,
    limits: DeviceLimits,
}

impl BufferManager {
    pub fn new(device: SharedGraphicsDevice) -> Result<Self> {
        let limits = lock_device(&device)?.limits();
        if !Self::is_power_of_two(limits.uniform_buffer_offset_alignment) {
            crate::engine_bail!("ember3d::BufferManager",
                "Device reports a uniform offset alignment of {} bytes, expected a power of two",
                limits.uniform_buffer_offset_alignment);
        }
        crate::engine_debug!("ember3d::BufferManager",
            "Uniform offset alignment {} bytes, max uniform block {} bytes",
            limits.uniform_buffer_offset_alignment, limits.max_uniform_block_size);
        Ok(Self { device, limits })
    }

    /// Device limits captured at construction
    pub fn limits(&self) -> DeviceLimits {
        self.limits
    }

    /// Create a zero-filled buffer with its cursor at 0
    pub fn create_buffer(&self, capacity: u32, kind: BufferKind, usage: BufferUsageHint) -> Result<GpuBuffer> {
        if capacity == 0 {
            crate::engine_bail!("ember3d::BufferManager", "Cannot create an empty {:?} buffer", kind);
        }
        let desc = BufferDesc { size: capacity, kind, usage };
        let handle = lock_device(&self.device)?
            .create_buffer(&desc, None)
            .map_err(|e| {
                crate::engine_error!("ember3d::BufferManager",
                    "Failed to allocate {} byte {:?} buffer: {}", capacity, kind, e);
                e
            })?;

        crate::engine_trace!("ember3d::BufferManager", "Created {:?} buffer ({} bytes)", kind, capacity);
        Ok(GpuBuffer::new(handle, kind, usage, capacity, 0))
    }

    /// Create a buffer initialized with `data`; its cursor sits at the end of the data
    pub fn create_buffer_with_data(&self, data: &[u8], kind: BufferKind, usage: BufferUsageHint) -> Result<GpuBuffer> {
        if data.is_empty() {
            crate::engine_bail!("ember3d::BufferManager", "Cannot upload an empty {:?} buffer", kind);
        }
        let capacity = u32::try_from(data.len())
            .map_err(|_| crate::engine_err!("ember3d::BufferManager",
                "{} bytes do not fit in a GPU buffer", data.len()))?;
        let desc = BufferDesc { size: capacity, kind, usage };
        let handle = lock_device(&self.device)?
            .create_buffer(&desc, Some(data))
            .map_err(|e| {
                crate::engine_error!("ember3d::BufferManager",
                    "Failed to upload {} byte {:?} buffer: {}", capacity, kind, e);
                e
            })?;

        Ok(GpuBuffer::new(handle, kind, usage, capacity, capacity))
    }

    /// Per-frame uniform buffer
    pub fn create_uniform_buffer(&self, capacity: u32) -> Result<GpuBuffer> {
        self.create_buffer(capacity, BufferKind::Uniform, BufferUsageHint::Stream)
    }

    pub fn create_static_vertex_buffer(&self, vertices: &[f32]) -> Result<GpuBuffer> {
        self.create_buffer_with_data(bytemuck::cast_slice(vertices), BufferKind::Vertex, BufferUsageHint::Static)
    }

    pub fn create_static_index_buffer(&self, indices: &[u32]) -> Result<GpuBuffer> {
        self.create_buffer_with_data(bytemuck::cast_slice(indices), BufferKind::Index, BufferUsageHint::Static)
    }

    /// Map `buffer` for writing and rewind its cursor to 0
    ///
    /// The returned guard unmaps the buffer when dropped.
    pub fn map_buffer<'a>(&self, buffer: &'a mut GpuBuffer, access: MapAccess) -> Result<MappedBuffer<'a>> {
        buffer.handle.map(access).map_err(|e| {
            crate::engine_error!("ember3d::BufferManager", "Failed to map {:?} buffer: {}", buffer.kind(), e);
            e
        })?;
        Ok(MappedBuffer::new(buffer))
    }

    /// Unmap a buffer, returning the number of bytes written while mapped
    pub fn unmap_buffer(&self, mapped: MappedBuffer<'_>) -> Result<u32> {
        mapped.unmap().map_err(|e| {
            crate::engine_error!("ember3d::BufferManager", "Failed to unmap buffer: {}", e);
            e
        })
    }

    /// `true` for 1, 2, 4, 8, ...; `false` for 0
    pub fn is_power_of_two(value: u32) -> bool {
        value != 0 && (value & (value - 1)) == 0
    }

    /// Round `value` up to the next multiple of `alignment`
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is not a power of two.
    pub fn align(value: u32, alignment: u32) -> u32 {
        assert!(Self::is_power_of_two(alignment), "alignment {} is not a power of two", alignment);
        (value + alignment - 1) & !(alignment - 1)
    }
}

#[cfg(test)]
#[path = "buffer_manager_tests.rs"]
mod tests;

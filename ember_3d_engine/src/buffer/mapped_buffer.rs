/// Scoped write access to a mapped GPU buffer
///
/// A `MappedBuffer` is obtained from `BufferManager::map_buffer()` and is
/// the only way to write into a buffer. It borrows the `GpuBuffer`
/// mutably, so a buffer cannot be mapped twice, and it unmaps the device
/// buffer when dropped if `unmap()` was not called.
///
/// Writes are append-only: each write first aligns the cursor, then copies
/// its bytes and advances the cursor past them.

use glam::{Mat3, Mat4, Vec3, Vec4};
use crate::buffer::{BufferManager, GpuBuffer};
use crate::error::{Error, Result};

/// Alignment of every typed write (size of a vec4)
pub const VEC4_ALIGNMENT: u32 = 16;

pub struct MappedBuffer<'a> {
    buffer: &'a mut GpuBuffer,
    mapped: bool,
}

impl<'a> MappedBuffer<'a> {
    /// Wrap an already mapped buffer and rewind its cursor
    pub(crate) fn new(buffer: &'a mut GpuBuffer) -> Self {
        buffer.head = 0;
        Self { buffer, mapped: true }
    }

    /// Current cursor position in bytes
    pub fn head(&self) -> u32 {
        self.buffer.head
    }

    pub fn capacity(&self) -> u32 {
        self.buffer.capacity()
    }

    /// Advance the cursor to the next multiple of `alignment`
    ///
    /// The cursor may move past the capacity; the next write then fails.
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is not a power of two.
    pub fn align(&mut self, alignment: u32) {
        self.buffer.head = BufferManager::align(self.buffer.head, alignment);
    }

    /// Align the cursor then append `data`
    ///
    /// Returns the offset the data was written at. When the write would
    /// overflow the buffer, returns `Error::CapacityExceeded` and leaves both
    /// the cursor and the buffer contents untouched.
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is not a power of two.
    pub fn write_aligned(&mut self, data: &[u8], alignment: u32) -> Result<u32> {
        let offset = BufferManager::align(self.buffer.head, alignment);
        let size = checked_write_size(data.len(), offset, self.buffer.capacity())?;

        self.buffer.handle.update(offset, data)?;
        self.buffer.head = offset + size;
        Ok(offset)
    }

    /// Append raw bytes with no alignment
    pub fn push_bytes(&mut self, data: &[u8]) -> Result<u32> {
        self.write_aligned(data, 1)
    }

    pub fn push_u32(&mut self, value: u32) -> Result<u32> {
        self.write_aligned(bytemuck::bytes_of(&value), VEC4_ALIGNMENT)
    }

    /// 12 bytes at a 16-byte boundary
    pub fn push_vec3(&mut self, value: Vec3) -> Result<u32> {
        self.write_aligned(bytemuck::bytes_of(&value), VEC4_ALIGNMENT)
    }

    pub fn push_vec4(&mut self, value: Vec4) -> Result<u32> {
        self.write_aligned(bytemuck::bytes_of(&value), VEC4_ALIGNMENT)
    }

    /// Three packed columns (36 bytes) at a 16-byte boundary
    pub fn push_mat3(&mut self, value: Mat3) -> Result<u32> {
        self.write_aligned(bytemuck::bytes_of(&value), VEC4_ALIGNMENT)
    }

    /// Column-major, 64 bytes
    pub fn push_mat4(&mut self, value: Mat4) -> Result<u32> {
        self.write_aligned(bytemuck::bytes_of(&value), VEC4_ALIGNMENT)
    }

    /// Unmap the buffer, returning the number of bytes covered by the cursor
    pub fn unmap(mut self) -> Result<u32> {
        self.mapped = false;
        self.buffer.handle.unmap()?;
        Ok(self.buffer.head)
    }
}

/// Size of a write of `len` bytes at `offset`, or `CapacityExceeded`
///
/// Lengths beyond `u32::MAX` are reported with a size of `u32::MAX`.
fn checked_write_size(len: usize, offset: u32, capacity: u32) -> Result<u32> {
    let size = u32::try_from(len).unwrap_or(u32::MAX);
    if len > size as usize || offset as u64 + size as u64 > capacity as u64 {
        crate::engine_error!("ember3d::MappedBuffer",
            "Write of {} bytes at offset {} overflows a {} byte buffer", len, offset, capacity);
        return Err(Error::CapacityExceeded { offset, size, capacity });
    }
    Ok(size)
}

impl Drop for MappedBuffer<'_> {
    fn drop(&mut self) {
        if self.mapped {
            if let Err(e) = self.buffer.handle.unmap() {
                crate::engine_error!("ember3d::MappedBuffer", "Unmap on drop failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
#[path = "mapped_buffer_tests.rs"]
mod tests;

/// FramePacker - owns the shared uniform buffer and fills it every frame
///
/// Buffer layout (std140):
///
/// ```text
/// offset 0     global block
///              vec3  camera position
///              uint  light count
///              per light (16-byte aligned):
///                  uint  type tag
///                  vec3  color
///                  vec3  direction
///                  vec3  position
///              padded to 16 bytes: 32 + 64 * lights
/// aligned      entity block, one per entity, each starting at a multiple of
///              the device's uniform offset alignment
///                  mat4  world
///                  mat4  projection * view * world
/// ```

use crate::buffer::{BufferManager, GpuBuffer};
use crate::camera::Camera;
use crate::error::Result;
use crate::graphics_device::MapAccess;
use crate::scene::{Entity, Light};

/// Byte range of one uniform block inside the shared uniform buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BlockRange {
    pub offset: u32,
    pub size: u32,
}

impl BlockRange {
    /// First byte past the block
    pub fn end(&self) -> u32 {
        self.offset + self.size
    }
}

/// Where everything landed in the uniform buffer for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameLayout {
    pub global: BlockRange,
    /// One range per entity, in entity order
    pub entities: Vec<BlockRange>,
    /// Bytes covered by the cursor when the buffer was unmapped
    pub used_bytes: u32,
}

pub struct FramePacker {
    uniform_buffer: GpuBuffer,
}

impl FramePacker {
    /// Allocate the shared uniform buffer (`capacity` bytes)
    pub fn new(buffers: &BufferManager, capacity: u32) -> Result<Self> {
        let uniform_buffer = buffers.create_uniform_buffer(capacity)?;
        crate::engine_debug!("ember3d::FramePacker", "Uniform buffer: {} bytes", capacity);
        Ok(Self { uniform_buffer })
    }

    pub fn uniform_buffer(&self) -> &GpuBuffer {
        &self.uniform_buffer
    }

    /// Write the global block and every entity block for this frame
    ///
    /// Each entity's range is also stored in the entity. On error the buffer
    /// is unmapped and no entity is modified.
    pub fn pack(
        &mut self,
        buffers: &BufferManager,
        entities: &mut [Entity],
        lights: &[Light],
        camera: &Camera,
    ) -> Result<FrameLayout> {
        let offset_alignment = buffers.limits().uniform_buffer_offset_alignment;
        let light_count = u32::try_from(lights.len())
            .map_err(|_| crate::engine_err!("ember3d::FramePacker", "Too many lights: {}", lights.len()))?;
        let view_projection = camera.view_projection_matrix();

        let mut mapped = buffers.map_buffer(&mut self.uniform_buffer, MapAccess::WriteInvalidate)?;

        let global_start = mapped.head();
        mapped.push_vec3(camera.position())?;
        mapped.push_u32(light_count)?;
        for light in lights {
            mapped.align(16);
            mapped.push_u32(light.light_type.type_tag())?;
            mapped.push_vec3(light.color)?;
            mapped.push_vec3(light.direction)?;
            mapped.push_vec3(light.position)?;
        }
        mapped.align(16);
        let global = BlockRange {
            offset: global_start,
            size: mapped.head() - global_start,
        };

        let mut blocks = Vec::with_capacity(entities.len());
        for entity in entities.iter() {
            mapped.align(offset_alignment);
            let start = mapped.head();
            let world = *entity.world_transform();
            mapped.push_mat4(world)?;
            mapped.push_mat4(view_projection * world)?;
            blocks.push(BlockRange { offset: start, size: mapped.head() - start });
        }

        let used_bytes = buffers.unmap_buffer(mapped)?;

        for (entity, block) in entities.iter_mut().zip(&blocks) {
            entity.set_block(*block);
        }

        crate::engine_trace!("ember3d::FramePacker",
            "Packed {} lights and {} entities into {} bytes", lights.len(), blocks.len(), used_bytes);

        Ok(FrameLayout { global, entities: blocks, used_bytes })
    }
}

#[cfg(test)]
#[path = "frame_packer_tests.rs"]
mod tests;

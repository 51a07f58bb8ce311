//! Geometry cache: lazily built vertex arrays per (submesh, program).
//!
//! A program reads a set of vertex input locations; a submesh stores a set of
//! interleaved attributes. The first time a submesh is drawn with a program,
//! the cache matches every program input to the submesh attribute with the
//! same location and asks the device for a vertex array enabling exactly
//! those attributes. The result is stored in the submesh and reused on every
//! later draw with the same program.
//!
//! Layouts hold fewer than ten entries, so matching and lookup are linear scans.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::graphics_device::{
    lock_device, SharedGraphicsDevice, VertexArray, VertexArrayDesc, VertexAttributeBinding,
};
use crate::resource::{GeometryBinding, Mesh, Program};

/// Hit / miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryCacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub struct GeometryCache {
    device: SharedGraphicsDevice,
    stats: GeometryCacheStats,
}

impl GeometryCache {
    pub fn new(device: SharedGraphicsDevice) -> Self {
        Self {
            device,
            stats: GeometryCacheStats::default(),
        }
    }

    /// Vertex array binding `mesh.submeshes[submesh_index]` to `program`
    ///
    /// Built and cached in the submesh on first use. Fails with
    /// `Error::MissingVertexAttribute` when the program reads a location the
    /// submesh does not provide; nothing is cached in that case.
    pub fn resolve(&mut self, mesh: &mut Mesh, submesh_index: usize, program: &Program) -> Result<Arc<dyn VertexArray>> {
        let mesh_name = mesh.name().to_string();
        let Some((vertex_buffer, index_buffer, submesh)) = mesh.buffers_and_submesh_mut(submesh_index) else {
            crate::engine_bail!("ember3d::GeometryCache",
                "Mesh '{}' has no submesh {}", mesh_name, submesh_index);
        };

        if let Some(binding) = submesh.bindings.iter().find(|b| b.program == program.id()) {
            self.stats.hits += 1;
            return Ok(binding.vertex_array.clone());
        }
        self.stats.misses += 1;

        let layout = submesh.layout();
        let mut attributes = Vec::with_capacity(program.layout().inputs.len());
        for input in &program.layout().inputs {
            let Some(attribute) = layout.attribute(input.location) else {
                crate::engine_error!("ember3d::GeometryCache",
                    "Program '{}' reads location {} but submesh {} of '{}' does not provide it",
                    program.name(), input.location, submesh_index, mesh_name);
                return Err(Error::MissingVertexAttribute {
                    program: program.name().to_string(),
                    submesh: submesh_index,
                    location: input.location,
                });
            };
            attributes.push(VertexAttributeBinding {
                location: attribute.location,
                component_count: attribute.component_count,
                stride: layout.stride,
                offset: submesh.vertex_offset() + attribute.offset,
            });
        }

        let desc = VertexArrayDesc {
            vertex_buffer: vertex_buffer.handle().clone(),
            index_buffer: index_buffer.handle().clone(),
            attributes,
        };
        let vertex_array = lock_device(&self.device)?.create_vertex_array(&desc)?;

        submesh.bindings.push(GeometryBinding {
            vertex_array: vertex_array.clone(),
            program: program.id(),
        });

        crate::engine_debug!("ember3d::GeometryCache",
            "Built vertex array for '{}' submesh {} with program '{}' ({} attributes)",
            mesh_name, submesh_index, program.name(), desc.attributes.len());

        Ok(vertex_array)
    }

    pub fn stats(&self) -> GeometryCacheStats {
        self.stats
    }
}

#[cfg(test)]
#[path = "geometry_cache_tests.rs"]
mod tests;

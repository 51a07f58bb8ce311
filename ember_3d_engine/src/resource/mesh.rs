//! Resource-level mesh types.
//!
//! A `Mesh` owns one vertex buffer and one index buffer shared by all its
//! submeshes. Each submesh occupies a contiguous byte range of both buffers
//! and keeps its own interleaved vertex layout.
//!
//! # Hierarchy
//!
//! ```text
//! Mesh "dice"
//! ├── vertex_buffer (shared, static)
//! ├── index_buffer (shared, static)
//! └── submeshes
//!     ├── [0] layout {pos, normal, uv}, vertex_offset 0,    index_offset 0
//!     │   └── bindings: (program id → vertex array), built on first draw
//!     └── [1] layout {pos, uv},         vertex_offset 1152, index_offset 144
//! ```
//!
//! Indices are local to their submesh: the submesh's vertex offset is folded
//! into the vertex array attribute offsets.

use std::sync::Arc;
use slotmap::new_key_type;
use crate::buffer::{BufferManager, GpuBuffer};
use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::VertexArray;
use crate::resource::{ProgramId, VertexBufferLayout};

new_key_type! {
    /// Stable key of a mesh stored in the ResourceManager
    pub struct MeshKey;
}

// ============================================================================
// GEOMETRY BINDING
// ============================================================================

/// A vertex array built for one (submesh, program) pair
#[derive(Clone)]
pub struct GeometryBinding {
    pub vertex_array: Arc<dyn VertexArray>,
    pub program: ProgramId,
}

// ============================================================================
// SUBMESH
// ============================================================================

pub struct Submesh {
    layout: VertexBufferLayout,
    vertices: Vec<f32>,
    indices: Vec<u32>,
    /// Byte offset of the first vertex in the mesh vertex buffer
    vertex_offset: u32,
    /// Byte offset of the first index in the mesh index buffer
    index_offset: u32,
    pub(crate) bindings: Vec<GeometryBinding>,
}

impl Submesh {
    pub fn layout(&self) -> &VertexBufferLayout {
        &self.layout
    }

    /// CPU copy of the interleaved vertex data
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// CPU copy of the indices (local to this submesh)
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_offset(&self) -> u32 {
        self.vertex_offset
    }

    pub fn index_offset(&self) -> u32 {
        self.index_offset
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32 / self.layout.floats_per_vertex()
    }

    /// Vertex arrays built so far, one per program
    pub fn bindings(&self) -> &[GeometryBinding] {
        &self.bindings
    }
}

// ============================================================================
// MESH
// ============================================================================

pub struct Mesh {
    name: String,
    vertex_buffer: GpuBuffer,
    index_buffer: GpuBuffer,
    submeshes: Vec<Submesh>,
}

impl Mesh {
    /// Pack every submesh of `desc` into one vertex and one index buffer
    pub fn from_desc(buffers: &BufferManager, desc: MeshDesc) -> Result<Self> {
        if desc.submeshes.is_empty() {
            engine_bail!("ember3d::Mesh", "Mesh '{}' has no submeshes", desc.name);
        }

        let mut all_vertices: Vec<f32> = Vec::new();
        let mut all_indices: Vec<u32> = Vec::new();
        let mut submeshes = Vec::with_capacity(desc.submeshes.len());

        for (i, sub) in desc.submeshes.into_iter().enumerate() {
            sub.layout.validate()?;

            let floats_per_vertex = sub.layout.floats_per_vertex() as usize;
            if sub.vertices.is_empty() || sub.vertices.len() % floats_per_vertex != 0 {
                engine_bail!("ember3d::Mesh",
                    "Submesh {} of '{}': {} floats is not a whole number of {} float vertices",
                    i, desc.name, sub.vertices.len(), floats_per_vertex);
            }
            if sub.indices.is_empty() {
                engine_bail!("ember3d::Mesh", "Submesh {} of '{}' has no indices", i, desc.name);
            }
            let vertex_count = (sub.vertices.len() / floats_per_vertex) as u32;
            if let Some(bad) = sub.indices.iter().find(|&&index| index >= vertex_count) {
                engine_bail!("ember3d::Mesh",
                    "Submesh {} of '{}': index {} out of range ({} vertices)",
                    i, desc.name, bad, vertex_count);
            }

            let vertex_offset = (all_vertices.len() * 4) as u32;
            let index_offset = (all_indices.len() * 4) as u32;
            all_vertices.extend_from_slice(&sub.vertices);
            all_indices.extend_from_slice(&sub.indices);

            submeshes.push(Submesh {
                layout: sub.layout,
                vertices: sub.vertices,
                indices: sub.indices,
                vertex_offset,
                index_offset,
                bindings: Vec::new(),
            });
        }

        let vertex_buffer = buffers.create_static_vertex_buffer(&all_vertices)?;
        let index_buffer = buffers.create_static_index_buffer(&all_indices)?;

        crate::engine_debug!("ember3d::Mesh", "Mesh '{}': {} submeshes, {} vertex bytes, {} index bytes",
            desc.name, submeshes.len(), vertex_buffer.capacity(), index_buffer.capacity());

        Ok(Self {
            name: desc.name,
            vertex_buffer,
            index_buffer,
            submeshes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_buffer(&self) -> &GpuBuffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &GpuBuffer {
        &self.index_buffer
    }

    pub fn submeshes(&self) -> &[Submesh] {
        &self.submeshes
    }

    pub fn submesh(&self, index: usize) -> Option<&Submesh> {
        self.submeshes.get(index)
    }

    pub fn submesh_count(&self) -> usize {
        self.submeshes.len()
    }

    /// Split borrow: the shared buffers together with one mutable submesh
    pub(crate) fn buffers_and_submesh_mut(&mut self, index: usize) -> Option<(&GpuBuffer, &GpuBuffer, &mut Submesh)> {
        let submesh = self.submeshes.get_mut(index)?;
        Some((&self.vertex_buffer, &self.index_buffer, submesh))
    }
}

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// Submesh as produced by the importer
#[derive(Debug, Clone)]
pub struct SubmeshDesc {
    pub layout: VertexBufferLayout,
    /// Interleaved vertex data
    pub vertices: Vec<f32>,
    /// Indices local to this submesh
    pub indices: Vec<u32>,
}

/// Mesh as produced by the importer
#[derive(Debug, Clone)]
pub struct MeshDesc {
    pub name: String,
    pub submeshes: Vec<SubmeshDesc>,
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;

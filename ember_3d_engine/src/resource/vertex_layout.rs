//! Vertex layouts on both sides of a draw.
//!
//! - **VertexBufferLayout**: what a submesh stores per vertex (attribute
//!   locations, float component counts and byte offsets, plus the stride)
//! - **ShaderLayout**: what a program reads per vertex (input locations and
//!   component counts), derived once when the program is loaded
//!
//! The geometry cache matches the two by location.

use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::ProgramInput;

// ============================================================================
// VERTEX BUFFER LAYOUT
// ============================================================================

/// One attribute inside an interleaved vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBufferAttribute {
    /// Shader input location this attribute feeds
    pub location: u8,
    /// Number of f32 components (1..=4)
    pub component_count: u8,
    /// Byte offset inside the vertex
    pub offset: u32,
}

/// Interleaved vertex layout of a submesh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexBufferLayout {
    pub attributes: Vec<VertexBufferAttribute>,
    /// Size of one vertex in bytes
    pub stride: u32,
}

impl VertexBufferLayout {
    /// Build a tightly packed layout from `(location, component_count)` pairs
    pub fn packed(components: &[(u8, u8)]) -> Self {
        let mut attributes = Vec::with_capacity(components.len());
        let mut offset = 0;
        for &(location, component_count) in components {
            attributes.push(VertexBufferAttribute { location, component_count, offset });
            offset += component_count as u32 * 4;
        }
        Self { attributes, stride: offset }
    }

    /// Attribute bound to `location` (linear scan, layouts hold a handful of attributes)
    pub fn attribute(&self, location: u8) -> Option<&VertexBufferAttribute> {
        self.attributes.iter().find(|attr| attr.location == location)
    }

    /// Number of f32 values per vertex
    pub fn floats_per_vertex(&self) -> u32 {
        self.stride / 4
    }

    /// Check that every attribute fits inside the stride and that locations are unique
    pub fn validate(&self) -> Result<()> {
        if self.attributes.is_empty() {
            engine_bail!("ember3d::VertexBufferLayout", "Vertex layout has no attributes");
        }
        if self.stride == 0 || self.stride % 4 != 0 {
            engine_bail!("ember3d::VertexBufferLayout",
                "Vertex stride {} is not a non-zero multiple of 4", self.stride);
        }
        for (i, attr) in self.attributes.iter().enumerate() {
            if attr.component_count == 0 || attr.component_count > 4 {
                engine_bail!("ember3d::VertexBufferLayout",
                    "Attribute at location {} has {} components (expected 1..=4)",
                    attr.location, attr.component_count);
            }
            if attr.offset + attr.component_count as u32 * 4 > self.stride {
                engine_bail!("ember3d::VertexBufferLayout",
                    "Attribute at location {} (offset {}) overflows the {} byte stride",
                    attr.location, attr.offset, self.stride);
            }
            if self.attributes[..i].iter().any(|other| other.location == attr.location) {
                engine_bail!("ember3d::VertexBufferLayout",
                    "Location {} is used by more than one attribute", attr.location);
            }
        }
        Ok(())
    }
}

// ============================================================================
// SHADER LAYOUT
// ============================================================================

/// One vertex input read by a program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderInput {
    pub location: u8,
    pub component_count: u8,
}

/// Vertex inputs of a program, in location order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderLayout {
    pub inputs: Vec<ShaderInput>,
}

impl ShaderLayout {
    /// Build a layout from the active inputs reported by the device
    pub fn from_active_inputs(active: &[ProgramInput]) -> Self {
        let mut inputs: Vec<ShaderInput> = active
            .iter()
            .map(|input| ShaderInput {
                location: input.location,
                component_count: input.component_count,
            })
            .collect();
        inputs.sort_by_key(|input| input.location);
        Self { inputs }
    }
}

#[cfg(test)]
#[path = "vertex_layout_tests.rs"]
mod tests;

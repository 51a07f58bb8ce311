//! Resource-level material and model.
//!
//! A `Material` holds the flat surface parameters produced by the model
//! importer plus optional texture references. A `Model` pairs a mesh with
//! one material per submesh.

use glam::Vec3;
use slotmap::new_key_type;
use crate::resource::{MeshKey, TextureKey};

new_key_type! {
    /// Stable key of a material stored in the ResourceManager
    pub struct MaterialKey;
    /// Stable key of a model stored in the ResourceManager
    pub struct ModelKey;
}

// ============================================================================
// MATERIAL
// ============================================================================

/// Descriptor for a material (as produced by the importer)
#[derive(Debug, Clone)]
pub struct MaterialDesc {
    pub name: String,
    pub albedo: Vec3,
    pub emissive: Vec3,
    pub smoothness: f32,
    pub albedo_texture: Option<TextureKey>,
    pub emissive_texture: Option<TextureKey>,
    pub specular_texture: Option<TextureKey>,
    pub normals_texture: Option<TextureKey>,
    pub bump_texture: Option<TextureKey>,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            name: String::new(),
            albedo: Vec3::ONE,
            emissive: Vec3::ZERO,
            smoothness: 0.0,
            albedo_texture: None,
            emissive_texture: None,
            specular_texture: None,
            normals_texture: None,
            bump_texture: None,
        }
    }
}

impl MaterialDesc {
    /// Every texture referenced by the descriptor
    pub fn textures(&self) -> impl Iterator<Item = TextureKey> + '_ {
        [
            self.albedo_texture,
            self.emissive_texture,
            self.specular_texture,
            self.normals_texture,
            self.bump_texture,
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Debug, Clone)]
pub struct Material {
    name: String,
    albedo: Vec3,
    emissive: Vec3,
    smoothness: f32,
    albedo_texture: Option<TextureKey>,
    emissive_texture: Option<TextureKey>,
    specular_texture: Option<TextureKey>,
    normals_texture: Option<TextureKey>,
    bump_texture: Option<TextureKey>,
}

impl Material {
    pub(crate) fn from_desc(desc: MaterialDesc) -> Self {
        Self {
            name: desc.name,
            albedo: desc.albedo,
            emissive: desc.emissive,
            smoothness: desc.smoothness.clamp(0.0, 1.0),
            albedo_texture: desc.albedo_texture,
            emissive_texture: desc.emissive_texture,
            specular_texture: desc.specular_texture,
            normals_texture: desc.normals_texture,
            bump_texture: desc.bump_texture,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn albedo(&self) -> Vec3 {
        self.albedo
    }

    pub fn emissive(&self) -> Vec3 {
        self.emissive
    }

    /// Smoothness, clamped to [0, 1]
    pub fn smoothness(&self) -> f32 {
        self.smoothness
    }

    pub fn albedo_texture(&self) -> Option<TextureKey> {
        self.albedo_texture
    }

    pub fn emissive_texture(&self) -> Option<TextureKey> {
        self.emissive_texture
    }

    pub fn specular_texture(&self) -> Option<TextureKey> {
        self.specular_texture
    }

    pub fn normals_texture(&self) -> Option<TextureKey> {
        self.normals_texture
    }

    pub fn bump_texture(&self) -> Option<TextureKey> {
        self.bump_texture
    }
}

// ============================================================================
// MODEL
// ============================================================================

/// A mesh with one material per submesh
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    mesh: MeshKey,
    materials: Vec<MaterialKey>,
}

impl Model {
    pub(crate) fn new(name: String, mesh: MeshKey, materials: Vec<MaterialKey>) -> Self {
        Self { name, mesh, materials }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> MeshKey {
        self.mesh
    }

    /// Materials, indexed like the mesh's submeshes
    pub fn materials(&self) -> &[MaterialKey] {
        &self.materials
    }

    pub fn material(&self, submesh_index: usize) -> Option<MaterialKey> {
        self.materials.get(submesh_index).copied()
    }
}

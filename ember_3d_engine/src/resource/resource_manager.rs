/// Central resource manager for the engine.
///
/// Owns every loaded asset (programs, textures, materials, meshes, models)
/// in slot maps with stable keys, plus a name index per asset kind.
/// Names are unique per kind.

use slotmap::SlotMap;
use rustc_hash::FxHashMap;
use crate::buffer::BufferManager;
use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::{ProgramDesc, SharedGraphicsDevice, TextureDesc};
use crate::resource::{
    Material, MaterialDesc, MaterialKey, Mesh, MeshDesc, MeshKey, Model, ModelKey,
    Program, ProgramKey, SubmeshDesc, Texture, TextureKey, VertexBufferLayout,
};

/// Fallback textures bound when a material has no texture of its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultTextures {
    pub white: TextureKey,
    pub black: TextureKey,
    /// Flat tangent-space normal (0.5, 0.5, 1.0)
    pub normal: TextureKey,
    /// Marks missing assets
    pub magenta: TextureKey,
}

impl DefaultTextures {
    pub fn keys(&self) -> [TextureKey; 4] {
        [self.white, self.black, self.normal, self.magenta]
    }
}

pub struct ResourceManager {
    programs: SlotMap<ProgramKey, Program>,
    program_names: FxHashMap<String, ProgramKey>,
    textures: SlotMap<TextureKey, Texture>,
    texture_names: FxHashMap<String, TextureKey>,
    materials: SlotMap<MaterialKey, Material>,
    material_names: FxHashMap<String, MaterialKey>,
    meshes: SlotMap<MeshKey, Mesh>,
    mesh_names: FxHashMap<String, MeshKey>,
    models: SlotMap<ModelKey, Model>,
    model_names: FxHashMap<String, ModelKey>,

    default_textures: Option<DefaultTextures>,
    screen_quad: Option<MeshKey>,
}

impl ResourceManager {
    /// Create a new empty resource manager
    pub fn new() -> Self {
        Self {
            programs: SlotMap::with_key(),
            program_names: FxHashMap::default(),
            textures: SlotMap::with_key(),
            texture_names: FxHashMap::default(),
            materials: SlotMap::with_key(),
            material_names: FxHashMap::default(),
            meshes: SlotMap::with_key(),
            mesh_names: FxHashMap::default(),
            models: SlotMap::with_key(),
            model_names: FxHashMap::default(),
            default_textures: None,
            screen_quad: None,
        }
    }

    // ===== PROGRAMS =====

    /// Compile a program and read back its vertex input layout
    pub fn load_program(&mut self, device: &SharedGraphicsDevice, desc: ProgramDesc) -> Result<ProgramKey> {
        if self.program_names.contains_key(&desc.name) {
            engine_bail!("ember3d::ResourceManager", "Program '{}' already exists", desc.name);
        }
        let program = Program::load(device, &desc)?;
        let key = self.programs.insert(program);
        self.program_names.insert(desc.name, key);
        Ok(key)
    }

    pub fn program(&self, key: ProgramKey) -> Option<&Program> {
        self.programs.get(key)
    }

    pub fn program_by_name(&self, name: &str) -> Option<ProgramKey> {
        self.program_names.get(name).copied()
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    // ===== TEXTURES =====

    /// Create a texture from decoded texel data
    pub fn add_texture(&mut self, device: &SharedGraphicsDevice, desc: TextureDesc, data: Option<&[u8]>) -> Result<TextureKey> {
        if self.texture_names.contains_key(&desc.name) {
            engine_bail!("ember3d::ResourceManager", "Texture '{}' already exists", desc.name);
        }
        let texture = Texture::create(device, &desc, data)?;
        Ok(self.insert_texture(texture))
    }

    fn insert_texture(&mut self, texture: Texture) -> TextureKey {
        let name = texture.name().to_string();
        let key = self.textures.insert(texture);
        self.texture_names.insert(name, key);
        key
    }

    pub fn texture(&self, key: TextureKey) -> Option<&Texture> {
        self.textures.get(key)
    }

    pub fn texture_by_name(&self, name: &str) -> Option<TextureKey> {
        self.texture_names.get(name).copied()
    }

    /// Remove a texture. Returns false if the key is unknown.
    ///
    /// Removing one of the default textures drops the whole default set;
    /// the next `create_default_textures` call builds a fresh one.
    pub fn remove_texture(&mut self, key: TextureKey) -> bool {
        if !self.take_texture(key) {
            return false;
        }
        if let Some(defaults) = self.default_textures {
            if defaults.keys().contains(&key) {
                for other in defaults.keys() {
                    self.take_texture(other);
                }
                self.default_textures = None;
            }
        }
        true
    }

    fn take_texture(&mut self, key: TextureKey) -> bool {
        match self.textures.remove(key) {
            Some(texture) => {
                self.texture_names.remove(texture.name());
                true
            }
            None => false,
        }
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Create the white, black, flat normal and magenta 1x1 textures
    ///
    /// Created once; later calls return the same keys.
    pub fn create_default_textures(&mut self, device: &SharedGraphicsDevice) -> Result<DefaultTextures> {
        if let Some(defaults) = self.default_textures {
            return Ok(defaults);
        }
        let defaults = DefaultTextures {
            white: self.insert_texture(Texture::solid(device, "__default_white", [255, 255, 255, 255])?),
            black: self.insert_texture(Texture::solid(device, "__default_black", [0, 0, 0, 255])?),
            normal: self.insert_texture(Texture::solid(device, "__default_normal", [128, 128, 255, 255])?),
            magenta: self.insert_texture(Texture::solid(device, "__default_magenta", [255, 0, 255, 255])?),
        };
        self.default_textures = Some(defaults);
        Ok(defaults)
    }

    pub fn default_textures(&self) -> Option<DefaultTextures> {
        self.default_textures
    }

    // ===== MATERIALS =====

    /// Register a material; every referenced texture must exist
    pub fn add_material(&mut self, desc: MaterialDesc) -> Result<MaterialKey> {
        if self.material_names.contains_key(&desc.name) {
            engine_bail!("ember3d::ResourceManager", "Material '{}' already exists", desc.name);
        }
        if desc.textures().any(|key| !self.textures.contains_key(key)) {
            engine_bail!("ember3d::ResourceManager", "Material '{}' references an unknown texture", desc.name);
        }
        let name = desc.name.clone();
        let key = self.materials.insert(Material::from_desc(desc));
        self.material_names.insert(name, key);
        Ok(key)
    }

    pub fn material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    pub fn material_by_name(&self, name: &str) -> Option<MaterialKey> {
        self.material_names.get(name).copied()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    // ===== MESHES =====

    /// Upload a mesh (all submeshes packed into shared buffers)
    pub fn add_mesh(&mut self, buffers: &BufferManager, desc: MeshDesc) -> Result<MeshKey> {
        if self.mesh_names.contains_key(&desc.name) {
            engine_bail!("ember3d::ResourceManager", "Mesh '{}' already exists", desc.name);
        }
        let name = desc.name.clone();
        let mesh = Mesh::from_desc(buffers, desc)?;
        let key = self.meshes.insert(mesh);
        self.mesh_names.insert(name, key);
        Ok(key)
    }

    pub fn mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    pub fn mesh_mut(&mut self, key: MeshKey) -> Option<&mut Mesh> {
        self.meshes.get_mut(key)
    }

    pub fn mesh_by_name(&self, name: &str) -> Option<MeshKey> {
        self.mesh_names.get(name).copied()
    }

    /// Remove a mesh. Models still referencing it fail to draw afterwards.
    pub fn remove_mesh(&mut self, key: MeshKey) -> bool {
        match self.meshes.remove(key) {
            Some(mesh) => {
                self.mesh_names.remove(mesh.name());
                if self.screen_quad == Some(key) {
                    self.screen_quad = None;
                }
                true
            }
            None => false,
        }
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Mutable mesh and shared program, borrowed together for vertex array resolution
    pub fn mesh_and_program(&mut self, mesh: MeshKey, program: ProgramKey) -> Option<(&mut Mesh, &Program)> {
        let program = self.programs.get(program)?;
        let mesh = self.meshes.get_mut(mesh)?;
        Some((mesh, program))
    }

    /// Screen-filling quad: 4 vertices {position vec3, uv vec2}, 6 indices
    ///
    /// Created once; later calls return the same key.
    pub fn create_screen_quad(&mut self, buffers: &BufferManager) -> Result<MeshKey> {
        if let Some(key) = self.screen_quad {
            return Ok(key);
        }
        #[rustfmt::skip]
        let vertices = vec![
            // position         // uv
            -1.0, -1.0, 0.0,    0.0, 0.0,
             1.0, -1.0, 0.0,    1.0, 0.0,
             1.0,  1.0, 0.0,    1.0, 1.0,
            -1.0,  1.0, 0.0,    0.0, 1.0,
        ];
        let desc = MeshDesc {
            name: "__screen_quad".to_string(),
            submeshes: vec![SubmeshDesc {
                layout: VertexBufferLayout::packed(&[(0, 3), (1, 2)]),
                vertices,
                indices: vec![0, 1, 2, 0, 2, 3],
            }],
        };
        let key = self.add_mesh(buffers, desc)?;
        self.screen_quad = Some(key);
        Ok(key)
    }

    pub fn screen_quad(&self) -> Option<MeshKey> {
        self.screen_quad
    }

    // ===== MODELS =====

    /// Register a model: a mesh plus exactly one material per submesh
    pub fn add_model(&mut self, name: &str, mesh: MeshKey, materials: Vec<MaterialKey>) -> Result<ModelKey> {
        if self.model_names.contains_key(name) {
            engine_bail!("ember3d::ResourceManager", "Model '{}' already exists", name);
        }
        let Some(mesh_ref) = self.meshes.get(mesh) else {
            engine_bail!("ember3d::ResourceManager", "Model '{}' references an unknown mesh", name);
        };
        if materials.len() != mesh_ref.submesh_count() {
            engine_bail!("ember3d::ResourceManager",
                "Model '{}' has {} materials for {} submeshes",
                name, materials.len(), mesh_ref.submesh_count());
        }
        if materials.iter().any(|key| !self.materials.contains_key(*key)) {
            engine_bail!("ember3d::ResourceManager", "Model '{}' references an unknown material", name);
        }
        let key = self.models.insert(Model::new(name.to_string(), mesh, materials));
        self.model_names.insert(name.to_string(), key);
        Ok(key)
    }

    pub fn model(&self, key: ModelKey) -> Option<&Model> {
        self.models.get(key)
    }

    pub fn model_by_name(&self, name: &str) -> Option<ModelKey> {
        self.model_names.get(name).copied()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;

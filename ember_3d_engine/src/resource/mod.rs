//! Resource management module
//!
//! Meshes, programs, textures, materials and models, the manager that owns
//! them, and the cache of vertex arrays built between meshes and programs.

mod resource_manager;
pub mod vertex_layout;
pub mod program;
pub mod texture;
pub mod material;
pub mod mesh;
pub mod geometry_cache;

pub use resource_manager::{ResourceManager, DefaultTextures};
pub use vertex_layout::{
    VertexBufferAttribute, VertexBufferLayout, ShaderInput, ShaderLayout,
};
pub use program::{Program, ProgramId, ProgramKey};
pub use texture::{Texture, TextureKey};
pub use material::{Material, MaterialDesc, MaterialKey, Model, ModelKey};
pub use mesh::{
    Mesh, Submesh, GeometryBinding, MeshKey,
    MeshDesc, SubmeshDesc,
};
pub use geometry_cache::{GeometryCache, GeometryCacheStats};

/*!
# Ember 3D Engine

Core of a small real-time 3D renderer built on a backend-agnostic graphics
device abstraction.

The engine packs all per-frame shader parameters into a single shared
uniform buffer, builds vertex arrays lazily per (submesh, program) pair, and
renders a scene either forward or deferred through a G-buffer.

## Architecture

- **GraphicsDevice**: factory trait for GPU objects (buffers, vertex arrays,
  programs, textures, framebuffers, command lists), implemented by backends
- **BufferManager**: creates, maps and unmaps GPU buffers; writes go through
  the scoped `MappedBuffer` cursor
- **ResourceManager**: programs, textures, materials, meshes and models
- **GeometryCache**: resolves the vertex array binding a submesh to a program
- **FramePacker**: writes the global and per-entity uniform blocks each frame
- **Renderer**: packs, records and submits one frame
*/

// Internal modules
mod error;
mod engine;
mod config;
pub mod log;
pub mod graphics_device;
pub mod buffer;
pub mod resource;
pub mod camera;
pub mod scene;
pub mod frame;
pub mod renderer;

// Main ember3d namespace module
pub mod ember3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine-wide logger
    pub use crate::engine::Engine;

    // Configuration
    pub use crate::config::{Config, RenderMode};

    // Frame orchestration
    pub use crate::renderer::{Renderer, RenderPrograms, FrameStats};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Graphics device abstraction
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // GPU buffers
    pub mod buffer {
        pub use crate::buffer::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Per-frame uniform packing
    pub mod frame {
        pub use crate::frame::*;
    }

    // Renderer sub-module
    pub mod render {
        pub use crate::renderer::*;
    }
}

// Re-export math library at crate root
pub use glam;

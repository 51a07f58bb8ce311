/// Renderer module - frame orchestration (forward and deferred)

mod gbuffer;
mod renderer;

pub use gbuffer::GBuffer;
pub use renderer::{
    Renderer, RenderPrograms, FrameStats, GLOBAL_BLOCK_BINDING, ENTITY_BLOCK_BINDING,
};

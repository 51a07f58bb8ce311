/// Renderer - turns a scene into one submitted command list per frame
///
/// Every frame:
/// 1. the frame packer writes the global block and every entity block into
///    the shared uniform buffer (map, write, unmap),
/// 2. a command list is recorded for the active render mode,
/// 3. the command list is submitted to the graphics device.
///
/// Forward mode draws every submesh of every entity straight into the
/// default framebuffer. Deferred mode first draws them into the G-buffer
/// with the geometry program, then composites the G-buffer onto the
/// default framebuffer with a screen-filling quad.

use std::sync::Arc;
use crate::buffer::BufferManager;
use crate::config::{Config, RenderMode};
use crate::error::Result;
use crate::frame::{BlockRange, FramePacker};
use crate::graphics_device::{
    lock_device, Buffer, ClearFlags, CommandList, DeviceInfo, DeviceLimits,
    PrimitiveTopology, SharedGraphicsDevice, Viewport,
};
use crate::renderer::GBuffer;
use crate::resource::{GeometryCache, ProgramKey, ResourceManager, TextureKey};
use crate::scene::{Entity, Scene};

/// Uniform block binding point of the global block (camera, lights)
pub const GLOBAL_BLOCK_BINDING: u32 = 0;
/// Uniform block binding point of the per-entity block (world, MVP)
pub const ENTITY_BLOCK_BINDING: u32 = 1;

/// Programs used by each pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPrograms {
    /// Forward mode: lit draw of every submesh
    pub forward: ProgramKey,
    /// Deferred mode: writes albedo, normals and position into the G-buffer
    pub geometry: ProgramKey,
    /// Deferred mode: lights the G-buffer onto the screen quad
    pub composite: ProgramKey,
}

/// Per-frame counters returned by `Renderer::render_frame()`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: u32,
    pub entities: u32,
    pub lights: u32,
    /// Bytes of the uniform buffer written this frame
    pub uniform_bytes: u32,
}

pub struct Renderer {
    device: SharedGraphicsDevice,
    device_info: DeviceInfo,
    config: Config,
    buffers: BufferManager,
    packer: FramePacker,
    geometry_cache: GeometryCache,
    gbuffer: Option<GBuffer>,
    render_mode: RenderMode,
    display_size: (u32, u32),
    frame_index: u64,
}

impl Renderer {
    /// Create a renderer on `device`
    ///
    /// Validates `config` against the device limits, allocates the shared
    /// uniform buffer and, in deferred mode, the G-buffer.
    pub fn new(device: SharedGraphicsDevice, config: Config) -> Result<Self> {
        let (device_info, limits) = {
            let dev = lock_device(&device)?;
            (dev.info(), dev.limits())
        };
        crate::engine_info!("ember3d::Renderer",
            "'{}' on {} ({})", config.app_name, device_info.name, device_info.api_version);

        config.validate(&limits)?;

        let buffers = BufferManager::new(device.clone())?;
        let packer = FramePacker::new(&buffers, config.uniform_buffer_capacity(&limits))?;
        let geometry_cache = GeometryCache::new(device.clone());

        let (width, height) = config.display_size;
        let gbuffer = match config.render_mode {
            RenderMode::Deferred => Some(GBuffer::new(&device, width, height)?),
            RenderMode::Forward => None,
        };

        crate::engine_info!("ember3d::Renderer",
            "Renderer ready: {:?} mode, {}x{}", config.render_mode, width, height);

        Ok(Self {
            device,
            device_info,
            render_mode: config.render_mode,
            display_size: config.display_size,
            config,
            buffers,
            packer,
            geometry_cache,
            gbuffer,
            frame_index: 0,
        })
    }

    // ===== ACCESSORS =====

    /// Buffer manager, needed to upload meshes into `ResourceManager`
    pub fn buffer_manager(&self) -> &BufferManager {
        &self.buffers
    }

    pub fn device(&self) -> &SharedGraphicsDevice {
        &self.device
    }

    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    pub fn limits(&self) -> DeviceLimits {
        self.buffers.limits()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn display_size(&self) -> (u32, u32) {
        self.display_size
    }

    pub fn geometry_cache(&self) -> &GeometryCache {
        &self.geometry_cache
    }

    /// G-buffer, present only in deferred mode
    pub fn gbuffer(&self) -> Option<&GBuffer> {
        self.gbuffer.as_ref()
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    // ===== CONFIGURATION =====

    /// Switch render mode, creating or releasing the G-buffer
    pub fn set_render_mode(&mut self, mode: RenderMode) -> Result<()> {
        if mode == self.render_mode {
            return Ok(());
        }
        match mode {
            RenderMode::Deferred => {
                let (width, height) = self.display_size;
                self.gbuffer = Some(GBuffer::new(&self.device, width, height)?);
            }
            RenderMode::Forward => self.gbuffer = None,
        }
        crate::engine_info!("ember3d::Renderer", "Render mode: {:?} -> {:?}", self.render_mode, mode);
        self.render_mode = mode;
        Ok(())
    }

    /// Resize the default framebuffer (and the G-buffer, if any)
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            crate::engine_bail!("ember3d::Renderer", "Cannot resize to {}x{}", width, height);
        }
        if let Some(gbuffer) = &mut self.gbuffer {
            gbuffer.resize(&self.device, width, height)?;
        }
        self.display_size = (width, height);
        crate::engine_debug!("ember3d::Renderer", "Resized to {}x{}", width, height);
        Ok(())
    }

    // ===== FRAME =====

    /// Pack, record and submit one frame
    pub fn render_frame(
        &mut self,
        scene: &mut Scene,
        resources: &mut ResourceManager,
        programs: &RenderPrograms,
    ) -> Result<FrameStats> {
        for (pass, key) in [("forward", programs.forward), ("geometry", programs.geometry), ("composite", programs.composite)] {
            if resources.program(key).is_none() {
                crate::engine_bail!("ember3d::Renderer", "Unknown {} program", pass);
            }
        }
        let white = resources.create_default_textures(&self.device)?.white;

        let (entities, lights, camera) = scene.split_for_packing();
        let layout = self.packer.pack(&self.buffers, entities, lights, camera)?;

        let uniform_buffer = self.packer.uniform_buffer().handle().clone();
        let mut cmd = lock_device(&self.device)?.create_command_list()?;
        cmd.begin()?;

        let draw_calls = match self.render_mode {
            RenderMode::Forward => {
                self.record_forward(&mut *cmd, scene.entities(), resources, programs.forward, &uniform_buffer, layout.global, white)?
            }
            RenderMode::Deferred => {
                self.record_deferred(&mut *cmd, scene.entities(), resources, programs, &uniform_buffer, layout.global, white)?
            }
        };

        cmd.end()?;
        lock_device(&self.device)?.submit(&[&*cmd])?;

        let stats = FrameStats {
            draw_calls,
            entities: scene.entity_count() as u32,
            lights: scene.light_count() as u32,
            uniform_bytes: layout.used_bytes,
        };
        crate::engine_trace!("ember3d::Renderer", "Frame {}: {:?}", self.frame_index, stats);
        self.frame_index += 1;

        Ok(stats)
    }

    #[allow(clippy::too_many_arguments)]
    fn record_forward(
        &mut self,
        cmd: &mut dyn CommandList,
        entities: &[Entity],
        resources: &mut ResourceManager,
        program: ProgramKey,
        uniform_buffer: &Arc<dyn Buffer>,
        global: BlockRange,
        white: TextureKey,
    ) -> Result<u32> {
        let (width, height) = self.display_size;
        cmd.bind_framebuffer(None)?;
        cmd.set_viewport(Viewport::full(width, height))?;
        cmd.clear(ClearFlags::COLOR | ClearFlags::DEPTH, self.config.clear_color)?;

        Self::draw_entities(&mut self.geometry_cache, cmd, entities, resources, program, uniform_buffer, global, white)
    }

    #[allow(clippy::too_many_arguments)]
    fn record_deferred(
        &mut self,
        cmd: &mut dyn CommandList,
        entities: &[Entity],
        resources: &mut ResourceManager,
        programs: &RenderPrograms,
        uniform_buffer: &Arc<dyn Buffer>,
        global: BlockRange,
        white: TextureKey,
    ) -> Result<u32> {
        let Some(gbuffer) = &self.gbuffer else {
            crate::engine_bail!("ember3d::Renderer", "Deferred mode without a G-buffer");
        };

        // Geometry pass
        cmd.bind_framebuffer(Some(gbuffer.framebuffer()))?;
        cmd.set_viewport(Viewport::full(gbuffer.width(), gbuffer.height()))?;
        cmd.clear(ClearFlags::COLOR | ClearFlags::DEPTH, [0.0; 4])?;
        let mut draw_calls = Self::draw_entities(
            &mut self.geometry_cache, cmd, entities, resources, programs.geometry, uniform_buffer, global, white,
        )?;

        // Composite pass
        let quad = resources.create_screen_quad(&self.buffers)?;
        let (width, height) = self.display_size;
        cmd.bind_framebuffer(None)?;
        cmd.set_viewport(Viewport::full(width, height))?;
        cmd.clear(ClearFlags::COLOR | ClearFlags::DEPTH, self.config.clear_color)?;

        let Some((mesh, program)) = resources.mesh_and_program(quad, programs.composite) else {
            crate::engine_bail!("ember3d::Renderer", "Screen quad or composite program missing");
        };
        cmd.use_program(program.handle())?;
        for (unit, texture) in gbuffer.color_attachments().into_iter().enumerate() {
            cmd.bind_texture(unit as u32, texture)?;
        }
        cmd.bind_uniform_range(GLOBAL_BLOCK_BINDING, uniform_buffer, global.offset, global.size)?;

        let vertex_array = self.geometry_cache.resolve(mesh, 0, program)?;
        let (index_count, index_offset) = match mesh.submesh(0) {
            Some(sub) => (sub.index_count(), sub.index_offset()),
            None => crate::engine_bail!("ember3d::Renderer", "Screen quad has no submesh"),
        };
        cmd.bind_vertex_array(&vertex_array)?;
        cmd.draw_indexed(PrimitiveTopology::TriangleList, index_count, index_offset)?;
        draw_calls += 1;

        Ok(draw_calls)
    }

    /// Draw every submesh of every entity with `program`, returning the draw count
    ///
    /// Texture unit 0 receives the submesh material's albedo texture, or
    /// `white` when the material has none.
    #[allow(clippy::too_many_arguments)]
    fn draw_entities(
        cache: &mut GeometryCache,
        cmd: &mut dyn CommandList,
        entities: &[Entity],
        resources: &mut ResourceManager,
        program: ProgramKey,
        uniform_buffer: &Arc<dyn Buffer>,
        global: BlockRange,
        white: TextureKey,
    ) -> Result<u32> {
        let Some(program_handle) = resources.program(program).map(|p| p.handle().clone()) else {
            crate::engine_bail!("ember3d::Renderer", "Unknown program");
        };
        cmd.use_program(&program_handle)?;
        cmd.bind_uniform_range(GLOBAL_BLOCK_BINDING, uniform_buffer, global.offset, global.size)?;

        let mut draw_calls = 0;
        for (entity_index, entity) in entities.iter().enumerate() {
            let Some(model) = resources.model(entity.model()) else {
                crate::engine_bail!("ember3d::Renderer", "Entity {} references an unknown model", entity_index);
            };
            let mesh_key = model.mesh();
            let materials = model.materials().to_vec();

            let block = entity.block();
            cmd.bind_uniform_range(ENTITY_BLOCK_BINDING, uniform_buffer, block.offset, block.size)?;

            for (submesh_index, material) in materials.iter().enumerate() {
                let albedo = resources
                    .material(*material)
                    .and_then(|m| m.albedo_texture())
                    .and_then(|key| resources.texture(key))
                    .or_else(|| resources.texture(white))
                    .map(|t| t.handle().clone());
                let Some(albedo) = albedo else {
                    crate::engine_bail!("ember3d::Renderer", "Default white texture missing");
                };

                let Some((mesh, program_ref)) = resources.mesh_and_program(mesh_key, program) else {
                    crate::engine_bail!("ember3d::Renderer", "Entity {} references an unknown mesh", entity_index);
                };
                let vertex_array = cache.resolve(mesh, submesh_index, program_ref)?;
                let Some(submesh) = mesh.submesh(submesh_index) else {
                    crate::engine_bail!("ember3d::Renderer", "Submesh {} out of range", submesh_index);
                };

                cmd.bind_vertex_array(&vertex_array)?;
                cmd.bind_texture(0, &albedo)?;
                cmd.draw_indexed(PrimitiveTopology::TriangleList, submesh.index_count(), submesh.index_offset())?;
                draw_calls += 1;
            }
        }

        Ok(draw_calls)
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;

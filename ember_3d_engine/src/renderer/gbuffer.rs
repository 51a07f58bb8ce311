/// GBuffer - off-screen attachments filled by the deferred geometry pass
///
/// Color outputs, in draw-output order:
/// 0. albedo   (RGBA8)
/// 1. normals  (RGBA16F)
/// 2. position (RGBA16F, world space)
///
/// plus a 24-bit depth attachment. The composite pass samples the three
/// color attachments on texture units 0, 1 and 2.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::graphics_device::{
    lock_device, Framebuffer, FramebufferDesc, FramebufferStatus, GraphicsDevice,
    SharedGraphicsDevice, Texture, TextureDesc, TextureFormat,
};

const FRAMEBUFFER_NAME: &str = "gbuffer";

pub struct GBuffer {
    albedo: Arc<dyn Texture>,
    normals: Arc<dyn Texture>,
    position: Arc<dyn Texture>,
    depth: Arc<dyn Texture>,
    framebuffer: Arc<dyn Framebuffer>,
    width: u32,
    height: u32,
}

impl GBuffer {
    /// Create the attachments and validate framebuffer completeness
    pub fn new(device: &SharedGraphicsDevice, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            crate::engine_bail!("ember3d::GBuffer", "G-buffer size must be non-zero, got {}x{}", width, height);
        }

        let mut dev = lock_device(device)?;
        let albedo = Self::attachment(&mut *dev, "gbuffer.albedo", width, height, TextureFormat::RGBA8_UNORM)?;
        let normals = Self::attachment(&mut *dev, "gbuffer.normals", width, height, TextureFormat::RGBA16_FLOAT)?;
        let position = Self::attachment(&mut *dev, "gbuffer.position", width, height, TextureFormat::RGBA16_FLOAT)?;
        let depth = Self::attachment(&mut *dev, "gbuffer.depth", width, height, TextureFormat::D24_UNORM)?;

        let framebuffer = dev.create_framebuffer(&FramebufferDesc {
            name: FRAMEBUFFER_NAME.to_string(),
            color_attachments: vec![albedo.clone(), normals.clone(), position.clone()],
            depth_attachment: Some(depth.clone()),
            width,
            height,
        })?;

        let status = framebuffer.status();
        if status != FramebufferStatus::Complete {
            crate::engine_error!("ember3d::GBuffer",
                "Framebuffer '{}' ({}x{}) is incomplete: {}", FRAMEBUFFER_NAME, width, height, status);
            return Err(Error::IncompleteFramebuffer {
                framebuffer: FRAMEBUFFER_NAME.to_string(),
                status: status.to_string(),
            });
        }

        crate::engine_debug!("ember3d::GBuffer", "Created {}x{} G-buffer", width, height);

        Ok(Self { albedo, normals, position, depth, framebuffer, width, height })
    }

    /// Recreate every attachment at the new size
    ///
    /// On failure the current attachments are kept.
    pub fn resize(&mut self, device: &SharedGraphicsDevice, width: u32, height: u32) -> Result<()> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        *self = Self::new(device, width, height)?;
        Ok(())
    }

    fn attachment(
        device: &mut dyn GraphicsDevice,
        name: &str,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> Result<Arc<dyn Texture>> {
        let desc = TextureDesc { name: name.to_string(), width, height, format };
        device.create_texture(&desc, None).map_err(|e| {
            crate::engine_error!("ember3d::GBuffer", "Failed to create attachment '{}': {}", name, e);
            e
        })
    }

    // ===== GETTERS =====

    pub fn framebuffer(&self) -> &Arc<dyn Framebuffer> {
        &self.framebuffer
    }

    pub fn albedo(&self) -> &Arc<dyn Texture> {
        &self.albedo
    }

    pub fn normals(&self) -> &Arc<dyn Texture> {
        &self.normals
    }

    pub fn position(&self) -> &Arc<dyn Texture> {
        &self.position
    }

    pub fn depth(&self) -> &Arc<dyn Texture> {
        &self.depth
    }

    /// Color attachments in texture-unit order (albedo, normals, position)
    pub fn color_attachments(&self) -> [&Arc<dyn Texture>; 3] {
        [&self.albedo, &self.normals, &self.position]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
#[path = "gbuffer_tests.rs"]
mod tests;

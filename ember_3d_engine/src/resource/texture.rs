//! Resource-level texture: a named device texture.

use std::sync::Arc;
use slotmap::new_key_type;
use crate::error::Result;
use crate::graphics_device::{self, lock_device, SharedGraphicsDevice, TextureDesc, TextureFormat};

new_key_type! {
    /// Stable key of a texture stored in the ResourceManager
    pub struct TextureKey;
}

pub struct Texture {
    name: String,
    handle: Arc<dyn graphics_device::Texture>,
}

impl Texture {
    /// Create a device texture from decoded texel data
    pub fn create(device: &SharedGraphicsDevice, desc: &TextureDesc, data: Option<&[u8]>) -> Result<Self> {
        if desc.width == 0 || desc.height == 0 {
            crate::engine_bail!("ember3d::Texture", "Texture '{}' has a zero dimension ({}x{})",
                desc.name, desc.width, desc.height);
        }
        if let Some(bytes) = data {
            let expected = desc.width as usize * desc.height as usize * desc.format.bytes_per_pixel() as usize;
            if bytes.len() != expected {
                crate::engine_bail!("ember3d::Texture", "Texture '{}' expects {} bytes of texel data, got {}",
                    desc.name, expected, bytes.len());
            }
        }
        let handle = lock_device(device)?.create_texture(desc, data)?;
        Ok(Self { name: desc.name.clone(), handle })
    }

    /// 1x1 RGBA8 texture of a single color
    pub fn solid(device: &SharedGraphicsDevice, name: &str, rgba: [u8; 4]) -> Result<Self> {
        let desc = TextureDesc {
            name: name.to_string(),
            width: 1,
            height: 1,
            format: TextureFormat::RGBA8_UNORM,
        };
        Self::create(device, &desc, Some(&rgba))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> &Arc<dyn graphics_device::Texture> {
        &self.handle
    }
}

/// Texture trait and descriptors

/// Texel formats used by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    /// 8-bit normalized RGBA (albedo, loaded images)
    RGBA8_UNORM,
    /// 16-bit float RGBA (normals, positions)
    RGBA16_FLOAT,
    /// 24-bit depth
    D24_UNORM,
}

impl TextureFormat {
    /// Size of one texel in bytes
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::RGBA8_UNORM => 4,
            TextureFormat::RGBA16_FLOAT => 8,
            TextureFormat::D24_UNORM => 4,
        }
    }

    /// Whether the format can only be used as a depth attachment
    pub fn is_depth(&self) -> bool {
        matches!(self, TextureFormat::D24_UNORM)
    }
}

/// Descriptor for creating a texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDesc {
    /// Debug name
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Texel format
    pub format: TextureFormat,
}

/// Immutable texture properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Texture resource trait
pub trait Texture: Send + Sync {
    /// Texture properties
    fn info(&self) -> &TextureInfo;
}

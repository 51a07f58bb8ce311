/// Framebuffer trait - groups texture attachments for off-screen rendering
///
/// Created once and reused each frame. Recreated only when the attachments
/// change (e.g., window resize).

use std::fmt;
use std::sync::Arc;
use crate::graphics_device::Texture;

/// Completeness status reported by the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramebufferStatus {
    /// Ready to render into
    Complete,
    /// No attachment at all
    MissingAttachment,
    /// An attachment cannot be rendered into (wrong format, size mismatch)
    IncompleteAttachment(String),
    /// The combination of formats is not supported by the device
    Unsupported,
}

impl fmt::Display for FramebufferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramebufferStatus::Complete => write!(f, "complete"),
            FramebufferStatus::MissingAttachment => write!(f, "missing attachment"),
            FramebufferStatus::IncompleteAttachment(which) => write!(f, "incomplete attachment ({})", which),
            FramebufferStatus::Unsupported => write!(f, "unsupported attachment combination"),
        }
    }
}

/// Framebuffer
///
/// Created via `GraphicsDevice::create_framebuffer()`.
pub trait Framebuffer: Send + Sync {
    /// Get the width in pixels
    fn width(&self) -> u32;

    /// Get the height in pixels
    fn height(&self) -> u32;

    /// Completeness status
    fn status(&self) -> FramebufferStatus;
}

/// Descriptor for creating a framebuffer
pub struct FramebufferDesc {
    /// Debug name
    pub name: String,
    /// Color attachments, bound to draw outputs 0..n in order
    pub color_attachments: Vec<Arc<dyn Texture>>,
    /// Optional depth attachment
    pub depth_attachment: Option<Arc<dyn Texture>>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

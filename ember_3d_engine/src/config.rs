//! Engine configuration

use crate::error::Result;
use crate::graphics_device::DeviceLimits;

/// How a frame reaches the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Draw every submesh straight into the default framebuffer
    #[default]
    Forward,
    /// Fill the G-buffer, then composite it with a full-screen quad
    Deferred,
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Application name (reported in logs)
    pub app_name: String,
    /// Size of the default framebuffer in pixels
    pub display_size: (u32, u32),
    /// Initial render mode
    pub render_mode: RenderMode,
    /// RGBA clear color for the default framebuffer
    pub clear_color: [f32; 4],
    /// Capacity of the per-frame uniform buffer. `None` uses the device's
    /// maximum uniform block size.
    pub uniform_buffer_size: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Ember3D Application".to_string(),
            display_size: (1280, 720),
            render_mode: RenderMode::Forward,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            uniform_buffer_size: None,
        }
    }
}

impl Config {
    /// Uniform buffer capacity actually used against these device limits
    pub fn uniform_buffer_capacity(&self, limits: &DeviceLimits) -> u32 {
        self.uniform_buffer_size.unwrap_or(limits.max_uniform_block_size)
    }

    /// Check the configuration against the device limits
    pub fn validate(&self, limits: &DeviceLimits) -> Result<()> {
        let (width, height) = self.display_size;
        if width == 0 || height == 0 {
            crate::engine_bail!("ember3d::Config",
                "Display size must be non-zero, got {}x{}", width, height);
        }

        if let Some(size) = self.uniform_buffer_size {
            if size == 0 {
                crate::engine_bail!("ember3d::Config", "Uniform buffer size must be non-zero");
            }
            if size > limits.max_uniform_block_size {
                crate::engine_bail!("ember3d::Config",
                    "Uniform buffer size {} exceeds the device maximum of {} bytes",
                    size, limits.max_uniform_block_size);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

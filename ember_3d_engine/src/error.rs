//! Error types for the Ember3D engine
//!
//! This module defines the error type shared by every engine component,
//! from GPU buffer allocation to vertex array resolution and frame packing.

use std::fmt;

/// Result type for Ember3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ember3D engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error reported by the graphics device
    BackendError(String),

    /// The device rejected an allocation
    OutOfMemory,

    /// Invalid resource (unknown key, malformed descriptor, ...)
    InvalidResource(String),

    /// Initialization failed (renderer, G-buffer, subsystems)
    InitializationFailed(String),

    /// A program reads a vertex input that the submesh does not provide
    MissingVertexAttribute {
        /// Name of the program requiring the input
        program: String,
        /// Index of the submesh inside its mesh
        submesh: usize,
        /// Shader input location with no matching vertex attribute
        location: u8,
    },

    /// A buffer write would run past the end of the buffer
    CapacityExceeded {
        /// Aligned byte offset where the write would start
        offset: u32,
        /// Number of bytes requested
        size: u32,
        /// Buffer capacity in bytes
        capacity: u32,
    },

    /// A framebuffer failed completeness validation
    IncompleteFramebuffer {
        /// Framebuffer name
        framebuffer: String,
        /// Status reported by the device
        status: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::MissingVertexAttribute { program, submesh, location } => write!(
                f,
                "Missing vertex attribute: program '{}' reads location {} but submesh {} does not provide it",
                program, location, submesh
            ),
            Error::CapacityExceeded { offset, size, capacity } => write!(
                f,
                "Capacity exceeded: writing {} bytes at offset {} overflows a {} byte buffer",
                size, offset, capacity
            ),
            Error::IncompleteFramebuffer { framebuffer, status } => write!(
                f,
                "Incomplete framebuffer '{}': {}",
                framebuffer, status
            ),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR and build an `Error::InvalidResource` with the same message
///
/// # Example
///
/// ```no_run
/// # use ember_3d_engine::engine_err;
/// let index = 7;
/// let err = engine_err!("ember3d::Mesh", "Submesh {} out of range", index);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::ember3d::Error::InvalidResource(message)
    }};
}

/// Log an ERROR and return `Err(Error::InvalidResource)` from the enclosing function
///
/// # Example
///
/// ```no_run
/// # use ember_3d_engine::engine_bail;
/// fn check(count: usize) -> ember_3d_engine::ember3d::Result<()> {
///     if count == 0 {
///         engine_bail!("ember3d::Mesh", "Mesh must have at least one submesh");
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

//! Resource-level program.
//!
//! Wraps a linked device program with a process-unique id and the vertex
//! input layout read back from the device at load time.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use slotmap::new_key_type;
use crate::error::Result;
use crate::graphics_device::{self, lock_device, SharedGraphicsDevice, ProgramDesc};
use crate::resource::ShaderLayout;

new_key_type! {
    /// Stable key of a program stored in the ResourceManager
    pub struct ProgramKey;
}

/// Process-unique program identity, used to key cached vertex arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(u64);

static NEXT_PROGRAM_ID: AtomicU64 = AtomicU64::new(1);

impl ProgramId {
    fn next() -> Self {
        Self(NEXT_PROGRAM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone)]
pub struct Program {
    id: ProgramId,
    name: String,
    handle: Arc<dyn graphics_device::Program>,
    layout: ShaderLayout,
}

impl Program {
    /// Compile and link `desc`, then introspect its vertex inputs
    pub fn load(device: &SharedGraphicsDevice, desc: &ProgramDesc) -> Result<Self> {
        let handle = lock_device(device)?.create_program(desc).map_err(|e| {
            crate::engine_error!("ember3d::Program", "Failed to load program '{}': {}", desc.name, e);
            e
        })?;
        Ok(Self::from_handle(desc.name.clone(), handle))
    }

    /// Wrap an already linked program
    pub fn from_handle(name: String, handle: Arc<dyn graphics_device::Program>) -> Self {
        let layout = ShaderLayout::from_active_inputs(&handle.active_inputs());
        crate::engine_debug!("ember3d::Program", "Program '{}' reads {} vertex inputs", name, layout.inputs.len());
        Self {
            id: ProgramId::next(),
            name,
            handle,
            layout,
        }
    }

    pub fn id(&self) -> ProgramId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> &Arc<dyn graphics_device::Program> {
        &self.handle
    }

    /// Vertex inputs read by this program
    pub fn layout(&self) -> &ShaderLayout {
        &self.layout
    }
}

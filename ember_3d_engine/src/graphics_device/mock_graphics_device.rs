/// Mock graphics device for unit tests (no GPU required)
///
/// Buffers keep a CPU copy of their contents, programs derive their active
/// inputs from `layout(location = N) in vecK` declarations in the source, and
/// command lists append readable command strings to a log shared with the
/// device.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, SharedGraphicsDevice, DeviceInfo, DeviceLimits,
    Buffer, BufferDesc, BufferKind, MapAccess,
    VertexArray, VertexArrayDesc, VertexAttributeBinding,
    Program, ProgramDesc, ProgramInput,
    Texture, TextureDesc, TextureInfo,
    Framebuffer, FramebufferDesc, FramebufferStatus,
    CommandList, ClearFlags, PrimitiveTopology, Viewport,
};

// ============================================================================
// Mock Buffer
// ============================================================================

pub struct MockBuffer {
    pub kind: BufferKind,
    data: Mutex<Vec<u8>>,
    mapped: AtomicBool,
    pub map_count: AtomicUsize,
}

impl MockBuffer {
    pub fn new(kind: BufferKind, data: Vec<u8>) -> Self {
        Self {
            kind,
            data: Mutex::new(data),
            mapped: AtomicBool::new(false),
            map_count: AtomicUsize::new(0),
        }
    }

    /// Copy of the backing store
    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().unwrap().clone()
    }

    pub fn is_mapped(&self) -> bool {
        self.mapped.load(Ordering::SeqCst)
    }
}

impl Buffer for MockBuffer {
    fn size(&self) -> u32 {
        self.data.lock().unwrap().len() as u32
    }

    fn kind(&self) -> BufferKind {
        self.kind
    }

    fn map(&self, _access: MapAccess) -> Result<()> {
        if self.mapped.swap(true, Ordering::SeqCst) {
            return Err(Error::BackendError("buffer already mapped".to_string()));
        }
        self.map_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn update(&self, offset: u32, data: &[u8]) -> Result<()> {
        if !self.is_mapped() {
            return Err(Error::BackendError("write to unmapped buffer".to_string()));
        }
        let mut store = self.data.lock().unwrap();
        let start = offset as usize;
        let end = start + data.len();
        if end > store.len() {
            return Err(Error::BackendError(format!(
                "write {}..{} out of bounds ({} bytes)", start, end, store.len()
            )));
        }
        store[start..end].copy_from_slice(data);
        Ok(())
    }

    fn unmap(&self) -> Result<()> {
        if !self.mapped.swap(false, Ordering::SeqCst) {
            return Err(Error::BackendError("buffer not mapped".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Mock VertexArray
// ============================================================================

pub struct MockVertexArray {
    pub attributes: Vec<VertexAttributeBinding>,
    pub vertex_buffer_size: u32,
    pub index_buffer_size: u32,
}

impl VertexArray for MockVertexArray {
    fn attributes(&self) -> &[VertexAttributeBinding] {
        &self.attributes
    }
}

// ============================================================================
// Mock Program
// ============================================================================

pub struct MockProgram {
    pub name: String,
    pub inputs: Vec<ProgramInput>,
}

impl MockProgram {
    /// Parse `layout(location = N) in <type> name;` declarations
    pub fn parse_inputs(source: &str) -> Vec<ProgramInput> {
        let mut inputs = Vec::new();
        for line in source.lines() {
            let line = line.trim();
            if !line.starts_with("layout") {
                continue;
            }
            let Some(close) = line.find(')') else { continue };
            let Some(eq) = line[..close].find('=') else { continue };
            let Ok(location) = line[eq + 1..close].trim().parse::<u8>() else { continue };

            let mut rest = line[close + 1..].split_whitespace();
            if rest.next() != Some("in") {
                continue;
            }
            let component_count = match rest.next() {
                Some("float") => 1,
                Some("vec2") => 2,
                Some("vec3") => 3,
                Some("vec4") => 4,
                _ => continue,
            };
            inputs.push(ProgramInput { location, component_count });
        }
        inputs.sort_by_key(|input| input.location);
        inputs
    }
}

impl Program for MockProgram {
    fn name(&self) -> &str {
        &self.name
    }

    fn active_inputs(&self) -> Vec<ProgramInput> {
        self.inputs.clone()
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

pub struct MockTexture {
    pub name: String,
    pub info: TextureInfo,
    pub data: Option<Vec<u8>>,
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Mock Framebuffer
// ============================================================================

pub struct MockFramebuffer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub status: FramebufferStatus,
}

impl Framebuffer for MockFramebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn status(&self) -> FramebufferStatus {
        self.status.clone()
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

pub struct MockCommandList {
    log: Arc<Mutex<Vec<String>>>,
    uniform_offset_alignment: u32,
    recording: bool,
}

impl MockCommandList {
    fn push(&self, command: String) {
        self.log.lock().unwrap().push(command);
    }

    fn check_recording(&self) -> Result<()> {
        if self.recording {
            Ok(())
        } else {
            Err(Error::BackendError("command list is not recording".to_string()))
        }
    }
}

impl CommandList for MockCommandList {
    fn begin(&mut self) -> Result<()> {
        self.recording = true;
        self.push("begin".to_string());
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.check_recording()?;
        self.recording = false;
        self.push("end".to_string());
        Ok(())
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<&Arc<dyn Framebuffer>>) -> Result<()> {
        self.check_recording()?;
        match framebuffer {
            Some(fb) => self.push(format!("bind_framebuffer({}x{})", fb.width(), fb.height())),
            None => self.push("bind_framebuffer(default)".to_string()),
        }
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.check_recording()?;
        self.push(format!("set_viewport({}x{})", viewport.width, viewport.height));
        Ok(())
    }

    fn clear(&mut self, flags: ClearFlags, _color: [f32; 4]) -> Result<()> {
        self.check_recording()?;
        self.push(format!(
            "clear(color={}, depth={})",
            flags.contains(ClearFlags::COLOR),
            flags.contains(ClearFlags::DEPTH)
        ));
        Ok(())
    }

    fn use_program(&mut self, program: &Arc<dyn Program>) -> Result<()> {
        self.check_recording()?;
        self.push(format!("use_program({})", program.name()));
        Ok(())
    }

    fn bind_vertex_array(&mut self, vertex_array: &Arc<dyn VertexArray>) -> Result<()> {
        self.check_recording()?;
        self.push(format!("bind_vertex_array(attributes={})", vertex_array.attributes().len()));
        Ok(())
    }

    fn bind_texture(&mut self, unit: u32, texture: &Arc<dyn Texture>) -> Result<()> {
        self.check_recording()?;
        let info = texture.info();
        self.push(format!("bind_texture(unit={}, {}x{})", unit, info.width, info.height));
        Ok(())
    }

    fn bind_uniform_range(&mut self, binding: u32, buffer: &Arc<dyn Buffer>, offset: u32, size: u32) -> Result<()> {
        self.check_recording()?;
        if offset % self.uniform_offset_alignment != 0 {
            return Err(Error::BackendError(format!(
                "uniform range offset {} is not aligned to {}", offset, self.uniform_offset_alignment
            )));
        }
        if offset + size > buffer.size() {
            return Err(Error::BackendError(format!(
                "uniform range {}+{} exceeds buffer size {}", offset, size, buffer.size()
            )));
        }
        self.push(format!("bind_uniform_range(binding={}, offset={}, size={})", binding, offset, size));
        Ok(())
    }

    fn draw_indexed(&mut self, topology: PrimitiveTopology, index_count: u32, index_byte_offset: u32) -> Result<()> {
        self.check_recording()?;
        self.push(format!("draw_indexed({:?}, count={}, offset={})", topology, index_count, index_byte_offset));
        Ok(())
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

pub struct MockGraphicsDevice {
    pub limits: DeviceLimits,
    /// Every buffer allocation fails with `Error::OutOfMemory`
    pub fail_allocations: bool,
    /// Every framebuffer reports `FramebufferStatus::Unsupported`
    pub incomplete_framebuffers: bool,

    pub buffers: Vec<Arc<MockBuffer>>,
    pub vertex_array_count: usize,
    pub program_count: usize,
    pub texture_count: usize,
    pub framebuffer_count: usize,
    pub submit_count: usize,

    commands: Arc<Mutex<Vec<String>>>,
}

impl MockGraphicsDevice {
    /// Mock device with a 256-byte offset alignment and a 64 KiB uniform block limit
    pub fn new() -> Self {
        Self::with_limits(DeviceLimits {
            uniform_buffer_offset_alignment: 256,
            max_uniform_block_size: 65536,
        })
    }

    pub fn with_limits(limits: DeviceLimits) -> Self {
        Self {
            limits,
            fail_allocations: false,
            incomplete_framebuffers: false,
            buffers: Vec::new(),
            vertex_array_count: 0,
            program_count: 0,
            texture_count: 0,
            framebuffer_count: 0,
            submit_count: 0,
            commands: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Wrap the device for the engine while keeping a typed handle for assertions
    pub fn into_shared(self) -> (Arc<Mutex<MockGraphicsDevice>>, SharedGraphicsDevice) {
        let mock = Arc::new(Mutex::new(self));
        let shared: SharedGraphicsDevice = mock.clone();
        (mock, shared)
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Commands recorded by every command list created by this device
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn clear_commands(&self) {
        self.commands.lock().unwrap().clear();
    }

    fn attachment_status(desc: &FramebufferDesc) -> FramebufferStatus {
        if desc.color_attachments.is_empty() && desc.depth_attachment.is_none() {
            return FramebufferStatus::MissingAttachment;
        }
        for (i, color) in desc.color_attachments.iter().enumerate() {
            let info = color.info();
            if info.format.is_depth() || info.width != desc.width || info.height != desc.height {
                return FramebufferStatus::IncompleteAttachment(format!("color {}", i));
            }
        }
        if let Some(depth) = &desc.depth_attachment {
            let info = depth.info();
            if !info.format.is_depth() || info.width != desc.width || info.height != desc.height {
                return FramebufferStatus::IncompleteAttachment("depth".to_string());
            }
        }
        FramebufferStatus::Complete
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn info(&self) -> DeviceInfo {
        DeviceInfo {
            name: "Mock GPU".to_string(),
            api_version: "mock 1.0".to_string(),
        }
    }

    fn limits(&self) -> DeviceLimits {
        self.limits
    }

    fn create_buffer(&mut self, desc: &BufferDesc, data: Option<&[u8]>) -> Result<Arc<dyn Buffer>> {
        if self.fail_allocations {
            return Err(Error::OutOfMemory);
        }
        let store = match data {
            Some(bytes) if bytes.len() != desc.size as usize => {
                return Err(Error::BackendError(format!(
                    "initial data is {} bytes, buffer is {}", bytes.len(), desc.size
                )));
            }
            Some(bytes) => bytes.to_vec(),
            None => vec![0u8; desc.size as usize],
        };
        let buffer = Arc::new(MockBuffer::new(desc.kind, store));
        self.buffers.push(buffer.clone());
        Ok(buffer)
    }

    fn create_vertex_array(&mut self, desc: &VertexArrayDesc) -> Result<Arc<dyn VertexArray>> {
        if desc.vertex_buffer.kind() != BufferKind::Vertex || desc.index_buffer.kind() != BufferKind::Index {
            return Err(Error::BackendError("vertex array needs a vertex and an index buffer".to_string()));
        }
        self.vertex_array_count += 1;
        Ok(Arc::new(MockVertexArray {
            attributes: desc.attributes.clone(),
            vertex_buffer_size: desc.vertex_buffer.size(),
            index_buffer_size: desc.index_buffer.size(),
        }))
    }

    fn create_program(&mut self, desc: &ProgramDesc) -> Result<Arc<dyn Program>> {
        self.program_count += 1;
        Ok(Arc::new(MockProgram {
            name: desc.name.clone(),
            inputs: MockProgram::parse_inputs(&desc.source),
        }))
    }

    fn create_texture(&mut self, desc: &TextureDesc, data: Option<&[u8]>) -> Result<Arc<dyn Texture>> {
        self.texture_count += 1;
        Ok(Arc::new(MockTexture {
            name: desc.name.clone(),
            info: TextureInfo {
                width: desc.width,
                height: desc.height,
                format: desc.format,
            },
            data: data.map(|bytes| bytes.to_vec()),
        }))
    }

    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> Result<Arc<dyn Framebuffer>> {
        self.framebuffer_count += 1;
        let status = if self.incomplete_framebuffers {
            FramebufferStatus::Unsupported
        } else {
            Self::attachment_status(desc)
        };
        Ok(Arc::new(MockFramebuffer {
            name: desc.name.clone(),
            width: desc.width,
            height: desc.height,
            status,
        }))
    }

    fn create_command_list(&self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(MockCommandList {
            log: self.commands.clone(),
            uniform_offset_alignment: self.limits.uniform_buffer_offset_alignment,
            recording: false,
        }))
    }

    fn submit(&mut self, _commands: &[&dyn CommandList]) -> Result<()> {
        self.submit_count += 1;
        self.commands.lock().unwrap().push("submit".to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;

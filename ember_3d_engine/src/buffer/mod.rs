/// Buffer module - linear GPU buffers and the manager that creates and maps them

pub mod gpu_buffer;
pub mod mapped_buffer;
pub mod buffer_manager;

pub use gpu_buffer::GpuBuffer;
pub use mapped_buffer::MappedBuffer;
pub use buffer_manager::BufferManager;

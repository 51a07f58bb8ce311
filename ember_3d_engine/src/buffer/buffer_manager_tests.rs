//! Unit tests for BufferManager
//!
//! Uses MockGraphicsDevice (no GPU required).

use crate::buffer::BufferManager;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::{BufferKind, BufferUsageHint, DeviceLimits, MapAccess};

// ============================================================================
// ALIGNMENT HELPERS
// ============================================================================

#[test]
fn test_is_power_of_two() {
    assert!(!BufferManager::is_power_of_two(0));
    assert!(BufferManager::is_power_of_two(1));
    assert!(BufferManager::is_power_of_two(2));
    assert!(BufferManager::is_power_of_two(256));
    assert!(!BufferManager::is_power_of_two(3));
    assert!(!BufferManager::is_power_of_two(160));
    assert!(BufferManager::is_power_of_two(1 << 31));
}

#[test]
fn test_align_rounds_up() {
    assert_eq!(BufferManager::align(0, 16), 0);
    assert_eq!(BufferManager::align(1, 16), 16);
    assert_eq!(BufferManager::align(12, 16), 16);
    assert_eq!(BufferManager::align(160, 256), 256);
    assert_eq!(BufferManager::align(257, 256), 512);
    assert_eq!(BufferManager::align(7, 1), 7);
}

#[test]
fn test_align_is_idempotent_and_identity_on_aligned_values() {
    for alignment in [1u32, 4, 16, 64, 256] {
        for value in 0u32..600 {
            let once = BufferManager::align(value, alignment);
            assert_eq!(once % alignment, 0);
            assert!(once >= value && once - value < alignment);
            assert_eq!(BufferManager::align(once, alignment), once);
        }
    }
}

#[test]
#[should_panic(expected = "not a power of two")]
fn test_align_panics_on_non_power_of_two() {
    BufferManager::align(10, 12);
}

#[test]
#[should_panic]
fn test_align_panics_on_zero() {
    BufferManager::align(10, 0);
}

// ============================================================================
// CREATION
// ============================================================================

#[test]
fn test_manager_captures_limits() {
    let (_mock, device) = MockGraphicsDevice::new().into_shared();
    let manager = BufferManager::new(device).unwrap();
    assert_eq!(manager.limits().uniform_buffer_offset_alignment, 256);
    assert_eq!(manager.limits().max_uniform_block_size, 65536);
}

#[test]
fn test_manager_rejects_bad_offset_alignment() {
    for alignment in [0u32, 48] {
        let (_mock, device) = MockGraphicsDevice::with_limits(DeviceLimits {
            uniform_buffer_offset_alignment: alignment,
            max_uniform_block_size: 65536,
        }).into_shared();

        let result = BufferManager::new(device);
        assert!(matches!(result, Err(Error::InvalidResource(_))), "alignment {}", alignment);
    }
}

#[test]
fn test_create_buffer_is_zeroed_with_cursor_at_zero() {
    let (mock, device) = MockGraphicsDevice::new().into_shared();
    let manager = BufferManager::new(device).unwrap();

    let buffer = manager.create_uniform_buffer(512).unwrap();
    assert_eq!(buffer.capacity(), 512);
    assert_eq!(buffer.head(), 0);
    assert_eq!(buffer.kind(), BufferKind::Uniform);
    assert_eq!(buffer.usage(), BufferUsageHint::Stream);

    let mock = mock.lock().unwrap();
    assert_eq!(mock.buffer_count(), 1);
    assert!(mock.buffers[0].contents().iter().all(|b| *b == 0));
}

#[test]
fn test_create_buffer_rejects_zero_capacity() {
    let (mock, device) = MockGraphicsDevice::new().into_shared();
    let manager = BufferManager::new(device).unwrap();

    let result = manager.create_buffer(0, BufferKind::Uniform, BufferUsageHint::Stream);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert_eq!(mock.lock().unwrap().buffer_count(), 0);
}

#[test]
fn test_create_buffer_propagates_device_failure() {
    let mut device = MockGraphicsDevice::new();
    device.fail_allocations = true;
    let (_mock, device) = device.into_shared();
    let manager = BufferManager::new(device).unwrap();

    let result = manager.create_uniform_buffer(256);
    assert!(matches!(result, Err(Error::OutOfMemory)));
}

#[test]
fn test_static_vertex_and_index_buffers() {
    let (mock, device) = MockGraphicsDevice::new().into_shared();
    let manager = BufferManager::new(device).unwrap();

    let vertices = manager.create_static_vertex_buffer(&[1.0, 2.0, 3.0]).unwrap();
    let indices = manager.create_static_index_buffer(&[0, 1, 2, 2, 1, 0]).unwrap();

    assert_eq!(vertices.kind(), BufferKind::Vertex);
    assert_eq!(vertices.capacity(), 12);
    assert_eq!(vertices.head(), 12);
    assert_eq!(indices.kind(), BufferKind::Index);
    assert_eq!(indices.capacity(), 24);
    assert_eq!(indices.usage(), BufferUsageHint::Static);

    let mock = mock.lock().unwrap();
    assert_eq!(mock.buffers[0].contents(), bytemuck::cast_slice::<f32, u8>(&[1.0, 2.0, 3.0]).to_vec());
}

#[test]
fn test_create_buffer_with_empty_data_fails() {
    let (_mock, device) = MockGraphicsDevice::new().into_shared();
    let manager = BufferManager::new(device).unwrap();
    assert!(manager.create_static_index_buffer(&[]).is_err());
}

// ============================================================================
// MAP / UNMAP
// ============================================================================

#[test]
fn test_map_resets_cursor_and_unmap_reports_bytes_written() {
    let (mock, device) = MockGraphicsDevice::new().into_shared();
    let manager = BufferManager::new(device).unwrap();
    let mut buffer = manager.create_uniform_buffer(256).unwrap();

    let mut mapped = manager.map_buffer(&mut buffer, MapAccess::WriteInvalidate).unwrap();
    mapped.push_u32(7).unwrap();
    assert_eq!(manager.unmap_buffer(mapped).unwrap(), 4);
    assert_eq!(buffer.head(), 4);

    let mapped = manager.map_buffer(&mut buffer, MapAccess::WriteInvalidate).unwrap();
    assert_eq!(mapped.head(), 0);
    drop(mapped);

    let mock = mock.lock().unwrap();
    assert!(!mock.buffers[0].is_mapped());
    assert_eq!(mock.buffers[0].map_count.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[test]
fn test_guard_unmaps_on_early_return() {
    let (mock, device) = MockGraphicsDevice::new().into_shared();
    let manager = BufferManager::new(device).unwrap();
    let mut buffer = manager.create_uniform_buffer(16).unwrap();

    let result = (|| {
        let mut mapped = manager.map_buffer(&mut buffer, MapAccess::WriteInvalidate)?;
        mapped.push_mat4(glam::Mat4::IDENTITY)?;
        manager.unmap_buffer(mapped)
    })();

    assert!(matches!(result, Err(Error::CapacityExceeded { .. })));
    assert!(!mock.lock().unwrap().buffers[0].is_mapped());
}

/// Tests for Scene, Entity and Light
///
/// Scenes hold only keys, so no device is needed here.

use super::*;
use crate::frame::BlockRange;
use crate::scene::LightType;
use glam::Vec3;
use slotmap::SlotMap;

// ============================================================================
// Helper Functions
// ============================================================================

fn model_keys(count: usize) -> Vec<ModelKey> {
    let mut models: SlotMap<ModelKey, ()> = SlotMap::with_key();
    (0..count).map(|_| models.insert(())).collect()
}

// ============================================================================
// Entities
// ============================================================================

#[test]
fn test_new_scene_is_empty() {
    let scene = Scene::new(Camera::default());
    assert_eq!(scene.entity_count(), 0);
    assert_eq!(scene.light_count(), 0);
    assert!(scene.entity(0).is_none());
}

#[test]
fn test_add_entity_returns_sequential_indices() {
    let keys = model_keys(2);
    let mut scene = Scene::default();

    let a = scene.add_entity(keys[0], Mat4::IDENTITY);
    let b = scene.add_entity(keys[1], Mat4::from_translation(Vec3::X));

    assert_eq!((a, b), (0, 1));
    assert_eq!(scene.entity(1).unwrap().model(), keys[1]);
    assert_eq!(*scene.entity(1).unwrap().world_transform(), Mat4::from_translation(Vec3::X));
}

#[test]
fn test_new_entity_has_empty_block() {
    let keys = model_keys(1);
    let mut scene = Scene::default();
    scene.add_entity(keys[0], Mat4::IDENTITY);
    assert_eq!(scene.entity(0).unwrap().block(), BlockRange::default());
}

#[test]
fn test_world_transform_is_stored_verbatim() {
    let keys = model_keys(1);
    let mut scene = Scene::default();
    scene.add_entity(keys[0], Mat4::IDENTITY);

    let transform = Mat4::from_rotation_y(0.7) * Mat4::from_scale(Vec3::splat(2.0));
    scene.entity_mut(0).unwrap().set_world_transform(transform);

    assert_eq!(*scene.entity(0).unwrap().world_transform(), transform);
}

#[test]
fn test_remove_entity_shifts_later_entities() {
    let keys = model_keys(3);
    let mut scene = Scene::default();
    for key in &keys {
        scene.add_entity(*key, Mat4::IDENTITY);
    }

    let removed = scene.remove_entity(0).unwrap();
    assert_eq!(removed.model(), keys[0]);
    assert_eq!(scene.entity_count(), 2);
    assert_eq!(scene.entity(0).unwrap().model(), keys[1]);
    assert!(scene.remove_entity(5).is_none());
}

// ============================================================================
// Lights
// ============================================================================

#[test]
fn test_light_type_tags() {
    assert_eq!(LightType::Directional.type_tag(), 0);
    assert_eq!(LightType::Point.type_tag(), 1);
}

#[test]
fn test_directional_light_normalizes_direction() {
    let light = Light::directional(Vec3::ONE, Vec3::new(0.0, -4.0, 0.0));
    assert_eq!(light.light_type, LightType::Directional);
    assert_eq!(light.direction, Vec3::NEG_Y);
    assert_eq!(light.position, Vec3::ZERO);
}

#[test]
fn test_point_light_keeps_position() {
    let light = Light::point(Vec3::new(1.0, 0.5, 0.0), Vec3::new(3.0, 2.0, 1.0));
    assert_eq!(light.light_type, LightType::Point);
    assert_eq!(light.position, Vec3::new(3.0, 2.0, 1.0));
    assert_eq!(light.direction, Vec3::ZERO);
}

#[test]
fn test_add_and_remove_lights() {
    let mut scene = Scene::default();
    scene.add_light(Light::directional(Vec3::ONE, Vec3::NEG_Z));
    scene.add_light(Light::point(Vec3::ONE, Vec3::ZERO));

    assert_eq!(scene.light_count(), 2);
    scene.light_mut(1).unwrap().color = Vec3::X;
    assert_eq!(scene.lights()[1].color, Vec3::X);

    let removed = scene.remove_light(0).unwrap();
    assert_eq!(removed.light_type, LightType::Directional);
    assert_eq!(scene.lights()[0].light_type, LightType::Point);
}

// ============================================================================
// Camera and clear
// ============================================================================

#[test]
fn test_clear_keeps_camera() {
    let keys = model_keys(1);
    let camera = Camera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y, 1.0, 1.0, 0.1, 10.0);
    let mut scene = Scene::new(camera.clone());
    scene.add_entity(keys[0], Mat4::IDENTITY);
    scene.add_light(Light::point(Vec3::ONE, Vec3::ZERO));

    scene.clear();

    assert_eq!(scene.entity_count(), 0);
    assert_eq!(scene.light_count(), 0);
    assert_eq!(*scene.camera(), camera);
}

#[test]
fn test_camera_mut() {
    let mut scene = Scene::default();
    scene.camera_mut().set_position(Vec3::Y);
    assert_eq!(scene.camera().position(), Vec3::Y);

    scene.set_camera(Camera::default());
    assert_eq!(scene.camera().position(), Vec3::ZERO);
}

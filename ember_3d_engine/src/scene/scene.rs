/// Scene — entities, lights and the active camera.
///
/// Entities and lights are stored contiguously and addressed by index. The
/// frame packer walks them in order, so entity `i` always receives the
/// i-th entity block of the frame.

use glam::Mat4;
use crate::camera::Camera;
use crate::resource::ModelKey;
use super::{Entity, Light};

#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: Vec<Entity>,
    lights: Vec<Light>,
    camera: Camera,
}

impl Scene {
    /// Create an empty scene seen through `camera`
    pub fn new(camera: Camera) -> Self {
        Self {
            entities: Vec::new(),
            lights: Vec::new(),
            camera,
        }
    }

    // ===== ENTITIES =====

    /// Place `model` in the world, returning the entity index
    pub fn add_entity(&mut self, model: ModelKey, world_transform: Mat4) -> usize {
        self.entities.push(Entity::new(model, world_transform));
        self.entities.len() - 1
    }

    /// Remove an entity; later entities shift down by one
    pub fn remove_entity(&mut self, index: usize) -> Option<Entity> {
        if index < self.entities.len() {
            Some(self.entities.remove(index))
        } else {
            None
        }
    }

    pub fn entity(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn entity_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // ===== LIGHTS =====

    pub fn add_light(&mut self, light: Light) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    pub fn remove_light(&mut self, index: usize) -> Option<Light> {
        if index < self.lights.len() {
            Some(self.lights.remove(index))
        } else {
            None
        }
    }

    pub fn light_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    // ===== CAMERA =====

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Remove every entity and light; the camera is kept
    pub fn clear(&mut self) {
        self.entities.clear();
        self.lights.clear();
    }

    /// Entities (mutable, for block assignment) alongside lights and camera
    pub(crate) fn split_for_packing(&mut self) -> (&mut [Entity], &[Light], &Camera) {
        (&mut self.entities, &self.lights, &self.camera)
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;

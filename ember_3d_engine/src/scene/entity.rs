/// Entity — a model placed in the world.
///
/// The world transform set by the caller is the one uploaded every frame.
/// `block` locates the entity's parameters in the shared uniform buffer and
/// is rewritten by the frame packer on each frame.

use glam::Mat4;
use crate::frame::BlockRange;
use crate::resource::ModelKey;

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    world_transform: Mat4,
    model: ModelKey,
    block: BlockRange,
}

impl Entity {
    pub fn new(model: ModelKey, world_transform: Mat4) -> Self {
        Self {
            world_transform,
            model,
            block: BlockRange::default(),
        }
    }

    pub fn world_transform(&self) -> &Mat4 {
        &self.world_transform
    }

    pub fn set_world_transform(&mut self, world_transform: Mat4) {
        self.world_transform = world_transform;
    }

    pub fn model(&self) -> ModelKey {
        self.model
    }

    /// Range of this entity's parameters in the uniform buffer, as of the last packed frame
    pub fn block(&self) -> BlockRange {
        self.block
    }

    pub(crate) fn set_block(&mut self, block: BlockRange) {
        self.block = block;
    }
}

//! Scene module
//!
//! A scene is a flat list of entities and lights plus the camera they are
//! seen through. It owns no GPU resources: entities reference models from
//! the `ResourceManager` by key.

mod entity;
mod light;
mod scene;

pub use entity::Entity;
pub use light::{Light, LightType};
pub use scene::Scene;

/// Scene lights

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// Infinitely distant light; only `direction` is meaningful
    Directional,
    /// Omnidirectional light; only `position` is meaningful
    Point,
}

impl LightType {
    /// Tag written into the uniform buffer and read by the shaders
    pub fn type_tag(self) -> u32 {
        match self {
            LightType::Directional => 0,
            LightType::Point => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub light_type: LightType,
    pub color: Vec3,
    pub direction: Vec3,
    pub position: Vec3,
}

impl Light {
    pub fn directional(color: Vec3, direction: Vec3) -> Self {
        Self {
            light_type: LightType::Directional,
            color,
            direction: direction.normalize_or_zero(),
            position: Vec3::ZERO,
        }
    }

    pub fn point(color: Vec3, position: Vec3) -> Self {
        Self {
            light_type: LightType::Point,
            color,
            direction: Vec3::ZERO,
            position,
        }
    }
}

/// Camera — passive data container.
///
/// The caller computes the view and projection matrices and the eye
/// position; the camera stores them for the frame packer. `look_at()` is
/// provided for the common perspective case.

use glam::{Mat4, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl Camera {
    /// Create a camera from precomputed matrices.
    pub fn new(position: Vec3, view: Mat4, projection: Mat4) -> Self {
        Self {
            position,
            view_matrix: view,
            projection_matrix: projection,
        }
    }

    /// Right-handed perspective camera at `position` looking at `target`.
    ///
    /// `fov_y` is in radians; depth maps to [0, 1].
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3, fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::new(
            position,
            Mat4::look_at_rh(position, target, up),
            Mat4::perspective_rh(fov_y, aspect, near, far),
        )
    }

    // ===== GETTERS =====

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    // ===== SETTERS — store, compute nothing =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }
}

impl Default for Camera {
    /// Camera at the origin with identity matrices
    fn default() -> Self {
        Self::new(Vec3::ZERO, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;

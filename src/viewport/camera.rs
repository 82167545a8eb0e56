use glam::{Mat4, Vec3};

use crate::traits::SurfaceSize;

/// Perspective camera looking at `target`
///
/// The aspect ratio follows the surface size; degenerate sizes keep the last
/// valid ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    aspect: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, near: f32, far: f32, size: SurfaceSize) -> Self {
        Self {
            fov_y_degrees,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            aspect: size.aspect().unwrap_or(1.0),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Updates the aspect ratio. Returns false when `size` was ignored.
    pub fn set_size(&mut self, size: SurfaceSize) -> bool {
        match size.aspect() {
            Some(aspect) => {
                self.aspect = aspect;
                true
            }
            None => false,
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

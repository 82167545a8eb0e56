use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

use super::PerspectiveCamera;
use crate::shapes::OrbitSettings;

const EPS: f32 = 1e-6;

/// Camera offset from the target in spherical coordinates.
///
/// `theta` is the azimuth around +Y measured from +Z, `phi` the polar angle
/// from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius <= EPS {
            return Self { radius: 0.0, theta: 0.0, phi: 0.0 };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let ring = self.phi.sin() * self.radius;
        Vec3::new(ring * self.theta.sin(), self.phi.cos() * self.radius, ring * self.theta.cos())
    }
}

/// Orbit-style camera control: drag to rotate around the target, wheel to
/// dolly. Panning is not supported.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub settings: OrbitSettings,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    drag_from: Option<Vec2>,
}

impl OrbitControls {
    pub fn new(settings: OrbitSettings) -> Self {
        Self {
            target: Vec3::ZERO,
            settings,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            drag_from: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn pointer_down(&mut self, position: Vec2) {
        self.drag_from = Some(position);
    }

    pub fn pointer_up(&mut self) {
        self.drag_from = None;
    }

    /// Rotates by the drag distance; a full viewport height is one full turn
    pub fn pointer_move(&mut self, position: Vec2, viewport_height: f32) {
        let Some(from) = self.drag_from else {
            return;
        };
        let delta = (position - from) * self.rotate_speed;
        let height = viewport_height.max(1.0);

        self.delta_theta -= TAU * delta.x / height;
        self.delta_phi -= TAU * delta.y / height;
        self.drag_from = Some(position);
    }

    /// Negative `delta_y` (wheel up) moves closer
    pub fn wheel(&mut self, delta_y: f32) {
        let zoom = 0.95_f32.powf(self.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= zoom;
        } else if delta_y > 0.0 {
            self.scale /= zoom;
        }
    }

    /// Applies pending motion to `camera`. Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        match self.settings.damping {
            Some(factor) => {
                spherical.theta += self.delta_theta * factor;
                spherical.phi += self.delta_phi * factor;
            }
            None => {
                spherical.theta += self.delta_theta;
                spherical.phi += self.delta_phi;
            }
        }

        let max_polar = self.settings.max_polar_angle.min(PI);
        spherical.phi = spherical.phi.clamp(EPS, max_polar.max(EPS)).min(PI - EPS);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        let previous = camera.position;
        camera.position = self.target + spherical.to_offset();
        camera.target = self.target;

        match self.settings.damping {
            Some(factor) => {
                self.delta_theta *= 1.0 - factor;
                self.delta_phi *= 1.0 - factor;
            }
            None => {
                self.delta_theta = 0.0;
                self.delta_phi = 0.0;
            }
        }
        self.scale = 1.0;

        previous.distance_squared(camera.position) > EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SurfaceSize;
    use std::f32::consts::FRAC_PI_2;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, 0.1, 1000.0, SurfaceSize::new(800, 600))
    }

    #[test]
    fn spherical_round_trip() {
        let offset = Vec3::new(1.0, 2.0, 3.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!(back.abs_diff_eq(offset, 1e-5));
    }

    #[test]
    fn idle_update_keeps_camera() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(OrbitSettings::FREE);
        assert!(!controls.update(&mut camera));
        assert!(camera.position.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));
    }

    #[test]
    fn horizontal_drag_orbits_at_constant_distance() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(OrbitSettings::FREE);
        controls.pointer_down(Vec2::ZERO);
        controls.pointer_move(Vec2::new(150.0, 0.0), 600.0);
        assert!(controls.update(&mut camera));
        assert!((camera.position.length() - 5.0).abs() < 1e-4);
        // quarter turn: -π/2 azimuth puts the camera on -X
        assert!(camera.position.x < -4.9);
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(OrbitSettings::FREE);
        controls.pointer_move(Vec2::new(150.0, 40.0), 600.0);
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(OrbitSettings::DAMPED_UPPER_HEMISPHERE);
        controls.pointer_down(Vec2::ZERO);
        // drag up tilts the camera below the equator
        controls.pointer_move(Vec2::new(0.0, -300.0), 600.0);
        for _ in 0..50 {
            controls.update(&mut camera);
        }
        let phi = (camera.position.y / camera.position.length()).acos();
        assert!(phi <= FRAC_PI_2 + 1e-4);
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(OrbitSettings::DAMPED_UPPER_HEMISPHERE);
        controls.pointer_down(Vec2::ZERO);
        controls.pointer_move(Vec2::new(60.0, 0.0), 600.0);
        controls.pointer_up();
        assert!(controls.update(&mut camera));
        assert!(controls.update(&mut camera));
    }

    #[test]
    fn wheel_dollies() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(OrbitSettings::FREE);
        controls.wheel(-1.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 4.75).abs() < 1e-4);
        controls.wheel(1.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 5.0).abs() < 1e-4);
    }
}

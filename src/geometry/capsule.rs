use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

use super::{build_lathe, segments, MeshData};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleParams {
    pub radius: f32,
    pub length: f32,
    pub cap_segments: f32,
    pub radial_segments: f32,
}

impl Default for CapsuleParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            length: 4.0,
            cap_segments: 8.0,
            radial_segments: 16.0,
        }
    }
}

/// Half-profile: bottom quarter arc, straight side, top quarter arc.
///
/// Each arc uses `2 * cap_segments` steps; shared joint points are emitted
/// once.
fn capsule_profile(params: &CapsuleParams) -> Vec<Vec2> {
    let cap = segments(params.cap_segments, 1);
    let steps = cap * 2;
    let half = params.length * 0.5;
    let r = params.radius;

    let arc = |center_y: f32, start: f32, k: u32| {
        let angle = start + k as f32 / steps as f32 * FRAC_PI_2;
        Vec2::new(r * angle.cos(), center_y + r * angle.sin())
    };

    let mut points = Vec::with_capacity(steps as usize * 2 + 2);
    // from the south pole (angle 3π/2) up to the equator
    points.extend((0..=steps).map(|k| arc(-half, 3.0 * FRAC_PI_2, k)));
    // equator of the top arc doubles as the end of the straight side
    points.extend((0..=steps).map(|k| arc(half, 0.0, k)));

    points.dedup_by(|a, b| a.abs_diff_eq(*b, 1e-6));
    points
}

pub fn build_capsule(params: &CapsuleParams) -> MeshData {
    let profile = capsule_profile(params);
    build_lathe(&profile, segments(params.radial_segments, 3) as f32, 0.0, TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_spans_pole_to_pole() {
        let params = CapsuleParams::default();
        let profile = capsule_profile(&params);
        assert_eq!(profile.len(), 16 * 2 + 2);
        assert!((profile[0].y + 3.0).abs() < 1e-5);
        assert!((profile.last().unwrap().y - 3.0).abs() < 1e-5);
        assert!(profile[0].x.abs() < 1e-5);
    }

    #[test]
    fn zero_length_collapses_to_sphere_profile() {
        let params = CapsuleParams {
            length: 0.0,
            ..Default::default()
        };
        // equator points of both arcs coincide and are deduplicated
        assert_eq!(capsule_profile(&params).len(), 16 * 2 + 1);
    }

    #[test]
    fn capsule_bounds() {
        let mesh = build_capsule(&CapsuleParams::default());
        let bounds = mesh.bounds().unwrap();
        assert!((bounds.extent().y - 6.0).abs() < 1e-4);
        assert!((bounds.max.x - 1.0).abs() < 1e-4);
        assert_eq!(mesh.vertex_count(), 17 * 34);
    }
}

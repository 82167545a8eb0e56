use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

use super::{segments, MeshData};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusParams {
    pub radius: f32,
    pub tube: f32,
    pub radial_segments: f32,
    pub tubular_segments: f32,
    pub arc: f32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            radius: 5.0,
            tube: 2.0,
            radial_segments: 16.0,
            tubular_segments: 100.0,
            arc: TAU,
        }
    }
}

/// Ring torus lying in the XY plane
pub fn build_torus(params: &TorusParams) -> MeshData {
    let radial = segments(params.radial_segments, 2);
    let tubular = segments(params.tubular_segments, 3);

    let mut mesh = MeshData::default();

    for j in 0..=radial {
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * params.arc;
            let v = j as f32 / radial as f32 * TAU;

            let ring = params.radius + params.tube * v.cos();
            let position = Vec3::new(ring * u.cos(), ring * u.sin(), params.tube * v.sin());
            let center = Vec3::new(params.radius * u.cos(), params.radius * u.sin(), 0.0);

            mesh.push_vertex(
                position,
                (position - center).normalize_or_zero(),
                Vec2::new(i as f32 / tubular as f32, j as f32 / radial as f32),
            );
        }
    }

    let stride = tubular + 1;
    let start = mesh.indices.len();
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;

            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }
    mesh.close_group("surface", start);

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_torus_counts() {
        let mesh = build_torus(&TorusParams::default());
        assert_eq!(mesh.vertex_count(), 17 * 101);
        assert_eq!(mesh.triangle_count(), 16 * 100 * 2);
    }

    #[test]
    fn bounds_match_outer_radius() {
        let mesh = build_torus(&TorusParams::default());
        let bounds = mesh.bounds().unwrap();
        assert!((bounds.max.x - 7.0).abs() < 1e-4);
        assert!((bounds.max.z - 2.0).abs() < 0.05);
    }
}

use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

use super::{segments, MeshData};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusKnotParams {
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: f32,
    pub radial_segments: f32,
    pub p: f32,
    pub q: f32,
}

impl Default for TorusKnotParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tube: 0.4,
            tubular_segments: 100.0,
            radial_segments: 16.0,
            p: 3.0,
            q: 4.0,
        }
    }
}

/// Point on the (p, q) knot curve at parameter `u`
fn curve_point(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let (su, cu) = u.sin_cos();
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();

    Vec3::new(
        radius * (2.0 + cs) * 0.5 * cu,
        radius * (2.0 + cs) * su * 0.5,
        radius * qu_over_p.sin() * 0.5,
    )
}

/// Sweeps a circle of radius `tube` along a (p, q) torus knot
pub fn build_torus_knot(params: &TorusKnotParams) -> MeshData {
    let tubular = segments(params.tubular_segments, 3);
    let radial = segments(params.radial_segments, 3);
    let p = if params.p.abs() > f32::EPSILON { params.p } else { 1.0 };
    let q = params.q;

    let mut mesh = MeshData::default();

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * p * TAU;

        let p1 = curve_point(u, p, q, params.radius);
        let p2 = curve_point(u + 0.01, p, q, params.radius);

        // Frame from the tangent and the sum of neighbouring points
        let tangent = p2 - p1;
        let binormal = tangent.cross(p2 + p1);
        let normal = binormal.cross(tangent).normalize_or_zero();
        let binormal = binormal.normalize_or_zero();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -params.tube * v.cos();
            let cy = params.tube * v.sin();

            let position = p1 + normal * cx + binormal * cy;
            mesh.push_vertex(
                position,
                (position - p1).normalize_or_zero(),
                Vec2::new(i as f32 / tubular as f32, j as f32 / radial as f32),
            );
        }
    }

    let stride = radial + 1;
    let start = mesh.indices.len();
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = stride * (j - 1) + (i - 1);
            let b = stride * j + (i - 1);
            let c = stride * j + i;
            let d = stride * (j - 1) + i;

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
    fn default_knot_counts() {
        let mesh = build_torus_knot(&TorusKnotParams::default());
        assert_eq!(mesh.vertex_count(), 101 * 17);
        assert_eq!(mesh.triangle_count(), 100 * 16 * 2);
    }

    #[test]
    fn surface_stays_within_tube_of_curve() {
        let params = TorusKnotParams::default();
        let mesh = build_torus_knot(&params);
        let limit = params.radius * 1.5 + params.tube + 1e-3;
        for v in &mesh.vertices {
            assert!(v.position().length() <= limit);
        }
    }

    #[test]
    fn zero_p_does_not_produce_nan() {
        let mesh = build_torus_knot(&TorusKnotParams {
            p: 0.0,
            ..Default::default()
        });
        assert!(mesh.vertices.iter().all(|v| v.position().is_finite()));
    }
}

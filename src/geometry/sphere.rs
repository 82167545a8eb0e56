use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

use super::{segments, MeshData};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    pub radius: f32,
    pub width_segments: f32,
    pub height_segments: f32,
    pub phi_start: f32,
    pub phi_length: f32,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 16.0,
            height_segments: 8.0,
            phi_start: 0.0,
            phi_length: TAU,
            theta_start: 0.0,
            theta_length: PI,
        }
    }
}

/// Latitude/longitude sphere; pole rows emit a single triangle per cell.
pub fn build_sphere(params: &SphereParams) -> MeshData {
    let width = segments(params.width_segments, 3);
    let height = segments(params.height_segments, 2);
    let theta_end = (params.theta_start + params.theta_length).min(PI);

    let mut mesh = MeshData::default();
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(height as usize + 1);

    for iy in 0..=height {
        let v = iy as f32 / height as f32;

        // Shift pole UVs to the middle of their cell
        let u_offset = if iy == 0 && params.theta_start == 0.0 {
            0.5 / width as f32
        } else if iy == height && theta_end == PI {
            -0.5 / width as f32
        } else {
            0.0
        };

        let row = (0..=width)
            .map(|ix| {
                let u = ix as f32 / width as f32;
                let (sin_phi, cos_phi) = (params.phi_start + u * params.phi_length).sin_cos();
                let (sin_theta, cos_theta) = (params.theta_start + v * params.theta_length).sin_cos();

                let position = Vec3::new(
                    -params.radius * cos_phi * sin_theta,
                    params.radius * cos_theta,
                    params.radius * sin_phi * sin_theta,
                );
                mesh.push_vertex(
                    position,
                    position.normalize_or_zero(),
                    Vec2::new(u + u_offset, 1.0 - v),
                )
            })
            .collect();
        grid.push(row);
    }

    let start = mesh.indices.len();
    for iy in 0..height as usize {
        for ix in 0..width as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];

            if iy != 0 || params.theta_start > 0.0 {
                mesh.push_triangle(a, b, d);
            }
            if iy != height as usize - 1 || theta_end < PI {
                mesh.push_triangle(b, c, d);
            }
        }
    }
    mesh.close_group("surface", start);

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sphere_counts() {
        let mesh = build_sphere(&SphereParams::default());
        assert_eq!(mesh.vertex_count(), 17 * 9);
        // full rows contribute 2 triangles per cell, pole rows 1
        assert_eq!(mesh.triangle_count(), 16 * (2 * 8 - 2));
    }

    #[test]
    fn vertices_lie_on_radius() {
        let mesh = build_sphere(&SphereParams {
            radius: 2.5,
            ..Default::default()
        });
        for v in &mesh.vertices {
            assert!((v.position().length() - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn low_segment_input_is_raised_to_minimum() {
        let mesh = build_sphere(&SphereParams {
            width_segments: 1.0,
            height_segments: 1.0,
            ..Default::default()
        });
        assert_eq!(mesh.vertex_count(), 4 * 3);
    }
}

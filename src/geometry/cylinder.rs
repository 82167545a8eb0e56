use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

use super::{segments, MeshData};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: f32,
    pub height_segments: f32,
    pub open_ended: bool,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 2.0,
            radial_segments: 16.0,
            height_segments: 1.0,
            open_ended: false,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }
}

/// A cone is a cylinder whose top radius is zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeParams {
    pub radius: f32,
    pub height: f32,
    pub radial_segments: f32,
    pub height_segments: f32,
    pub open_ended: bool,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for ConeParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height: 2.0,
            radial_segments: 16.0,
            height_segments: 1.0,
            open_ended: false,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }
}

impl From<ConeParams> for CylinderParams {
    fn from(cone: ConeParams) -> Self {
        Self {
            radius_top: 0.0,
            radius_bottom: cone.radius,
            height: cone.height,
            radial_segments: cone.radial_segments,
            height_segments: cone.height_segments,
            open_ended: cone.open_ended,
            theta_start: cone.theta_start,
            theta_length: cone.theta_length,
        }
    }
}

pub fn build_cone(params: &ConeParams) -> MeshData {
    build_cylinder(&CylinderParams::from(*params))
}

/// Builds a Y-aligned cylinder centered on the origin.
///
/// Groups: `torso`, then `top_cap` / `bottom_cap` when closed and the
/// corresponding radius is non-zero.
pub fn build_cylinder(params: &CylinderParams) -> MeshData {
    let radial = segments(params.radial_segments, 3);
    let rows = segments(params.height_segments, 1);

    let mut mesh = MeshData::default();
    build_torso(&mut mesh, params, radial, rows);

    if !params.open_ended {
        if params.radius_top > 0.0 {
            build_cap(&mut mesh, params, radial, true);
        }
        if params.radius_bottom > 0.0 {
            build_cap(&mut mesh, params, radial, false);
        }
    }

    mesh
}

fn build_torso(mesh: &mut MeshData, params: &CylinderParams, radial: u32, rows: u32) {
    let half_height = params.height * 0.5;
    let slope = if params.height != 0.0 {
        (params.radius_bottom - params.radius_top) / params.height
    } else {
        0.0
    };

    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(rows as usize + 1);
    for y in 0..=rows {
        let v = y as f32 / rows as f32;
        let radius = v * (params.radius_bottom - params.radius_top) + params.radius_top;

        let row = (0..=radial)
            .map(|x| {
                let u = x as f32 / radial as f32;
                let theta = u * params.theta_length + params.theta_start;
                let (sin, cos) = theta.sin_cos();

                let position = Vec3::new(radius * sin, -v * params.height + half_height, radius * cos);
                let normal = Vec3::new(sin, slope, cos).normalize_or_zero();
                mesh.push_vertex(position, normal, Vec2::new(u, 1.0 - v))
            })
            .collect();
        grid.push(row);
    }

    let start = mesh.indices.len();
    for x in 0..radial as usize {
        for y in 0..rows as usize {
            let a = grid[y][x];
            let b = grid[y + 1][x];
            let c = grid[y + 1][x + 1];
            let d = grid[y][x + 1];

            // Skip the zero-area triangles at a collapsed apex
            if params.radius_top > 0.0 || y != 0 {
                mesh.push_triangle(a, b, d);
            }
            if params.radius_bottom > 0.0 || y != rows as usize - 1 {
                mesh.push_triangle(b, c, d);
            }
        }
    }
    mesh.close_group("torso", start);
}

fn build_cap(mesh: &mut MeshData, params: &CylinderParams, radial: u32, top: bool) {
    let (radius, sign, label) = if top {
        (params.radius_top, 1.0, "top_cap")
    } else {
        (params.radius_bottom, -1.0, "bottom_cap")
    };
    let y = params.height * 0.5 * sign;
    let normal = Vec3::new(0.0, sign, 0.0);

    // One center vertex per segment so each wedge gets its own UV
    let center_start = mesh.vertices.len() as u32;
    for _ in 0..radial {
        mesh.push_vertex(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5));
    }

    let rim_start = mesh.vertices.len() as u32;
    for x in 0..=radial {
        let u = x as f32 / radial as f32;
        let theta = u * params.theta_length + params.theta_start;
        let (sin, cos) = theta.sin_cos();
        mesh.push_vertex(
            Vec3::new(radius * sin, y, radius * cos),
            normal,
            Vec2::new(cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5),
        );
    }

    let start = mesh.indices.len();
    for x in 0..radial {
        let center = center_start + x;
        let rim = rim_start + x;
        if top {
            mesh.push_triangle(rim, rim + 1, center);
        } else {
            mesh.push_triangle(rim + 1, rim, center);
        }
    }
    mesh.close_group(label, start);
}

use glam::{Vec2, Vec3};

use super::{segments, MeshData};

/// Revolves a 2D profile (x = distance from the Y axis, y = height) around Y.
///
/// Profile normals are derived from neighbouring segments so the caller only
/// supplies points.
pub fn build_lathe(profile: &[Vec2], radial_segments: f32, phi_start: f32, phi_length: f32) -> MeshData {
    let mut mesh = MeshData::default();
    if profile.len() < 2 {
        return mesh;
    }

    let radial = segments(radial_segments, 1);
    let normals = profile_normals(profile);
    let last = profile.len() - 1;

    for i in 0..=radial {
        let phi = phi_start + i as f32 / radial as f32 * phi_length;
        let (sin, cos) = phi.sin_cos();

        for (j, (point, normal)) in profile.iter().zip(&normals).enumerate() {
            mesh.push_vertex(
                Vec3::new(point.x * sin, point.y, point.x * cos),
                Vec3::new(normal.x * sin, normal.y, normal.x * cos),
                Vec2::new(i as f32 / radial as f32, j as f32 / last as f32),
            );
        }
    }

    let stride = profile.len() as u32;
    let start = mesh.indices.len();
    for i in 0..radial {
        for j in 0..last as u32 {
            let base = j + i * stride;
            let a = base;
            let b = base + stride;
            let c = base + stride + 1;
            let d = base + 1;

            mesh.push_triangle(a, b, d);
            mesh.push_triangle(c, d, b);
        }
    }
    mesh.close_group("surface", start);

    mesh
}

fn profile_normals(profile: &[Vec2]) -> Vec<Vec2> {
    let segment_normal = |j: usize| {
        let delta = profile[j + 1] - profile[j];
        Vec2::new(delta.y, -delta.x)
    };

    let last = profile.len() - 1;
    (0..profile.len())
        .map(|j| {
            let n = if j == 0 {
                segment_normal(0)
            } else if j == last {
                segment_normal(last - 1)
            } else {
                segment_normal(j - 1) + segment_normal(j)
            };
            n.normalize_or_zero()
        })
        .collect()
}

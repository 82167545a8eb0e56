use glam::{Vec2, Vec3};

use super::{segments, MeshData};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxParams {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub width_segments: f32,
    pub height_segments: f32,
    pub depth_segments: f32,
}

impl Default for BoxParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            width_segments: 1.0,
            height_segments: 1.0,
            depth_segments: 1.0,
        }
    }
}

/// One face of the box, spanned by axes `u` and `v` and pushed out along `w`
struct Face {
    label: &'static str,
    axes: [usize; 3],
    u_dir: f32,
    v_dir: f32,
    size: [f32; 3],
    grid: [u32; 2],
}

pub fn build_box(params: &BoxParams) -> MeshData {
    let (w, h, d) = (params.width, params.height, params.depth);
    let ws = segments(params.width_segments, 1);
    let hs = segments(params.height_segments, 1);
    let ds = segments(params.depth_segments, 1);

    const X: usize = 0;
    const Y: usize = 1;
    const Z: usize = 2;

    let faces = [
        Face { label: "px", axes: [Z, Y, X], u_dir: -1.0, v_dir: -1.0, size: [d, h, w], grid: [ds, hs] },
        Face { label: "nx", axes: [Z, Y, X], u_dir: 1.0, v_dir: -1.0, size: [d, h, -w], grid: [ds, hs] },
        Face { label: "py", axes: [X, Z, Y], u_dir: 1.0, v_dir: 1.0, size: [w, d, h], grid: [ws, ds] },
        Face { label: "ny", axes: [X, Z, Y], u_dir: 1.0, v_dir: -1.0, size: [w, d, -h], grid: [ws, ds] },
        Face { label: "pz", axes: [X, Y, Z], u_dir: 1.0, v_dir: -1.0, size: [w, h, d], grid: [ws, hs] },
        Face { label: "nz", axes: [X, Y, Z], u_dir: -1.0, v_dir: -1.0, size: [w, h, -d], grid: [ws, hs] },
    ];

    let mut mesh = MeshData::default();
    for face in &faces {
        build_face(&mut mesh, face);
    }
    mesh
}

fn build_face(mesh: &mut MeshData, face: &Face) {
    let [u, v, w] = face.axes;
    let [width, height, depth] = face.size;
    let [grid_x, grid_y] = face.grid;

    let segment_width = width / grid_x as f32;
    let segment_height = height / grid_y as f32;
    let depth_half = depth * 0.5;

    let first = mesh.vertices.len() as u32;
    for iy in 0..=grid_y {
        let y = iy as f32 * segment_height - height * 0.5;
        for ix in 0..=grid_x {
            let x = ix as f32 * segment_width - width * 0.5;

            let mut position = [0.0; 3];
            position[u] = x * face.u_dir;
            position[v] = y * face.v_dir;
            position[w] = depth_half;

            let mut normal = [0.0; 3];
            normal[w] = if depth > 0.0 { 1.0 } else { -1.0 };

            mesh.push_vertex(
                Vec3::from_array(position),
                Vec3::from_array(normal),
                Vec2::new(ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32),
            );
        }
    }

    let row = grid_x + 1;
    let start = mesh.indices.len();
    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = first + ix + row * iy;
            let b = first + ix + row * (iy + 1);
            let c = first + ix + 1 + row * (iy + 1);
            let d = first + ix + 1 + row * iy;

            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }
    mesh.close_group(face.label, start);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_has_six_quads() {
        let mesh = build_box(&BoxParams::default());
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.groups.len(), 6);
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.extent(), Vec3::ONE);
    }

    #[test]
    fn face_normals_point_outward() {
        let mesh = build_box(&BoxParams {
            width: 2.0,
            height: 3.0,
            depth: 4.0,
            ..Default::default()
        });
        for v in &mesh.vertices {
            assert!(v.position().dot(v.normal()) > 0.0);
        }
    }

    #[test]
    fn segmented_faces_split_into_grids() {
        let mesh = build_box(&BoxParams {
            width_segments: 2.0,
            height_segments: 3.0,
            depth_segments: 4.0,
            ..Default::default()
        });
        assert_eq!(mesh.group("pz").unwrap().triangle_count(), 2 * 3 * 2);
        assert_eq!(mesh.group("px").unwrap().triangle_count(), 4 * 3 * 2);
        assert_eq!(mesh.group("py").unwrap().triangle_count(), 2 * 4 * 2);
    }
}

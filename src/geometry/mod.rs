//! Procedural mesh generators for the preview primitives
//!
//! Every generator is a pure function of its parameter struct and produces an
//! indexed triangle list with per-vertex normals and UVs. Named index ranges
//! (`MeshGroup`) mark the structural parts of a mesh, e.g. a cylinder's torso
//! and its caps.

mod box_geometry;
mod capsule;
mod cylinder;
mod lathe;
mod sphere;
mod torus;
mod torus_knot;

pub use box_geometry::{build_box, BoxParams};
pub use capsule::{build_capsule, CapsuleParams};
pub use cylinder::{build_cone, build_cylinder, ConeParams, CylinderParams};
pub use lathe::build_lathe;
pub use sphere::{build_sphere, SphereParams};
pub use torus::{build_torus, TorusParams};
pub use torus_knot::{build_torus_knot, TorusKnotParams};

use glam::{Vec2, Vec3};
use std::collections::HashSet;

use crate::math::Aabb;

/// Vertex layout shared with the mesh shader
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Contiguous range of the index buffer belonging to one structural part
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshGroup {
    pub label: &'static str,
    pub start: usize,
    pub count: usize,
}

impl MeshGroup {
    pub fn triangle_count(&self) -> usize {
        self.count / 3
    }
}

/// CPU-side geometry produced by a generator
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub groups: Vec<MeshGroup>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(Vertex::position))
    }

    pub fn group(&self, label: &str) -> Option<&MeshGroup> {
        self.groups.iter().find(|g| g.label == label)
    }

    /// Unique triangle edges as a line list, used for wireframe drawing
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut seen = HashSet::with_capacity(self.indices.len());
        let mut lines = Vec::with_capacity(self.indices.len() * 2);

        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                if a != b && seen.insert(key) {
                    lines.push(a);
                    lines.push(b);
                }
            }
        }

        lines
    }

    /// Appends a group covering every index pushed since `start`
    fn close_group(&mut self, label: &'static str, start: usize) {
        let count = self.indices.len() - start;
        self.groups.push(MeshGroup { label, start, count });
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        self.vertices.push(Vertex::new(position, normal, uv));
        (self.vertices.len() - 1) as u32
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }
}

/// Rounds a slider value to a segment count no lower than `min`
pub(crate) fn segments(value: f32, min: u32) -> u32 {
    if value.is_finite() {
        (value.round().max(0.0) as u32).max(min)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        let mut mesh = MeshData::default();
        let a = mesh.push_vertex(Vec3::new(0.0, 0.0, 0.0), Vec3::Z, Vec2::ZERO);
        let b = mesh.push_vertex(Vec3::new(1.0, 0.0, 0.0), Vec3::Z, Vec2::X);
        let c = mesh.push_vertex(Vec3::new(1.0, 1.0, 0.0), Vec3::Z, Vec2::ONE);
        let d = mesh.push_vertex(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, Vec2::Y);
        mesh.push_triangle(a, b, c);
        mesh.push_triangle(a, c, d);
        mesh.close_group("quad", 0);
        mesh
    }

    #[test]
    fn wireframe_dedups_shared_edges() {
        let mesh = quad();
        // 4 outer edges + 1 diagonal
        assert_eq!(mesh.wireframe_indices().len(), 5 * 2);
    }

    #[test]
    fn wireframe_skips_degenerate_edges() {
        let mut mesh = quad();
        mesh.push_triangle(0, 0, 1);
        assert_eq!(mesh.wireframe_indices().len(), 5 * 2);
    }

    #[test]
    fn group_lookup_and_counts() {
        let mesh = quad();
        let group = mesh.group("quad").unwrap();
        assert_eq!(group.triangle_count(), 2);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.group("missing").is_none());
    }

    #[test]
    fn segments_rounds_and_clamps() {
        assert_eq!(segments(2.6, 1), 3);
        assert_eq!(segments(0.0, 3), 3);
        assert_eq!(segments(-4.0, 1), 1);
        assert_eq!(segments(f32::NAN, 2), 2);
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::{Point3, Vector3};

/// Triangle mesh
///
/// `uvs` is either empty (no UV channel) or holds one pair per vertex.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Texture coordinates (u, v)
    pub uvs: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            uvs: Vec::with_capacity(vertex_count * 2),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Axis-aligned box centered on `center`
    ///
    /// Four vertices per face so every face keeps a flat normal and its own
    /// UV square.
    pub fn cuboid(center: Point3<f64>, size: Vector3<f64>) -> Self {
        let h = size * 0.5;
        let mut mesh = Mesh::with_capacity(24, 36);

        // (normal, u axis, v axis); u x v = normal keeps CCW winding outward
        let faces = [
            (Vector3::x(), Vector3::new(0.0, 0.0, -1.0), Vector3::y()),
            (-Vector3::x(), Vector3::z(), Vector3::y()),
            (Vector3::y(), Vector3::x(), Vector3::new(0.0, 0.0, -1.0)),
            (-Vector3::y(), Vector3::x(), Vector3::z()),
            (Vector3::z(), Vector3::x(), Vector3::y()),
            (-Vector3::z(), -Vector3::x(), Vector3::y()),
        ];

        for (normal, u, v) in faces {
            let base = mesh.vertex_count() as u32;
            let face_center = center + normal.component_mul(&h);
            let du = u.component_mul(&h);
            let dv = v.component_mul(&h);
            let su = (u.component_mul(&size)).norm();
            let sv = (v.component_mul(&size)).norm();

            mesh.add_vertex_uv(face_center - du - dv, normal, 0.0, 0.0);
            mesh.add_vertex_uv(face_center + du - dv, normal, su, 0.0);
            mesh.add_vertex_uv(face_center + du + dv, normal, su, sv);
            mesh.add_vertex_uv(face_center - du + dv, normal, 0.0, sv);

            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }

        mesh
    }

    /// Add a vertex with normal
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);

        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
    }

    /// Add a vertex with normal and texture coordinate
    #[inline]
    pub fn add_vertex_uv(&mut self, position: Point3<f64>, normal: Vector3<f64>, u: f64, v: f64) {
        self.add_vertex(position, normal);
        self.uvs.push(u as f32);
        self.uvs.push(v as f32);
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Whether every vertex carries a UV pair
    #[inline]
    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty() && self.uvs.len() / 2 == self.vertex_count()
    }

    /// Merge another mesh into this one
    ///
    /// When only one side has UVs the other side is padded with zeros so
    /// the channel stays aligned with the vertices.
    #[inline]
    pub fn merge(&mut self, other: &Mesh) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = (self.positions.len() / 3) as u32;
        let keep_uvs = self.has_uvs() || self.is_empty() || other.has_uvs();

        if keep_uvs && !self.has_uvs() {
            self.uvs.resize(self.vertex_count() * 2, 0.0);
        }

        self.positions.reserve(other.positions.len());
        self.normals.reserve(other.normals.len());
        self.indices.reserve(other.indices.len());

        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);

        if keep_uvs {
            if other.has_uvs() {
                self.uvs.extend_from_slice(&other.uvs);
            } else {
                self.uvs.resize(self.vertex_count() * 2, 0.0);
            }
        }

        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of vertex `index` in f64
    #[inline]
    pub fn vertex(&self, index: usize) -> Point3<f64> {
        Point3::new(
            self.positions[index * 3] as f64,
            self.positions[index * 3 + 1] as f64,
            self.positions[index * 3 + 2] as f64,
        )
    }

    /// Iterate triangles as vertex index triples
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Calculate bounds (min, max) - optimized with chunk iteration
    #[inline]
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            let (x, y, z) = (chunk[0], chunk[1], chunk[2]);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        (min, max)
    }

    /// Total surface area of all triangles
    pub fn surface_area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| {
                let (v0, v1, v2) = (self.vertex(a), self.vertex(b), self.vertex(c));
                (v1 - v0).cross(&(v2 - v0)).norm() * 0.5
            })
            .sum()
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-face normals for an unindexed triangle soup
///
/// Every consecutive triple of vertices is one triangle; all three vertices
/// receive that triangle's normal. Degenerate triangles get a zero normal.
pub fn flat_normals(positions: &[f32]) -> Vec<f32> {
    let mut normals = Vec::with_capacity(positions.len());

    for tri in positions.chunks_exact(9) {
        let v0 = Vector3::new(tri[0] as f64, tri[1] as f64, tri[2] as f64);
        let v1 = Vector3::new(tri[3] as f64, tri[4] as f64, tri[5] as f64);
        let v2 = Vector3::new(tri[6] as f64, tri[7] as f64, tri[8] as f64);

        let normal = (v1 - v0)
            .cross(&(v2 - v0))
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros);

        for _ in 0..3 {
            normals.push(normal.x as f32);
            normals.push(normal.y as f32);
            normals.push(normal.z as f32);
        }
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(!mesh.has_uvs());
    }

    #[test]
    fn test_add_vertex() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0]);
        assert_eq!(mesh.normals, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_merge_pads_missing_uvs() {
        let mut with_uvs = Mesh::new();
        with_uvs.add_vertex_uv(Point3::origin(), Vector3::z(), 0.5, 0.5);

        let mut without = Mesh::new();
        without.add_vertex(Point3::new(1.0, 1.0, 1.0), Vector3::y());
        without.add_triangle(0, 0, 0);

        with_uvs.merge(&without);
        assert_eq!(with_uvs.vertex_count(), 2);
        assert!(with_uvs.has_uvs());
        assert_eq!(with_uvs.uvs, vec![0.5, 0.5, 0.0, 0.0]);
        assert_eq!(with_uvs.indices, vec![1, 1, 1]);
    }

    #[test]
    fn test_cuboid() {
        let mesh = Mesh::cuboid(Point3::new(1.0, 2.0, 3.0), Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.has_uvs());

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.x, 0.0);
        assert_relative_eq!(max.y, 4.0);
        assert_relative_eq!(max.z, 6.0);
        assert_relative_eq!(mesh.surface_area(), 2.0 * (8.0 + 12.0 + 24.0), epsilon = 1e-6);
    }

    #[test]
    fn test_cuboid_winding_matches_normals() {
        let mesh = Mesh::cuboid(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        for [a, b, c] in mesh.triangles() {
            let (v0, v1, v2) = (mesh.vertex(a), mesh.vertex(b), mesh.vertex(c));
            let geometric = (v1 - v0).cross(&(v2 - v0));
            let stored = Vector3::new(
                mesh.normals[a * 3] as f64,
                mesh.normals[a * 3 + 1] as f64,
                mesh.normals[a * 3 + 2] as f64,
            );
            assert!(geometric.dot(&stored) > 0.0);
        }
    }

    #[test]
    fn test_flat_normals() {
        let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let normals = flat_normals(&positions);
        assert_eq!(normals, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    }
}

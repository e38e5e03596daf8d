// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D profiles to 3D meshes
//!
//! Profiles are extruded along local +Z. Caps carry planar UVs (profile X/Y),
//! side walls carry (running boundary length, height) so textures tile along
//! the wall without stretching.

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::{Profile2D, Triangulation};
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Triangles below this doubled area are dropped from caps
const DEGENERATE_CAP_AREA: f64 = 1e-14;

/// Extrude a 2D profile along the Z axis
///
/// The profile is normalized first (closing duplicates stripped, outer CCW,
/// holes CW) so callers may pass either winding.
#[inline]
pub fn extrude_profile(
    profile: &Profile2D,
    depth: f64,
    transform: Option<Matrix4<f64>>,
) -> Result<Mesh> {
    if !(depth > 0.0) {
        return Err(Error::InvalidExtrusion(format!(
            "Depth must be positive, got {}",
            depth
        )));
    }

    let profile = profile.normalized();
    let triangulation = profile.triangulate()?;

    let boundary_points =
        profile.outer.len() + profile.holes.iter().map(|h| h.len()).sum::<usize>();
    let mut mesh = Mesh::with_capacity(
        triangulation.points.len() * 2 + boundary_points * 4,
        triangulation.indices.len() * 2 + boundary_points * 6,
    );

    create_cap_mesh(&triangulation, 0.0, false, &mut mesh);
    create_cap_mesh(&triangulation, depth, true, &mut mesh);

    create_side_walls(&profile.outer, depth, &mut mesh);
    for hole in &profile.holes {
        create_side_walls(hole, depth, &mut mesh);
    }

    if let Some(mat) = transform {
        apply_transform(&mut mesh, &mat);
    }

    Ok(mesh)
}

/// Create a cap mesh (top or bottom) from triangulation
///
/// Each triangle is wound by its own signed area so the cap faces +Z on top
/// and −Z at the bottom regardless of earcut's output order.
#[inline]
fn create_cap_mesh(triangulation: &Triangulation, z: f64, top: bool, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;
    let normal = if top {
        Vector3::new(0.0, 0.0, 1.0)
    } else {
        Vector3::new(0.0, 0.0, -1.0)
    };

    for point in &triangulation.points {
        mesh.add_vertex_uv(Point3::new(point.x, point.y, z), normal, point.x, point.y);
    }

    for tri in triangulation.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let doubled = cross_2d(
            &triangulation.points[a],
            &triangulation.points[b],
            &triangulation.points[c],
        );
        if doubled.abs() < DEGENERATE_CAP_AREA {
            continue;
        }

        let (i0, i1, i2) = (
            base_index + a as u32,
            base_index + b as u32,
            base_index + c as u32,
        );
        if (doubled > 0.0) == top {
            mesh.add_triangle(i0, i1, i2);
        } else {
            mesh.add_triangle(i0, i2, i1);
        }
    }
}

#[inline]
fn cross_2d(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Create side walls for a profile boundary
///
/// Expects outer loops CCW and hole loops CW; the edge normal `(dy, -dx)`
/// then points away from the solid in both cases.
#[inline]
fn create_side_walls(boundary: &[Point2<f64>], depth: f64, mesh: &mut Mesh) {
    let mut run = 0.0;

    for i in 0..boundary.len() {
        let j = (i + 1) % boundary.len();

        let p0 = &boundary[i];
        let p1 = &boundary[j];

        // Use try_normalize to handle degenerate edges (duplicate consecutive points)
        let edge = Vector3::new(p1.x - p0.x, p1.y - p0.y, 0.0);
        let normal = match Vector3::new(edge.y, -edge.x, 0.0).try_normalize(1e-10) {
            Some(n) => n,
            None => continue,
        };
        let length = edge.norm();

        let idx = mesh.vertex_count() as u32;
        mesh.add_vertex_uv(Point3::new(p0.x, p0.y, 0.0), normal, run, 0.0);
        mesh.add_vertex_uv(Point3::new(p1.x, p1.y, 0.0), normal, run + length, 0.0);
        mesh.add_vertex_uv(Point3::new(p1.x, p1.y, depth), normal, run + length, depth);
        mesh.add_vertex_uv(Point3::new(p0.x, p0.y, depth), normal, run, depth);

        mesh.add_triangle(idx, idx + 1, idx + 2);
        mesh.add_triangle(idx, idx + 2, idx + 3);

        run += length;
    }
}

/// Apply transformation matrix to mesh
#[inline]
pub fn apply_transform(mesh: &mut Mesh, transform: &Matrix4<f64>) {
    // Transform positions using chunk-based iteration for cache locality
    mesh.positions.chunks_exact_mut(3).for_each(|chunk| {
        let point = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = transform.transform_point(&point);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });

    // Transform normals (use inverse transpose for correct normal transformation)
    let normal_matrix = transform.try_inverse().unwrap_or(*transform).transpose();

    mesh.normals.chunks_exact_mut(3).for_each(|chunk| {
        let normal = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = (normal_matrix * normal.to_homogeneous())
            .xyz()
            .try_normalize(1e-12)
            .unwrap_or(normal);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rectangle(w: f64, h: f64) -> Profile2D {
        Profile2D::rectangle(Point2::new(-w / 2.0, -h / 2.0), Point2::new(w / 2.0, h / 2.0))
    }

    fn assert_winding_matches_normals(mesh: &Mesh) {
        for [a, b, c] in mesh.triangles() {
            let (v0, v1, v2) = (mesh.vertex(a), mesh.vertex(b), mesh.vertex(c));
            let geometric = (v1 - v0).cross(&(v2 - v0));
            let stored = Vector3::new(
                mesh.normals[a * 3] as f64,
                mesh.normals[a * 3 + 1] as f64,
                mesh.normals[a * 3 + 2] as f64,
            );
            assert!(geometric.dot(&stored) > 0.0, "triangle {a},{b},{c} wound inward");
        }
    }

    #[test]
    fn test_extrude_rectangle() {
        let mesh = extrude_profile(&rectangle(10.0, 5.0), 20.0, None).unwrap();

        // 2 caps x 2 triangles + 4 sides x 2 triangles
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.has_uvs());

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.x, -5.0);
        assert_relative_eq!(max.x, 5.0);
        assert_relative_eq!(min.y, -2.5);
        assert_relative_eq!(max.y, 2.5);
        assert_relative_eq!(min.z, 0.0);
        assert_relative_eq!(max.z, 20.0);
        assert_relative_eq!(mesh.surface_area(), 2.0 * (50.0 + 200.0 + 100.0), epsilon = 1e-3);
    }

    #[test]
    fn test_extrude_cw_input_is_normalized() {
        let mut profile = rectangle(2.0, 2.0);
        profile.outer.reverse();
        let mesh = extrude_profile(&profile, 1.0, None).unwrap();
        assert_winding_matches_normals(&mesh);
    }

    #[test]
    fn test_extrude_with_hole_faces_outward() {
        let mut profile = rectangle(10.0, 10.0);
        profile.add_hole(vec![
            Point2::new(-1.0, -1.0),
            Point2::new(1.0, -1.0),
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
        ]);
        let mesh = extrude_profile(&profile, 3.0, None).unwrap();
        assert_winding_matches_normals(&mesh);

        // Hole wall normal at x = 1 must point toward the void (-X)
        let inner_wall = (0..mesh.vertex_count()).find(|&i| {
            let v = mesh.vertex(i);
            (v.x - 1.0).abs() < 1e-6 && mesh.normals[i * 3].abs() > 0.9
        });
        let i = inner_wall.unwrap();
        assert!(mesh.normals[i * 3] < 0.0);
    }

    #[test]
    fn test_side_uvs_follow_boundary_length() {
        let mesh = extrude_profile(&rectangle(4.0, 2.0), 3.0, None).unwrap();
        let max_u = mesh
            .uvs
            .chunks_exact(2)
            .map(|uv| uv[0])
            .fold(f32::MIN, f32::max);
        // Perimeter 12
        assert_relative_eq!(max_u, 12.0, epsilon = 1e-5);
    }

    #[test]
    fn test_extrude_with_transform() {
        let transform = Matrix4::new_translation(&Vector3::new(100.0, 200.0, 300.0));
        let mesh = extrude_profile(&rectangle(10.0, 5.0), 20.0, Some(transform)).unwrap();

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.x, 95.0);
        assert_relative_eq!(max.y, 202.5);
        assert_relative_eq!(max.z, 320.0);
    }

    #[test]
    fn test_invalid_depth() {
        let profile = rectangle(10.0, 5.0);
        assert!(matches!(
            extrude_profile(&profile, -1.0, None),
            Err(Error::InvalidExtrusion(_))
        ));
        assert!(extrude_profile(&profile, 0.0, None).is_err());
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall triangle classification and shell carving
//!
//! The extruded shell is a closed ring. Front/rear walls and side-facade
//! walls are rebuilt as separate panels with openings, so the shell
//! triangles lying on those planes are removed here. Classification runs in
//! world space; kept triangles are copied out in the shell's local frame as
//! an unindexed soup with per-face normals.
//!
//! Removal rules, first match wins:
//!
//! 1. Z-facing triangles on the front/rear outer or inner plane
//! 2. (facade role) X-facing triangles on a side profile segment's outer or
//!    inner plane, overlapping the segment's Z range
//! 3. triangles on the left facade's outer or inner plane resolved at the
//!    triangle's mean Z, in every role
//! 4. triangles inside an opening's box through the wall

use crate::envelope::EnvelopeBounds;
use crate::extension::ExtensionWall;
use crate::facade_context::FacadeContext;
use crate::facade_profile::FacadeProfile;
use crate::mesh::{flat_normals, Mesh};
use crate::opening::OpeningCut;
use crate::shell::ExtrudedShell;
use crate::transform::Placement;
use houseforge_core::constants::{AXIS_FACING_THRESHOLD, PLANE_TOLERANCE};
use houseforge_core::FacadeId;
use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashMap;

/// Whether triangles on the extension's own side wall are spared from removal.
///
/// Left off: extension-band matches fall through to the regular rules. The
/// band test still runs and is traced so the behaviour can be audited before
/// anyone switches this on.
const EXTENSION_SIDE_WALL_EXCLUSION: bool = false;

/// What the shell is being built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShellRole {
    /// Side walls are replaced by facade panels
    #[default]
    Facade,
    /// Load-bearing shell; only the left facade surface is removed
    Structure,
}

impl ShellRole {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "facade" => Some(ShellRole::Facade),
            "structure" => Some(ShellRole::Structure),
            _ => None,
        }
    }
}

/// Logical wall face of a shell triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WallClass {
    RearOuter,
    RearInner,
    FrontOuter,
    FrontInner,
    LeftFacadeSegment,
    RightFacadeSegment,
    UnclassifiedKept,
}

impl WallClass {
    pub const ALL: [WallClass; 7] = [
        WallClass::RearOuter,
        WallClass::RearInner,
        WallClass::FrontOuter,
        WallClass::FrontInner,
        WallClass::LeftFacadeSegment,
        WallClass::RightFacadeSegment,
        WallClass::UnclassifiedKept,
    ];

    /// Every class except `UnclassifiedKept` is replaced by other geometry
    #[inline]
    pub fn is_removed(self) -> bool {
        self != WallClass::UnclassifiedKept
    }

    pub fn facade_segment(facade: FacadeId) -> Self {
        match facade {
            FacadeId::Left => WallClass::LeftFacadeSegment,
            FacadeId::Right => WallClass::RightFacadeSegment,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WallClass::RearOuter => "rear-outer",
            WallClass::RearInner => "rear-inner",
            WallClass::FrontOuter => "front-outer",
            WallClass::FrontInner => "front-inner",
            WallClass::LeftFacadeSegment => "left-facade-segment",
            WallClass::RightFacadeSegment => "right-facade-segment",
            WallClass::UnclassifiedKept => "unclassified-kept",
        }
    }
}

/// One world-space shell triangle
#[derive(Debug, Clone, Copy)]
pub struct WallTriangle {
    pub vertices: [Point3<f64>; 3],
    /// Unit face normal, zero for degenerate triangles
    pub normal: Vector3<f64>,
}

impl WallTriangle {
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        let normal = (b - a)
            .cross(&(c - a))
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros);
        Self {
            vertices: [a, b, c],
            normal,
        }
    }

    #[inline]
    pub fn faces_x(&self) -> bool {
        self.normal.x.abs() >= AXIS_FACING_THRESHOLD
    }

    #[inline]
    pub fn faces_z(&self) -> bool {
        self.normal.z.abs() >= AXIS_FACING_THRESHOLD
    }

    #[inline]
    pub fn mean_z(&self) -> f64 {
        (self.vertices[0].z + self.vertices[1].z + self.vertices[2].z) / 3.0
    }

    #[inline]
    pub fn z_span(&self) -> (f64, f64) {
        let zs = self.vertices.map(|v| v.z);
        (zs[0].min(zs[1]).min(zs[2]), zs[0].max(zs[1]).max(zs[2]))
    }

    #[inline]
    pub fn on_x_plane(&self, x: f64, tolerance: f64) -> bool {
        self.vertices.iter().all(|v| (v.x - x).abs() <= tolerance)
    }

    #[inline]
    pub fn on_z_plane(&self, z: f64, tolerance: f64) -> bool {
        self.vertices.iter().all(|v| (v.z - z).abs() <= tolerance)
    }

    /// Z span overlaps `[lo, hi]`
    #[inline]
    pub fn overlaps_z(&self, lo: f64, hi: f64) -> bool {
        let (z_min, z_max) = self.z_span();
        z_min <= hi && z_max >= lo
    }
}

/// A side facade as the carver sees it
#[derive(Debug, Clone)]
pub struct CarverFacade {
    pub ctx: FacadeContext,
    pub profile: FacadeProfile,
}

impl CarverFacade {
    pub fn new(ctx: FacadeContext, profile: FacadeProfile) -> Self {
        Self { ctx, profile }
    }

    #[inline]
    fn inner_x(&self, outer_x: f64, wall_thickness: f64) -> f64 {
        outer_x - self.ctx.outward_sign * wall_thickness
    }
}

/// Per-class triangle counts of one carving pass
#[derive(Debug, Clone, Default)]
pub struct CarveStats {
    pub input: usize,
    pub kept: usize,
    pub removed: usize,
    pub by_class: FxHashMap<WallClass, usize>,
    /// Triangles that fell inside the extension band
    pub extension_band: usize,
}

impl CarveStats {
    #[inline]
    pub fn count(&self, class: WallClass) -> usize {
        self.by_class.get(&class).copied().unwrap_or(0)
    }
}

/// Carved shell buffers in the shell's local frame
#[derive(Debug, Clone)]
pub struct CarvedShell {
    /// Unindexed triangle soup (x, y, z)
    pub positions: Vec<f32>,
    /// Present when the source shell carried UVs
    pub uvs: Option<Vec<f32>>,
    /// Per-face normals recomputed from the kept triangles
    pub normals: Vec<f32>,
    pub placement: Placement,
    pub stats: CarveStats,
}

impl CarvedShell {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 9
    }

    /// Indexed mesh over the soup (identity indices)
    pub fn to_mesh(&self) -> Mesh {
        let vertex_count = (self.positions.len() / 3) as u32;
        Mesh {
            positions: self.positions.clone(),
            normals: self.normals.clone(),
            uvs: self.uvs.clone().unwrap_or_default(),
            indices: (0..vertex_count).collect(),
        }
    }

    /// Mesh with the placement applied
    pub fn world_mesh(&self) -> Mesh {
        let mut mesh = self.to_mesh();
        crate::extrusion::apply_transform(&mut mesh, &self.placement.to_matrix());
        mesh
    }
}

/// Removes shell triangles replaced by panels or cut by openings
#[derive(Debug, Clone)]
pub struct ShellCarver {
    envelope: EnvelopeBounds,
    wall_thickness: f64,
    left: CarverFacade,
    right: CarverFacade,
    cuts: Vec<OpeningCut>,
    role: ShellRole,
    extension: Option<ExtensionWall>,
    tolerance: f64,
}

impl ShellCarver {
    /// `left` and `right` must describe the architectural left and right facades
    pub fn new(
        envelope: EnvelopeBounds,
        wall_thickness: f64,
        left: CarverFacade,
        right: CarverFacade,
    ) -> Self {
        debug_assert_eq!(left.ctx.facade, FacadeId::Left);
        debug_assert_eq!(right.ctx.facade, FacadeId::Right);
        Self {
            envelope,
            wall_thickness,
            left,
            right,
            cuts: Vec::new(),
            role: ShellRole::Facade,
            extension: None,
            tolerance: PLANE_TOLERANCE,
        }
    }

    pub fn with_role(mut self, role: ShellRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_openings(mut self, cuts: impl IntoIterator<Item = OpeningCut>) -> Self {
        self.cuts.extend(cuts);
        self
    }

    pub fn with_extension(mut self, extension: Option<ExtensionWall>) -> Self {
        self.extension = extension;
        self
    }

    #[inline]
    fn facade(&self, facade: FacadeId) -> &CarverFacade {
        match facade {
            FacadeId::Left => &self.left,
            FacadeId::Right => &self.right,
        }
    }

    /// Extension wall the triangle lies on, if any
    fn extension_band(&self, tri: &WallTriangle) -> Option<&ExtensionWall> {
        self.extension.as_ref().filter(|ext| {
            tri.faces_x()
                && tri.on_x_plane(ext.x, self.tolerance)
                && tri.overlaps_z(ext.z0, ext.z1)
        })
    }

    /// Classify one world-space triangle
    pub fn classify(&self, tri: &WallTriangle) -> WallClass {
        let tol = self.tolerance;
        let t = self.wall_thickness;
        let env = &self.envelope;

        // Vertex position alone decides; collinear slivers on the plane go too
        let (front_inner, rear_inner) = env.inner_z(t);
        let planes = [
            (env.front_z, WallClass::FrontOuter),
            (front_inner, WallClass::FrontInner),
            (env.rear_z, WallClass::RearOuter),
            (rear_inner, WallClass::RearInner),
        ];
        if let Some(&(_, class)) = planes.iter().find(|(z, _)| tri.on_z_plane(*z, tol)) {
            return class;
        }

        if let Some(ext) = self.extension_band(tri) {
            tracing::trace!(
                x = ext.x,
                z0 = ext.z0,
                z1 = ext.z1,
                exclusion = EXTENSION_SIDE_WALL_EXCLUSION,
                "triangle in extension band"
            );
            if EXTENSION_SIDE_WALL_EXCLUSION {
                return WallClass::UnclassifiedKept;
            }
        }

        if self.role == ShellRole::Facade && tri.faces_x() {
            for side in [&self.left, &self.right] {
                for seg in side.profile.segments() {
                    let outer = seg.plane_x;
                    let inner = side.inner_x(outer, t);
                    let on_plane = tri.on_x_plane(outer, tol) || tri.on_x_plane(inner, tol);
                    if on_plane && tri.overlaps_z(seg.z_start - tol, seg.z_end - tol) {
                        return WallClass::facade_segment(side.ctx.facade);
                    }
                }
            }
        }

        let left_outer = self.left.profile.resolve_plane_x(tri.mean_z());
        let left_inner = self.left.inner_x(left_outer, t);
        if tri.on_x_plane(left_outer, tol) || tri.on_x_plane(left_inner, tol) {
            return WallClass::LeftFacadeSegment;
        }

        for cut in &self.cuts {
            let side = self.facade(cut.facade);
            let inner = side.inner_x(cut.outer_plane_x, t);
            if tri.vertices.iter().all(|v| cut.contains(v, inner, tol)) {
                return WallClass::facade_segment(cut.facade);
            }
        }

        WallClass::UnclassifiedKept
    }

    /// World-space triangles of a shell in index order
    pub fn wall_triangles(shell: &ExtrudedShell) -> Vec<WallTriangle> {
        let mesh = &shell.mesh;
        mesh.triangles()
            .map(|[a, b, c]| {
                let to_world = |i| shell.placement.transform_point(&mesh.vertex(i));
                WallTriangle::new(to_world(a), to_world(b), to_world(c))
            })
            .collect()
    }

    /// Drop every triangle classified for removal
    pub fn carve(&self, shell: &ExtrudedShell) -> CarvedShell {
        let mesh = &shell.mesh;
        let has_uvs = mesh.has_uvs();

        let mut stats = CarveStats {
            input: mesh.triangle_count(),
            ..Default::default()
        };
        let mut positions = Vec::with_capacity(mesh.indices.len() * 3);
        let mut uvs = Vec::with_capacity(if has_uvs { mesh.indices.len() * 2 } else { 0 });

        for (indices, tri) in mesh.triangles().zip(Self::wall_triangles(shell)) {
            if self.extension_band(&tri).is_some() {
                stats.extension_band += 1;
            }

            let class = self.classify(&tri);
            *stats.by_class.entry(class).or_insert(0) += 1;

            if class.is_removed() {
                stats.removed += 1;
                continue;
            }

            stats.kept += 1;
            for i in indices {
                positions.extend_from_slice(&mesh.positions[i * 3..i * 3 + 3]);
                if has_uvs {
                    uvs.extend_from_slice(&mesh.uvs[i * 2..i * 2 + 2]);
                }
            }
        }

        let normals = flat_normals(&positions);

        tracing::debug!(
            input = stats.input,
            kept = stats.kept,
            removed = stats.removed,
            role = ?self.role,
            cuts = self.cuts.len(),
            "carved wall shell"
        );

        CarvedShell {
            positions,
            uvs: has_uvs.then_some(uvs),
            normals,
            placement: shell.placement,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::build_shell;
    use houseforge_core::{Handedness, HouseParams};

    fn reference() -> (ShellCarver, ExtrudedShell) {
        let params = HouseParams::default();
        let outer = params.footprint_polygon().unwrap();
        let inner = outer.offset(-params.wall_thickness).unwrap();
        let shell = build_shell(&outer, &inner, 2.75, 0.0).unwrap();

        let envelope = EnvelopeBounds::from_footprint(&outer, Handedness::Standard);
        let left = CarverFacade::new(
            FacadeContext::resolve(FacadeId::Left, Handedness::Standard),
            FacadeProfile::new(params.left_profile.clone()).unwrap(),
        );
        let right = CarverFacade::new(
            FacadeContext::resolve(FacadeId::Right, Handedness::Standard),
            FacadeProfile::new(params.right_profile.clone()).unwrap(),
        );
        (
            ShellCarver::new(envelope, params.wall_thickness, left, right),
            shell,
        )
    }

    fn removal_planes(carver: &ShellCarver, tri: &WallTriangle) -> bool {
        let t = carver.wall_thickness;
        let env = &carver.envelope;
        let tol = PLANE_TOLERANCE;
        let (fi, ri) = env.inner_z(t);
        let z_planes = [env.front_z, fi, env.rear_z, ri];
        if z_planes.iter().any(|z| tri.on_z_plane(*z, tol)) {
            return true;
        }
        let x = carver.left.profile.resolve_plane_x(tri.mean_z());
        tri.on_x_plane(x, tol) || tri.on_x_plane(x - t, tol)
    }

    #[test]
    fn test_conservation() {
        let (carver, shell) = reference();
        for role in [ShellRole::Facade, ShellRole::Structure] {
            let carved = carver.clone().with_role(role).carve(&shell);
            let stats = &carved.stats;
            assert_eq!(stats.kept + stats.removed, stats.input);
            assert_eq!(stats.input, shell.triangle_count());
            assert_eq!(carved.triangle_count(), stats.kept);
            assert_eq!(
                WallClass::ALL.iter().map(|c| stats.count(*c)).sum::<usize>(),
                stats.input
            );
        }
    }

    #[test]
    fn test_no_kept_triangle_on_removal_plane() {
        let (carver, shell) = reference();
        let carved = carver.carve(&shell);
        let world = carved.world_mesh();
        for [a, b, c] in world.triangles() {
            let tri = WallTriangle::new(world.vertex(a), world.vertex(b), world.vertex(c));
            assert!(!removal_planes(&carver, &tri), "kept triangle lies on a removal plane");
        }
    }

    #[test]
    fn test_facade_role_removes_both_sides() {
        let (carver, shell) = reference();
        let carved = carver.carve(&shell);
        assert!(carved.stats.count(WallClass::LeftFacadeSegment) > 0);
        assert!(carved.stats.count(WallClass::RightFacadeSegment) > 0);
        assert!(carved.stats.count(WallClass::FrontOuter) > 0);
        assert!(carved.stats.count(WallClass::RearInner) > 0);
        // Caps and the step returns survive
        assert!(carved.stats.kept > 0);
    }

    #[test]
    fn test_structure_role_keeps_right_wall() {
        let (carver, shell) = reference();
        let carved = carver.with_role(ShellRole::Structure).carve(&shell);
        assert_eq!(carved.stats.count(WallClass::RightFacadeSegment), 0);
        assert!(carved.stats.count(WallClass::LeftFacadeSegment) > 0);

        let world = carved.world_mesh();
        let right_wall = world.triangles().any(|[a, b, c]| {
            [a, b, c].iter().all(|&i| (world.vertex(i).x + 4.8).abs() < 0.01)
        });
        assert!(right_wall);
    }

    #[test]
    fn test_kept_buffers_are_aligned() {
        let (carver, shell) = reference();
        let carved = carver.carve(&shell);
        let uvs = carved.uvs.as_ref().unwrap();
        assert_eq!(carved.positions.len() / 3, uvs.len() / 2);
        assert_eq!(carved.normals.len(), carved.positions.len());
    }

    #[test]
    fn test_extension_band_is_inert() {
        let (carver, shell) = reference();
        let baseline = carver.clone().carve(&shell);
        let ext = ExtensionWall {
            x: 3.5,
            z0: 8.45,
            z1: 12.0,
        };
        let with_ext = carver.with_extension(Some(ext)).carve(&shell);
        assert!(with_ext.stats.extension_band > 0);
        assert_eq!(with_ext.stats.kept, baseline.stats.kept);
        assert_eq!(with_ext.positions, baseline.positions);
    }

    #[test]
    fn test_triangle_orientation() {
        let tri = WallTriangle::new(
            Point3::new(4.8, 0.0, 0.0),
            Point3::new(4.8, 0.0, 1.0),
            Point3::new(4.8, 1.0, 0.0),
        );
        assert!(tri.faces_x());
        assert!(!tri.faces_z());
        assert!(tri.on_x_plane(4.805, 0.01));
        assert!(tri.overlaps_z(0.5, 3.0));
        assert!(!tri.overlaps_z(1.5, 3.0));
    }

    #[test]
    fn test_opening_cut_removes_contained_triangle() {
        let (carver, _) = reference();
        let cut = OpeningCut {
            facade: FacadeId::Right,
            outer_plane_x: -4.8,
            z_center: 6.0,
            width: 1.0,
            height: 2.0,
            bottom_y: 0.5,
        };
        let carver = carver.with_role(ShellRole::Structure).with_openings([cut]);
        // Horizontal sliver inside the wall thickness at the opening
        let tri = WallTriangle::new(
            Point3::new(-4.7, 1.0, 5.8),
            Point3::new(-4.6, 1.0, 6.2),
            Point3::new(-4.6, 1.2, 5.8),
        );
        assert_eq!(carver.classify(&tri), WallClass::RightFacadeSegment);

        let outside = WallTriangle::new(
            Point3::new(-4.7, 3.0, 5.8),
            Point3::new(-4.6, 3.0, 6.2),
            Point3::new(-4.6, 3.2, 5.8),
        );
        assert_eq!(carver.classify(&outside), WallClass::UnclassifiedKept);
    }

    #[test]
    fn test_collinear_triangle_on_front_plane_is_removed() {
        let (carver, _) = reference();
        let sliver = WallTriangle::new(
            Point3::new(-1.0, 0.5, 0.0),
            Point3::new(0.0, 0.5, 0.004),
            Point3::new(1.0, 0.5, 0.008),
        );
        assert_eq!(sliver.normal, Vector3::zeros());
        assert!(!sliver.faces_z());
        assert_eq!(carver.classify(&sliver), WallClass::FrontOuter);

        let rear_inner = WallTriangle::new(
            Point3::new(0.0, 1.0, 11.7),
            Point3::new(0.0, 2.0, 11.7),
            Point3::new(0.0, 3.0, 11.7),
        );
        assert_eq!(carver.classify(&rear_inner), WallClass::RearInner);
    }
}

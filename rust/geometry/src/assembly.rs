// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window assembly synthesis
//!
//! One placement becomes an ordered list of sub-mesh descriptors:
//!
//! 1. frame (rectangle-with-hole extrusion)
//! 2. glazing: one pane, or lower pane + metal band + upper pane for tall
//!    split windows
//! 3. stone sill
//! 4. four reveal returns (left jamb, right jamb, head, sill)
//! 5. tall split windows only: exterior slate band and floor-transition band
//!
//! Positions are absolute world coordinates. IDs are `<window id>_<part>`;
//! every glazing part contains `_glass`, which consumers use to pick a
//! transparent material.

use crate::error::Result;
use crate::extrusion::extrude_profile;
use crate::facade_context::FacadeContext;
use crate::mesh::Mesh;
use crate::planner::WindowPlacement;
use crate::profile::Profile2D;
use crate::sill::sill_part;
use houseforge_core::constants::{
    FRAME_BORDER, FRAME_DEPTH, FRAME_HALF_DEPTH, GLASS_INSET, GLASS_THICKNESS, MIN_DIMENSION,
    REVEAL_FACE_THICKNESS, SILL_MARGIN, SLATE_BAND_DEPTH, SLATE_BAND_HEIGHT,
    TALL_LOWER_GLASS_HEIGHT, TALL_METAL_BAND_HEIGHT, TRANSITION_BAND_DEPTH,
    TRANSITION_BAND_OFFSET,
};
use houseforge_core::{LevelHeights, SillSpec};
use nalgebra::{Matrix4, Point2, Point3, Translation3, UnitQuaternion, Vector3};

/// Shape of an assembly part
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryKind {
    /// World-aligned box of the given size
    Box { size: Vector3<f64> },
    /// Rectangular frame: outer `width x height`, inset by `border`, `depth` thick
    FrameExtrusion {
        width: f64,
        height: f64,
        border: f64,
        depth: f64,
    },
}

/// Material slot the rendering layer resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialRef {
    Frame,
    Glass,
    Metal,
    Stone,
    Reveal,
    Slate,
}

impl MaterialRef {
    pub fn as_str(self) -> &'static str {
        match self {
            MaterialRef::Frame => "frame",
            MaterialRef::Glass => "glass",
            MaterialRef::Metal => "metal",
            MaterialRef::Stone => "stone",
            MaterialRef::Reveal => "reveal",
            MaterialRef::Slate => "slate",
        }
    }
}

/// Renderable part of one window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowAssemblyMesh {
    pub id: String,
    pub geometry_kind: GeometryKind,
    pub local_position: Point3<f64>,
    pub local_rotation: UnitQuaternion<f64>,
    pub material: MaterialRef,
}

impl WindowAssemblyMesh {
    fn boxed(id: String, center: Point3<f64>, size: Vector3<f64>, material: MaterialRef) -> Self {
        Self {
            id,
            geometry_kind: GeometryKind::Box { size },
            local_position: center,
            local_rotation: UnitQuaternion::identity(),
            material,
        }
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        is_transparent_id(&self.id)
    }

    /// Realise the descriptor as a world-space mesh
    pub fn to_mesh(&self) -> Result<Mesh> {
        match self.geometry_kind {
            GeometryKind::Box { size } => {
                let mut mesh = Mesh::cuboid(Point3::origin(), size);
                crate::extrusion::apply_transform(&mut mesh, &self.transform());
                Ok(mesh)
            }
            GeometryKind::FrameExtrusion {
                width,
                height,
                border,
                depth,
            } => {
                let (hw, hh) = (width * 0.5, height * 0.5);
                let mut profile =
                    Profile2D::rectangle(Point2::new(-hw, -hh), Point2::new(hw, hh));
                // Keep the clear opening strictly inside the outline
                let inset = |half: f64| {
                    let inner = (half - border).max(MIN_DIMENSION * 0.5);
                    if inner < half {
                        inner
                    } else {
                        half * 0.5
                    }
                };
                let (iw, ih) = (inset(hw), inset(hh));
                profile.add_hole(vec![
                    Point2::new(-iw, -ih),
                    Point2::new(-iw, ih),
                    Point2::new(iw, ih),
                    Point2::new(iw, -ih),
                ]);

                // Extrude centered on the frame plane
                let centering = Matrix4::new_translation(&Vector3::new(0.0, 0.0, -depth * 0.5));
                extrude_profile(&profile, depth, Some(self.transform() * centering))
            }
        }
    }

    fn transform(&self) -> Matrix4<f64> {
        Translation3::from(self.local_position.coords).to_homogeneous()
            * self.local_rotation.to_homogeneous()
    }
}

/// Glazing convention: any ID containing `_glass` is transparent
#[inline]
pub fn is_transparent_id(id: &str) -> bool {
    id.contains("_glass")
}

/// Builds assemblies for one facade
#[derive(Debug, Clone, Copy)]
pub struct WindowAssemblyFactory {
    pub ctx: FacadeContext,
    pub levels: LevelHeights,
    pub wall_thickness: f64,
}

impl WindowAssemblyFactory {
    pub fn new(ctx: FacadeContext, levels: LevelHeights, wall_thickness: f64) -> Self {
        Self {
            ctx,
            levels,
            wall_thickness,
        }
    }

    /// Ordered parts of one window; trivial placements yield nothing
    pub fn assemble(&self, placement: &WindowPlacement) -> Vec<WindowAssemblyMesh> {
        if placement.is_trivial() {
            return Vec::new();
        }

        let ctx = &self.ctx;
        let id = placement.id();
        let outer_x = placement.resolved_outer_plane_x;
        let z = placement.adjusted_z_center;
        let width = placement.width;
        let height = placement.total_height;
        let bottom = placement.bottom_y;
        let split = placement.is_split();

        let frame_x = outer_x - ctx.outward_sign * FRAME_HALF_DEPTH;
        let glass_x = frame_x + ctx.interior_sign * GLASS_INSET;
        let clear_width = (width - 2.0 * FRAME_BORDER).max(MIN_DIMENSION);

        let mut parts = Vec::with_capacity(if split { 11 } else { 7 });

        parts.push(WindowAssemblyMesh {
            id: format!("{}_frame", id),
            geometry_kind: GeometryKind::FrameExtrusion {
                width,
                height,
                border: FRAME_BORDER,
                depth: FRAME_DEPTH,
            },
            local_position: Point3::new(frame_x, bottom + height * 0.5, z),
            // Local X (frame width) runs along world Z, extrusion along world X
            local_rotation: UnitQuaternion::from_axis_angle(
                &Vector3::y_axis(),
                std::f64::consts::FRAC_PI_2,
            ),
            material: MaterialRef::Frame,
        });

        if split {
            let lower_top = bottom + TALL_LOWER_GLASS_HEIGHT;
            let band_top = lower_top + TALL_METAL_BAND_HEIGHT;
            let top = bottom + height;

            let lower_h = (TALL_LOWER_GLASS_HEIGHT - FRAME_BORDER).max(MIN_DIMENSION);
            let upper_h = (top - band_top - FRAME_BORDER).max(MIN_DIMENSION);

            parts.push(WindowAssemblyMesh::boxed(
                format!("{}_glass_lower", id),
                Point3::new(glass_x, bottom + FRAME_BORDER + lower_h * 0.5, z),
                Vector3::new(GLASS_THICKNESS, lower_h, clear_width),
                MaterialRef::Glass,
            ));
            parts.push(WindowAssemblyMesh::boxed(
                format!("{}_metal_band", id),
                Point3::new(frame_x, lower_top + TALL_METAL_BAND_HEIGHT * 0.5, z),
                Vector3::new(FRAME_DEPTH, TALL_METAL_BAND_HEIGHT, width),
                MaterialRef::Metal,
            ));
            parts.push(WindowAssemblyMesh::boxed(
                format!("{}_glass_upper", id),
                Point3::new(glass_x, band_top + upper_h * 0.5, z),
                Vector3::new(GLASS_THICKNESS, upper_h, clear_width),
                MaterialRef::Glass,
            ));
        } else {
            let clear_height = (height - 2.0 * FRAME_BORDER).max(MIN_DIMENSION);
            parts.push(WindowAssemblyMesh::boxed(
                format!("{}_glass", id),
                Point3::new(glass_x, bottom + height * 0.5, z),
                Vector3::new(GLASS_THICKNESS, clear_height, clear_width),
                MaterialRef::Glass,
            ));
        }

        let sill = SillSpec::side_facing(
            ctx.sill_side,
            outer_x,
            z,
            width + 2.0 * SILL_MARGIN,
            bottom,
        );
        parts.push(sill_part(id, &sill));

        parts.extend(self.reveals(placement));

        if split {
            parts.push(WindowAssemblyMesh::boxed(
                format!("{}_slate_band", id),
                Point3::new(
                    outer_x + ctx.outward_sign * SLATE_BAND_DEPTH * 0.5,
                    self.levels.first_floor,
                    z,
                ),
                Vector3::new(SLATE_BAND_DEPTH, SLATE_BAND_HEIGHT, width),
                MaterialRef::Slate,
            ));
            parts.push(WindowAssemblyMesh::boxed(
                format!("{}_transition_band", id),
                Point3::new(
                    frame_x
                        + ctx.outward_sign
                            * (FRAME_HALF_DEPTH
                                + TRANSITION_BAND_OFFSET
                                + TRANSITION_BAND_DEPTH * 0.5),
                    bottom + TALL_LOWER_GLASS_HEIGHT + TALL_METAL_BAND_HEIGHT * 0.5,
                    z,
                ),
                Vector3::new(TRANSITION_BAND_DEPTH, TALL_METAL_BAND_HEIGHT, width),
                MaterialRef::Metal,
            ));
        }

        tracing::trace!(id, parts = parts.len(), split, "assembled window");
        parts
    }

    /// Jamb, head and sill returns lining the opening through the wall
    fn reveals(&self, placement: &WindowPlacement) -> [WindowAssemblyMesh; 4] {
        let ctx = &self.ctx;
        let id = placement.id();
        let width = placement.width;
        let height = placement.total_height;
        let bottom = placement.bottom_y;
        let z = placement.adjusted_z_center;
        let depth = self.wall_thickness;

        let center_x = placement.resolved_outer_plane_x - ctx.outward_sign * depth * 0.5;
        let jamb = reveal_thickness(width);
        let head = reveal_thickness(height);

        // Jamb sides follow the outward lean so both facades mirror cleanly
        let jamb_offset = ctx.outward_sign * (width * 0.5 - jamb * 0.5);

        [
            WindowAssemblyMesh::boxed(
                format!("{}_reveal_left", id),
                Point3::new(center_x, bottom + height * 0.5, z + jamb_offset),
                Vector3::new(depth, height, jamb),
                MaterialRef::Reveal,
            ),
            WindowAssemblyMesh::boxed(
                format!("{}_reveal_right", id),
                Point3::new(center_x, bottom + height * 0.5, z - jamb_offset),
                Vector3::new(depth, height, jamb),
                MaterialRef::Reveal,
            ),
            WindowAssemblyMesh::boxed(
                format!("{}_reveal_head", id),
                Point3::new(center_x, bottom + height - head * 0.5, z),
                Vector3::new(depth, head, width),
                MaterialRef::Reveal,
            ),
            WindowAssemblyMesh::boxed(
                format!("{}_reveal_sill", id),
                Point3::new(center_x, bottom + head * 0.5, z),
                Vector3::new(depth, head, width),
                MaterialRef::Reveal,
            ),
        ]
    }
}

/// Reveal face thickness, at most half the opening dimension
#[inline]
pub fn reveal_thickness(opening_dimension: f64) -> f64 {
    REVEAL_FACE_THICKNESS
        .max(MIN_DIMENSION * 0.5)
        .min(opening_dimension.max(0.0) * 0.5)
}

/// Assemble one window on the facade described by `ctx`
pub fn assemble_window(
    placement: &WindowPlacement,
    ctx: &FacadeContext,
    levels: &LevelHeights,
    wall_thickness: f64,
) -> Vec<WindowAssemblyMesh> {
    WindowAssemblyFactory::new(*ctx, *levels, wall_thickness).assemble(placement)
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facade Panel Builder
//!
//! Wall panels built separately from the carved shell. Each panel is a flat
//! face in its wall plane, with the openings subtracted in 2D, extruded from
//! the outer plane toward the interior by the wall thickness.
//!
//! Faces are laid out in a local frame `(u, v, w)` with `v` world up and `w`
//! pointing into the building. The sign of `u` is chosen so the frame stays
//! right-handed and extrusion windings survive the transform.

use crate::bool2d::subtract_openings;
use crate::error::{Error, Result};
use crate::extrusion::extrude_profile;
use crate::facade_context::FacadeContext;
use crate::facade_profile::FacadeProfile;
use crate::mesh::Mesh;
use crate::opening::OpeningCut;
use crate::profile::Profile2D;
use crate::transform::frame_matrix;
use houseforge_core::constants::{MIN_DIMENSION, PLANE_TOLERANCE};
use houseforge_core::{Floor, FootprintPolygon, RearOpening};
use nalgebra::{Matrix4, Point2, Vector3};

/// End elevation of the footprint (a Z-plane facade)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacadeEnd {
    /// Minimum Z, faces −Z
    Front,
    /// Maximum Z, faces +Z
    Rear,
}

impl FacadeEnd {
    pub const ALL: [FacadeEnd; 2] = [FacadeEnd::Front, FacadeEnd::Rear];

    /// Direction from the end plane into the building along Z
    #[inline]
    pub fn interior_sign(self) -> f64 {
        match self {
            FacadeEnd::Front => 1.0,
            FacadeEnd::Rear => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FacadeEnd::Front => "front",
            FacadeEnd::Rear => "rear",
        }
    }
}

/// One extruded wall panel in world coordinates
#[derive(Debug, Clone)]
pub struct FacadePanel {
    pub id: String,
    pub mesh: Mesh,
    /// Net face area after opening subtraction
    pub face_area: f64,
    /// Openings that intersected the face
    pub opening_count: usize,
}

/// Panels of one side facade on one floor, one slab per profile segment
///
/// `z_range` is the span of the side wall between the front and rear inner
/// planes. Cuts of other facades or floors are ignored; a cut belongs to the
/// segment whose plane it was resolved against.
pub fn build_side_panels(
    ctx: &FacadeContext,
    profile: &FacadeProfile,
    z_range: (f64, f64),
    floor: &Floor,
    thickness: f64,
    cuts: &[OpeningCut],
) -> Result<Vec<FacadePanel>> {
    let (base_y, top_y) = (floor.base_y, floor.top_y());
    // u = a·z with a = −interior keeps det(u, v, w) positive
    let a = -ctx.interior_sign;
    let w = Vector3::new(ctx.interior_sign, 0.0, 0.0);
    let u = Vector3::new(0.0, 0.0, a);

    let mut panels = Vec::new();
    for (index, seg) in profile.segments().iter().enumerate() {
        let z0 = seg.z_start.max(z_range.0);
        let z1 = seg.z_end.min(z_range.1);
        if z1 - z0 <= MIN_DIMENSION {
            continue;
        }

        let holes: Vec<Vec<Point2<f64>>> = cuts
            .iter()
            .filter(|c| c.facade == ctx.facade)
            .filter(|c| (c.outer_plane_x - seg.plane_x).abs() <= PLANE_TOLERANCE)
            .filter(|c| c.overlaps_y(base_y, top_y))
            .filter(|c| {
                let (c0, c1) = c.z_range();
                c0 < z1 && c1 > z0
            })
            .map(|c| {
                let (c0, c1) = c.z_range();
                face_rect(a * c0, a * c1, c.bottom_y, c.top_y())
            })
            .collect();

        let face = Profile2D::new(face_rect(a * z0, a * z1, base_y, top_y));
        let frame = frame_matrix(
            u,
            Vector3::y(),
            w,
            Vector3::new(seg.plane_x, 0.0, 0.0),
        );

        let id = format!("{}_f{}_s{}", ctx.facade.as_str(), floor.index, index);
        panels.extend(extrude_face(&id, &face, &holes, thickness, frame)?);
    }

    tracing::debug!(
        facade = ctx.facade.as_str(),
        floor = floor.index,
        panels = panels.len(),
        "built side panels"
    );

    Ok(panels)
}

/// Front or rear panel of one floor
///
/// The panel spans the footprint's X extent at the end plane. Openings whose
/// band misses the floor are ignored.
pub fn build_end_panel(
    end: FacadeEnd,
    footprint: &FootprintPolygon,
    floor: &Floor,
    thickness: f64,
    openings: &[RearOpening],
) -> Result<Vec<FacadePanel>> {
    let bounds = footprint.bounds();
    let plane_z = match end {
        FacadeEnd::Front => bounds.min_z,
        FacadeEnd::Rear => bounds.max_z,
    };
    let (x0, x1) = footprint
        .x_extents_at(plane_z, PLANE_TOLERANCE)
        .ok_or_else(|| {
            Error::InvalidProfile(format!(
                "footprint has no edge on the {} plane z={:.3}",
                end.as_str(),
                plane_z
            ))
        })?;

    let (base_y, top_y) = (floor.base_y, floor.top_y());
    let s = end.interior_sign();

    let holes: Vec<Vec<Point2<f64>>> = openings
        .iter()
        .filter(|o| !o.band.is_empty() && o.width > 0.0)
        .filter(|o| o.band.y0 < top_y && o.band.y1 > base_y)
        .map(|o| {
            let half = o.width * 0.5;
            face_rect(s * (o.x_center - half), s * (o.x_center + half), o.band.y0, o.band.y1)
        })
        .collect();

    let face = Profile2D::new(face_rect(s * x0, s * x1, base_y, top_y));
    let frame = frame_matrix(
        Vector3::new(s, 0.0, 0.0),
        Vector3::y(),
        Vector3::new(0.0, 0.0, s),
        Vector3::new(0.0, 0.0, plane_z),
    );

    let id = format!("{}_f{}", end.as_str(), floor.index);
    let panels = extrude_face(&id, &face, &holes, thickness, frame)?;

    tracing::debug!(
        end = end.as_str(),
        floor = floor.index,
        openings = holes.len(),
        "built end panel"
    );

    Ok(panels)
}

/// Axis-aligned rectangle from two u values in either order
fn face_rect(u0: f64, u1: f64, v0: f64, v1: f64) -> Vec<Point2<f64>> {
    let (lo, hi) = if u0 <= u1 { (u0, u1) } else { (u1, u0) };
    vec![
        Point2::new(lo, v0),
        Point2::new(hi, v0),
        Point2::new(hi, v1),
        Point2::new(lo, v1),
    ]
}

fn extrude_face(
    id: &str,
    face: &Profile2D,
    holes: &[Vec<Point2<f64>>],
    thickness: f64,
    frame: Matrix4<f64>,
) -> Result<Vec<FacadePanel>> {
    let shapes = subtract_openings(face, holes)?;
    if shapes.is_empty() {
        tracing::trace!(id, "panel face fully consumed by openings");
        return Ok(Vec::new());
    }

    let single = shapes.len() == 1;
    shapes
        .iter()
        .enumerate()
        .map(|(k, shape)| {
            let mesh = extrude_profile(shape, thickness, Some(frame))?;
            Ok(FacadePanel {
                id: if single {
                    id.to_string()
                } else {
                    format!("{}_p{}", id, k)
                },
                mesh,
                face_area: shape.area(),
                opening_count: holes.len(),
            })
        })
        .collect()
}

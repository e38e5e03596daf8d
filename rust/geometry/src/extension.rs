// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Side-wall extension locator
//!
//! A stepped side facade usually means an extension wing: the most inset
//! profile segment is a separate wall whose X is read back from the building
//! envelope. Computed once when the house model is prepared.

use crate::facade_context::FacadeContext;
use crate::facade_profile::FacadeProfile;
use houseforge_core::constants::{ENVELOPE_STEP_MARGIN, PLANE_TOLERANCE};
use houseforge_core::{FootprintPolygon, ProfileSegment};

/// Side wall of an extension: X plane over a Z interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtensionWall {
    pub x: f64,
    pub z0: f64,
    pub z1: f64,
}

/// Most inset segment of a profile
///
/// "Inset" is measured against the facade's outward direction, so for a
/// facade facing +X this is the minimal plane X. Ties within
/// `PLANE_TOLERANCE` go to the earliest `z_start`, then the shortest span.
pub fn select_extension_segment<'a>(
    ctx: &FacadeContext,
    segments: &'a [ProfileSegment],
) -> Option<&'a ProfileSegment> {
    let tol = PLANE_TOLERANCE;
    let inset = |seg: &ProfileSegment| ctx.outward_sign * seg.plane_x;

    segments.iter().fold(None, |best, seg| {
        let Some(current) = best else {
            return Some(seg);
        };

        let (a, b) = (inset(seg), inset(current));
        let better = if (a - b).abs() > tol {
            a < b
        } else if (seg.z_start - current.z_start).abs() > tol {
            seg.z_start < current.z_start
        } else {
            seg.span() < current.span()
        };

        Some(if better { seg } else { current })
    })
}

/// Locate the extension wall of a side facade
///
/// Returns `None` for flat profiles and when the selected segment does not
/// intersect the envelope. A flat profile's single segment would trivially be
/// the most inset one, but without a step there is no wing to spare, so no
/// extension is reported even though a segment exists.
pub fn locate_side_extension(
    ctx: &FacadeContext,
    profile: &FacadeProfile,
    envelope: &FootprintPolygon,
    flat_roof: &FootprintPolygon,
) -> Option<ExtensionWall> {
    let tol = PLANE_TOLERANCE;
    if !profile.is_stepped(tol) {
        return None;
    }

    let seg = select_extension_segment(ctx, profile.segments())?;

    let bounds = envelope.bounds();
    let z0 = seg.z_start.max(bounds.min_z);
    let z1 = seg.z_end.min(bounds.max_z);
    if z1 < z0 {
        return None;
    }

    let mid_z = (z0 + z1) * 0.5;
    let (low_x, high_x) = envelope.x_extents_at(mid_z, tol)?;

    let steps_low = low_x > bounds.min_x + ENVELOPE_STEP_MARGIN;
    let steps_high = high_x < bounds.max_x - ENVELOPE_STEP_MARGIN;

    let x = match (steps_low, steps_high) {
        (false, true) => high_x,
        (true, false) => low_x,
        _ => {
            let roof = flat_roof.bounds();
            if (roof.min_x - seg.plane_x).abs() <= (roof.max_x - seg.plane_x).abs() {
                roof.min_x
            } else {
                roof.max_x
            }
        }
    };

    tracing::debug!(
        facade = ctx.facade.as_str(),
        x,
        z0,
        z1,
        steps_low,
        steps_high,
        "located side extension"
    );

    Some(ExtensionWall { x, z0, z1 })
}
